use super::{
	gen_argument,
	mark_call_line,
	put_receiver,
	put_value_if_needed,
	Argument,
	Callable,
	Codegen,
	Error,
	ResolvedCall,
	StackValue,
	Type,
	ValueKind,
};
use crate::codegen::{reorder_arguments_if_needed, Capture, DefaultValue};


/// How many parameters each mask word covers.
pub const MASK_WIDTH: usize = 32;


/// Calls with omitted parameters, forwarded to the callee's default target.
/// Bit `i % 32` of mask word `i / 32` is set when parameter `i` was omitted.
#[derive(Debug)]
pub struct DefaultCall {
	masks: Box<[u32]>,
}


impl DefaultCall {
	/// Compute the mask words for the call.
	pub fn new<E>(callable: &Callable, call: &ResolvedCall<E>) -> Result<Self, Error> {
		if callable.default.is_none() {
			return Err(Error::missing_default_target());
		}

		let words = std::cmp::max(1, (callable.params.len() + MASK_WIDTH - 1) / MASK_WIDTH);
		let mut masks = vec![0u32; words];

		for arg in call.arguments.iter().filter(|arg| arg.argument.is_omitted()) {
			let word = masks
				.get_mut(arg.decl_index / MASK_WIDTH)
				.ok_or_else(
					|| Error::invalid_argument_index(arg.decl_index, callable.params.len())
				)?;

			*word |= 1 << (arg.decl_index % MASK_WIDTH);
		}

		tracing::trace!(?masks, "computed default mask");

		Ok(Self { masks: masks.into() })
	}


	/// The mask words, in the order they are passed.
	pub fn masks(&self) -> &[u32] {
		&self.masks
	}


	pub fn gen_call<C>(
		self,
		callable: &Callable,
		call: &ResolvedCall<C::Expr>,
		codegen: &mut C,
	) -> Result<(), Error>
	where
		C: Codegen + ?Sized,
	{
		call.validate(callable.params.len())?;

		let actual = call.actual_order();

		// Synthetic trailing parameters, in declared order.
		let mut by_decl: Vec<_> = actual.iter().collect();
		by_decl.sort_by_key(|arg| arg.decl_index);

		let mut handles = Vec::new();
		let mut lambda_captures: Vec<&Capture<C::Expr>> = Vec::new();

		for arg in by_decl {
			match arg.argument {
				Argument::Omitted(DefaultValue::Deferred(function)) => handles.push(*function),
				Argument::Omitted(DefaultValue::Lambda(captures)) => lambda_captures.extend(captures.iter()),
				_ => (),
			}
		}

		let target = callable.default
			.as_ref()
			.ok_or_else(Error::missing_default_target)?;
		let supplied = callable.params.len() + self.masks.len() + handles.len() + lambda_captures.len();

		if supplied != target.params.len() {
			return Err(Error::shape_mismatch(target.params.len(), supplied));
		}

		put_receiver(callable, call, codegen)?;

		for arg in actual.iter() {
			let param_type = &callable.params[arg.decl_index];

			match arg.argument {
				Argument::Omitted(_) => put_value_if_needed(
					StackValue::zero(param_type.clone()),
					param_type,
					ValueKind::DefaultParameter,
					arg.decl_index,
					codegen,
				)?,

				argument => gen_argument(argument, param_type, arg.decl_index, codegen)?,
			}
		}

		reorder_arguments_if_needed(&actual, &callable.params, codegen)?;

		let mut index = callable.params.len();

		for mask in self.masks.iter() {
			put_value_if_needed(
				StackValue::int(*mask as i32),
				&Type::Int,
				ValueKind::DefaultMask,
				index,
				codegen,
			)?;
			index += 1;
		}

		for function in handles {
			put_value_if_needed(
				StackValue::handle(callable.owner, function),
				&Type::Handle,
				ValueKind::MethodHandleInDefault,
				index,
				codegen,
			)?;
			index += 1;
		}

		for capture in lambda_captures {
			let value = codegen.gen(&capture.source)?;
			put_value_if_needed(
				value,
				&capture.ty,
				ValueKind::DefaultLambdaCapturedParameter,
				index,
				codegen,
			)?;
			index += 1;
		}

		mark_call_line(call.pos, codegen);
		callable.gen_invoke_default_instruction(codegen.sink())
	}
}
