mod captured;
mod default;
mod direct;

use super::{
	insn::{Constant, Instruction},
	Argument,
	Callable,
	Codegen,
	EmissionMode,
	Error,
	ResolvedCall,
	StackValue,
	Type,
	ValueKind,
};
use crate::source::SourcePos;
pub use captured::{
	Binding,
	CapturedCall,
	HiddenParam,
	HiddenParams,
	Materialized,
	Shaped,
	Unprocessed,
};
pub use default::DefaultCall;
pub use direct::DirectCall;


/// Emit a resolved call to the given target.
/// This is the entry point for the expression codegen driver.
pub fn emit<C>(
	callable: &Callable,
	call: &ResolvedCall<C::Expr>,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	CallGenerator
		::select(callable, call)
		.and_then(|generator| generator.gen_call(callable, call, codegen))
		.map_err(|error| error.at(call.pos))
}


/// The strategy used to emit a call site.
#[derive(Debug)]
pub enum CallGenerator {
	/// Ordinary calls.
	Direct(DirectCall),
	/// Calls with omitted parameters, forwarded to the default target.
	DefaultForwarding(DefaultCall),
	/// Calls to closure bodies, threading captured values as hidden parameters.
	CapturedThreading(CapturedCall),
}


impl CallGenerator {
	/// Select the strategy for the call.
	pub fn select<E>(callable: &Callable, call: &ResolvedCall<E>) -> Result<Self, Error> {
		let mode = call.mode()?;

		tracing::debug!(?mode, params = callable.params.len(), "selected call strategy");

		match mode {
			EmissionMode::Direct => Ok(Self::Direct(DirectCall)),

			EmissionMode::DefaultForwarding => Ok(
				Self::DefaultForwarding(DefaultCall::new(callable, call)?)
			),

			EmissionMode::CapturedThreading => Ok(
				Self::CapturedThreading(CapturedCall::new(&call.captures))
			),
		}
	}


	/// Emit the whole call: receiver, arguments, synthetic parameters and invocation.
	pub fn gen_call<C>(
		self,
		callable: &Callable,
		call: &ResolvedCall<C::Expr>,
		codegen: &mut C,
	) -> Result<(), Error>
	where
		C: Codegen + ?Sized,
	{
		let depth = codegen.frame().depth();

		if let Some(pos) = call.pos {
			codegen.mark_start_line_number(pos);
		}

		match self {
			Self::Direct(direct) => direct.gen_call(callable, call, codegen),
			Self::DefaultForwarding(default) => default.gen_call(callable, call, codegen),
			Self::CapturedThreading(captured) => captured.gen_call(callable, call, codegen),
		}?;

		if codegen.frame().depth() == depth {
			Ok(())
		} else {
			Err(Error::unbalanced_mark())
		}
	}
}


/// Put a value that fills a parameter position.
fn put_value_if_needed<C>(
	value: StackValue,
	param_type: &Type,
	kind: ValueKind,
	parameter_index: usize,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	tracing::trace!(
		?kind,
		index = parameter_index,
		declared = kind.is_declared(),
		masked = kind.sets_mask_bit(),
		"put parameter value"
	);
	value.put(param_type, codegen.sink())
}


/// Evaluate an argument expression and put it as the parameter type.
fn gen_value_and_put<C>(
	expr: &C::Expr,
	param_type: &Type,
	parameter_index: usize,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	let value = codegen.gen(expr)?;
	put_value_if_needed(value, param_type, ValueKind::General, parameter_index, codegen)
}


/// Collect spread arguments into a new array.
fn gen_vararg_and_put<C>(
	exprs: &[C::Expr],
	param_type: &Type,
	parameter_index: usize,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	let element = param_type
		.element()
		.ok_or_else(|| Error::not_an_array(param_type.clone()))?;

	codegen.sink().emit(Instruction::Push(Constant::Int(exprs.len() as i32)));
	codegen.sink().emit(Instruction::NewArray(element.clone()));

	for (ix, expr) in exprs.iter().enumerate() {
		codegen.sink().emit(Instruction::Dup);
		codegen.sink().emit(Instruction::Push(Constant::Int(ix as i32)));
		codegen.gen(expr)?.put(element, codegen.sink())?;
		codegen.sink().emit(Instruction::ArrayStore(element.clone()));
	}

	put_value_if_needed(
		StackValue::on_stack(param_type.clone()),
		param_type,
		ValueKind::GeneralVararg,
		parameter_index,
		codegen,
	)
}


/// Evaluate a supplied argument. Omitted arguments are handled by the default-forwarding
/// strategy only.
fn gen_argument<C>(
	argument: &Argument<C::Expr>,
	param_type: &Type,
	parameter_index: usize,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	match argument {
		Argument::Expr(expr) => gen_value_and_put(expr, param_type, parameter_index, codegen),
		Argument::Vararg(exprs) => gen_vararg_and_put(exprs, param_type, parameter_index, codegen),
		Argument::Omitted(_) => Err(Error::unsupported_call_shape()),
	}
}


/// Evaluate the receiver, if the dispatch takes one.
fn put_receiver<C>(
	callable: &Callable,
	call: &ResolvedCall<C::Expr>,
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	match (callable.receiver(), &call.receiver) {
		(Some(ty), Some(expr)) => codegen.gen(expr)?.put(&ty, codegen.sink()),
		(None, None) => Ok(()),
		_ => Err(Error::receiver_mismatch()),
	}
}


/// Mark the call line again if argument emission moved to other lines, so that the
/// invocation is attributed to the call.
fn mark_call_line<C>(pos: Option<SourcePos>, codegen: &mut C)
where
	C: Codegen + ?Sized,
{
	if let Some(pos) = pos {
		if codegen.last_line() != Some(pos.line) {
			codegen.mark_start_line_number(pos);
		}
	}
}
