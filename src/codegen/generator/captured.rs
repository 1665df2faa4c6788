use std::marker::PhantomData;

use super::{
	gen_argument,
	mark_call_line,
	put_receiver,
	put_value_if_needed,
	Callable,
	Codegen,
	Error,
	ResolvedCall,
	StackValue,
	Type,
	ValueKind,
};
use crate::{
	codegen::{reorder_arguments_if_needed, Capture, FrameMap, Sink},
	symbol::Symbol,
};


/// Hidden parameters whose shape has not been determined yet.
#[derive(Debug)]
pub struct Unprocessed;

/// Hidden parameters with a known shape, ready to be put or bound.
#[derive(Debug)]
pub struct Shaped;

/// Hidden parameters already put on the stack at a call site.
#[derive(Debug)]
pub struct Materialized;


/// A trailing implicit parameter of a closure body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenParam {
	pub name: Symbol,
	pub ty: Type,
}


/// A hidden parameter bound to a local at method entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	pub name: Symbol,
	pub value: StackValue,
}


/// The hidden parameters of a closure body.
/// The same shape is used to put values at call sites and to bind them inside the callee,
/// so both sides agree on the order.
#[derive(Debug)]
pub struct HiddenParams<S> {
	params: Box<[HiddenParam]>,
	state: PhantomData<S>,
}


impl HiddenParams<Unprocessed> {
	/// Start from the values captured by the closure, in capture order.
	pub fn new<E>(captures: &[Capture<E>]) -> Self {
		let params = captures
			.iter()
			.map(|capture| HiddenParam { name: capture.name, ty: capture.ty.clone() })
			.collect();

		Self { params, state: PhantomData }
	}


	/// Determine the shape of the hidden parameters without emitting anything.
	/// A variable captured more than once is passed once, at its first position.
	pub fn process(self) -> HiddenParams<Shaped> {
		let mut params: Vec<HiddenParam> = Vec::with_capacity(self.params.len());

		for param in self.params.into_vec() {
			if !params.iter().any(|seen| seen.name == param.name) {
				params.push(param);
			}
		}

		HiddenParams { params: params.into(), state: PhantomData }
	}
}


impl HiddenParams<Shaped> {
	/// Put the captured values as trailing arguments, the first of which is the parameter
	/// at `first_index`.
	pub fn put<C>(
		self,
		first_index: usize,
		captures: &[Capture<C::Expr>],
		codegen: &mut C,
	) -> Result<HiddenParams<Materialized>, Error>
	where
		C: Codegen + ?Sized,
	{
		for (ix, param) in self.params.iter().enumerate() {
			let capture = captures
				.iter()
				.find(|capture| capture.name == param.name)
				.ok_or_else(|| Error::unknown_local(param.name))?;

			let value = codegen.gen(&capture.source)?;
			put_value_if_needed(value, &param.ty, ValueKind::Captured, first_index + ix, codegen)?;
		}

		Ok(HiddenParams { params: self.params, state: PhantomData })
	}


	/// Bind the hidden parameters sitting on top of the stack to fresh locals.
	/// Used at the entry of the closure body. Bindings are returned in shape order.
	pub fn put_hidden_params_into_locals(
		&self,
		frame: &mut FrameMap,
		sink: &mut dyn Sink,
	) -> Result<Box<[Binding]>, Error> {
		let bindings: Box<[Binding]> = self.params
			.iter()
			.map(
				|param| Binding {
					name: param.name,
					value: StackValue::local(frame.enter(param.name, param.ty.clone()), param.ty.clone()),
				}
			)
			.collect();

		// The last hidden parameter is on top.
		for binding in bindings.iter().rev() {
			let ty = binding.value.ty().clone();
			binding.value.store(StackValue::on_stack(ty), sink)?;
		}

		Ok(bindings)
	}


	/// Append the hidden parameter types to the ordinary parameters.
	pub fn extend_params(&self, base: &[Type]) -> Box<[Type]> {
		base
			.iter()
			.cloned()
			.chain(self.params.iter().map(|param| param.ty.clone()))
			.collect()
	}
}


impl<S> HiddenParams<S> {
	pub fn shape(&self) -> &[HiddenParam] {
		&self.params
	}


	pub fn len(&self) -> usize {
		self.params.len()
	}


	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}


/// Calls to closure bodies: ordinary arguments, then the hidden parameters.
#[derive(Debug)]
pub struct CapturedCall {
	hidden: HiddenParams<Shaped>,
}


impl CapturedCall {
	pub fn new<E>(captures: &[Capture<E>]) -> Self {
		Self { hidden: HiddenParams::new(captures).process() }
	}


	pub fn hidden(&self) -> &HiddenParams<Shaped> {
		&self.hidden
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
		let ordinary = callable.params
			.len()
			.checked_sub(self.hidden.len())
			.ok_or_else(|| Error::shape_mismatch(callable.params.len(), self.hidden.len()))?;

		let (params, hidden_types) = callable.params.split_at(ordinary);
		let shape_matches = hidden_types
			.iter()
			.eq(self.hidden.shape().iter().map(|param| &param.ty));

		if !shape_matches {
			return Err(
				Error::shape_mismatch(callable.params.len(), ordinary + self.hidden.len())
			);
		}

		call.validate(ordinary)?;

		put_receiver(callable, call, codegen)?;

		let actual = call.actual_order();

		for arg in actual.iter() {
			gen_argument(arg.argument, &params[arg.decl_index], arg.decl_index, codegen)?;
		}

		reorder_arguments_if_needed(&actual, params, codegen)?;

		self.hidden.put(ordinary, &call.captures, codegen)?;

		mark_call_line(call.pos, codegen);
		callable.gen_invoke_instruction(codegen.sink());

		Ok(())
	}
}
