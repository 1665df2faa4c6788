use super::{Error, Type};
use crate::{source::SourcePos, symbol::Symbol};


/// A value from an enclosing scope, passed as an implicit parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture<E> {
	pub name: Symbol,
	pub ty: Type,
	/// Where to load the value from, in the caller's scope.
	pub source: E,
}


/// How an omitted parameter gets its value in the default-forwarding target.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue<E> {
	/// The target computes the default by itself.
	Placeholder,
	/// The target recomputes the default through the given function of the callee's owner.
	Deferred(Symbol),
	/// The default is a closure, whose captured values must be passed along.
	Lambda(Box<[Capture<E>]>),
}


/// What fills a declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument<E> {
	Expr(E),
	/// Spread arguments, collected into an array. Empty when the vararg parameter was not
	/// supplied and has no default.
	Vararg(Box<[E]>),
	Omitted(DefaultValue<E>),
}


impl<E> Argument<E> {
	pub fn is_omitted(&self) -> bool {
		matches!(self, Self::Omitted(_))
	}
}


/// An argument paired with the index of the parameter it fills.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument<E> {
	pub decl_index: usize,
	pub argument: Argument<E>,
}


/// An argument in evaluation order, with its declared position.
/// The actual position is the index in the containing list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArgumentAndDeclIndex<A> {
	pub argument: A,
	pub decl_index: usize,
}


/// The emission mode a resolved call requires.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmissionMode {
	Direct,
	DefaultForwarding,
	CapturedThreading,
}


/// A call after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall<E> {
	/// The position of the callee expression.
	pub pos: Option<SourcePos>,
	pub receiver: Option<E>,
	/// Arguments in source order. Omitted parameters may appear anywhere.
	pub arguments: Vec<ResolvedArgument<E>>,
	/// Values captured by the callee, when it is a closure body.
	pub captures: Vec<Capture<E>>,
}


impl<E> ResolvedCall<E> {
	pub fn new(pos: Option<SourcePos>) -> Self {
		Self {
			pos,
			receiver: None,
			arguments: Vec::new(),
			captures: Vec::new(),
		}
	}


	/// Add an argument, in source order.
	pub fn arg(mut self, decl_index: usize, expr: E) -> Self {
		self.arguments.push(ResolvedArgument { decl_index, argument: Argument::Expr(expr) });
		self
	}


	/// Add a vararg argument, in source order.
	pub fn vararg(mut self, decl_index: usize, exprs: Vec<E>) -> Self {
		self.arguments.push(
			ResolvedArgument { decl_index, argument: Argument::Vararg(exprs.into()) }
		);
		self
	}


	/// Mark a parameter as omitted.
	pub fn omit(mut self, decl_index: usize, default: DefaultValue<E>) -> Self {
		self.arguments.push(ResolvedArgument { decl_index, argument: Argument::Omitted(default) });
		self
	}


	pub fn receiver(mut self, receiver: E) -> Self {
		self.receiver = Some(receiver);
		self
	}


	pub fn capture(mut self, capture: Capture<E>) -> Self {
		self.captures.push(capture);
		self
	}


	/// Select the emission mode for this call.
	pub fn mode(&self) -> Result<EmissionMode, Error> {
		let defaults = self.arguments
			.iter()
			.any(|arg| arg.argument.is_omitted());

		match (defaults, self.captures.is_empty()) {
			(false, true) => Ok(EmissionMode::Direct),
			(true, true) => Ok(EmissionMode::DefaultForwarding),
			(false, false) => Ok(EmissionMode::CapturedThreading),
			(true, false) => Err(Error::unsupported_call_shape()),
		}
	}


	/// Check that the declared indices cover the parameter range exactly.
	pub fn validate(&self, params: usize) -> Result<(), Error> {
		let mut seen = vec![false; params];

		for arg in &self.arguments {
			match seen.get_mut(arg.decl_index) {
				Some(seen) if !*seen => *seen = true,
				_ => return Err(Error::invalid_argument_index(arg.decl_index, params)),
			}
		}

		match seen.iter().position(|seen| !seen) {
			Some(missing) => Err(Error::missing_argument(missing)),
			None => Ok(()),
		}
	}


	/// The arguments in evaluation order.
	/// Supplied arguments keep their source order. Omitted parameters have no side effects,
	/// and are inserted at their declared index.
	pub fn actual_order(&self) -> Vec<ArgumentAndDeclIndex<&Argument<E>>> {
		let mut actual: Vec<_> = self.arguments
			.iter()
			.filter(|arg| !arg.argument.is_omitted())
			.map(
				|arg| ArgumentAndDeclIndex { argument: &arg.argument, decl_index: arg.decl_index }
			)
			.collect();

		let mut omitted: Vec<_> = self.arguments
			.iter()
			.filter(|arg| arg.argument.is_omitted())
			.collect();
		omitted.sort_by_key(|arg| arg.decl_index);

		for arg in omitted {
			let position = arg.decl_index.min(actual.len());
			actual.insert(
				position,
				ArgumentAndDeclIndex { argument: &arg.argument, decl_index: arg.decl_index }
			);
		}

		actual
	}
}
