mod fmt;

use super::Type;
use crate::{source::SourcePos, symbol::Symbol};


/// The kind of internal compiler error.
/// All of these indicate a bug in the driver or in resolution, never a user error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
	/// Store into a handle that has no persistent location.
	StoreToTransient,
	/// No conversion between the given types.
	InvalidCoercion { from: Type, to: Type },
	/// Store of a two-slot value into an instance field.
	WideFieldStore,
	/// A vararg parameter whose declared type is not an array.
	NotAnArray(Type),
	/// A receiver missing for an instance dispatch, or supplied for a static one.
	ReceiverMismatch,
	/// A declared index that is out of range or duplicated.
	InvalidArgumentIndex { index: usize, params: usize },
	/// A declared parameter that no argument fills.
	MissingArgument(usize),
	/// A slot mark dropped out of order, or left alive.
	UnbalancedMark,
	/// The number of values supplied differs from the descriptor's parameter list.
	ShapeMismatch { expected: usize, found: usize },
	/// A default-forwarding call to a descriptor without a default target.
	MissingDefaultTarget,
	/// A call shape that no strategy models.
	UnsupportedCallShape,
	/// A reference to a local that is not in scope.
	UnknownLocal(Symbol),
}


/// An internal compiler error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
	pub kind: ErrorKind,
	/// The call site being emitted, when known.
	pub pos: Option<SourcePos>,
}


impl Error {
	/// Store into a handle that has no persistent location.
	pub fn store_to_transient() -> Self {
		ErrorKind::StoreToTransient.into()
	}


	/// No conversion between the given types.
	pub fn invalid_coercion(from: Type, to: Type) -> Self {
		ErrorKind::InvalidCoercion { from, to }.into()
	}


	/// Store of a two-slot value into an instance field.
	pub fn wide_field_store() -> Self {
		ErrorKind::WideFieldStore.into()
	}


	/// A vararg parameter whose declared type is not an array.
	pub fn not_an_array(ty: Type) -> Self {
		ErrorKind::NotAnArray(ty).into()
	}


	/// A receiver missing for an instance dispatch, or supplied for a static one.
	pub fn receiver_mismatch() -> Self {
		ErrorKind::ReceiverMismatch.into()
	}


	/// A declared index that is out of range or duplicated.
	pub fn invalid_argument_index(index: usize, params: usize) -> Self {
		ErrorKind::InvalidArgumentIndex { index, params }.into()
	}


	/// A declared parameter that no argument fills.
	pub fn missing_argument(index: usize) -> Self {
		ErrorKind::MissingArgument(index).into()
	}


	/// A slot mark dropped out of order, or left alive.
	pub fn unbalanced_mark() -> Self {
		ErrorKind::UnbalancedMark.into()
	}


	/// The number of values supplied differs from the descriptor's parameter list.
	pub fn shape_mismatch(expected: usize, found: usize) -> Self {
		ErrorKind::ShapeMismatch { expected, found }.into()
	}


	/// A default-forwarding call to a descriptor without a default target.
	pub fn missing_default_target() -> Self {
		ErrorKind::MissingDefaultTarget.into()
	}


	/// A call shape that no strategy models.
	pub fn unsupported_call_shape() -> Self {
		ErrorKind::UnsupportedCallShape.into()
	}


	/// A reference to a local that is not in scope.
	pub fn unknown_local(symbol: Symbol) -> Self {
		ErrorKind::UnknownLocal(symbol).into()
	}


	/// Attach the call site position, unless a nested call already did.
	pub fn at(mut self, pos: Option<SourcePos>) -> Self {
		if self.pos.is_none() {
			self.pos = pos;
		}
		self
	}
}


impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Self {
		Self { kind, pos: None }
	}
}


impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "internal compiler error: {:?}", self.kind)?;

		if let Some(pos) = self.pos {
			write!(f, " at {}", pos)?;
		}

		Ok(())
	}
}


impl std::error::Error for Error { }
