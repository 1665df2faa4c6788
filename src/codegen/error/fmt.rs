use std::fmt::Display as _;

use super::{Error, ErrorKind};
use crate::{
	fmt::Display,
	symbol,
	term::color,
};


impl<'a> Display<'a> for ErrorKind {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::StoreToTransient => "store into a value without location".fmt(f),

			Self::InvalidCoercion { from, to } => {
				"invalid coercion from ".fmt(f)?;
				from.fmt(f, context)?;
				" to ".fmt(f)?;
				to.fmt(f, context)
			}

			Self::WideFieldStore => "store of a two-slot value into an instance field".fmt(f),

			Self::NotAnArray(ty) => {
				"vararg parameter of non-array type ".fmt(f)?;
				ty.fmt(f, context)
			}

			Self::ReceiverMismatch => "receiver does not match the dispatch".fmt(f),

			Self::InvalidArgumentIndex { index, params } => write!(
				f,
				"invalid declared index {} for {} parameters",
				index,
				params
			),

			Self::MissingArgument(index) => write!(f, "no argument for parameter {}", index),

			Self::UnbalancedMark => "unbalanced slot mark".fmt(f),

			Self::ShapeMismatch { expected, found } => write!(
				f,
				"descriptor expects {} parameters, call supplies {}",
				expected,
				found
			),

			Self::MissingDefaultTarget => "callee has no default-forwarding target".fmt(f),

			Self::UnsupportedCallShape => "unsupported call shape".fmt(f),

			Self::UnknownLocal(symbol) => {
				"unknown local '".fmt(f)?;
				symbol.fmt(f, context)?;
				"'".fmt(f)
			}
		}
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		color::Fg(color::Red, "Internal error").fmt(f)?;

		if let Some(pos) = self.pos {
			write!(f, " ({})", pos)?;
		}

		": ".fmt(f)?;
		self.kind.fmt(f, context)
	}
}
