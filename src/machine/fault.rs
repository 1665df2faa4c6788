use std::fmt::Display as _;

use crate::{
	codegen::{SlotIx, Type},
	fmt::Display,
	symbol,
	term::color,
};


/// A fault while running a listing. Faults indicate miscompiled call sites.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
	StackOverflow,
	StackUnderflow,
	TypeMismatch {
		expected: Type,
		found: Type,
	},
	UninitializedLocal(SlotIx),
	InvalidConversion {
		from: Type,
		to: Type,
	},
	/// Array instruction on a non-array operand.
	NotAnArray,
	/// Operands left on the stack after a complete call site.
	UnbalancedStack(usize),
}


impl Fault {
	pub fn type_mismatch(expected: Type, found: Type) -> Self {
		Self::TypeMismatch { expected, found }
	}


	pub fn invalid_conversion(from: Type, to: Type) -> Self {
		Self::InvalidConversion { from, to }
	}
}


impl<'a> Display<'a> for Fault {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		color::Fg(color::Red, "Fault").fmt(f)?;
		": ".fmt(f)?;

		match self {
			Self::StackOverflow => "stack overflow".fmt(f),

			Self::StackUnderflow => "stack underflow".fmt(f),

			Self::TypeMismatch { expected, found } => {
				"expected ".fmt(f)?;
				expected.fmt(f, context)?;
				", found ".fmt(f)?;
				found.fmt(f, context)
			}

			Self::UninitializedLocal(slot_ix) => write!(f, "uninitialized local {}", slot_ix),

			Self::InvalidConversion { from, to } => {
				"invalid conversion from ".fmt(f)?;
				from.fmt(f, context)?;
				" to ".fmt(f)?;
				to.fmt(f, context)
			}

			Self::NotAnArray => "array instruction on non-array operand".fmt(f),

			Self::UnbalancedStack(count) => write!(f, "{} operands left on the stack", count),
		}
	}
}


impl std::fmt::Display for Fault {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:?}", self)
	}
}


impl std::error::Error for Fault { }
