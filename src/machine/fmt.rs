use std::fmt::Display as _;

use super::{Invocation, Value};
use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};


impl<'a> Display<'a> for Value {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Null => color::Fg(color::Blue, "null").fmt(f),
			Self::Bool(b) => color::Fg(color::Blue, b).fmt(f),
			Self::Int(i) => i.fmt(f),
			Self::Long(l) => write!(f, "{}L", l),
			Self::Float(n) => write!(f, "{:?}F", n),
			Self::Double(n) => write!(f, "{:?}", n),

			Self::Handle { owner, name } => {
				"&".fmt(f)?;
				symbol::Qualified(*owner, *name).fmt(f, context)
			}

			Self::Boxed(value) => {
				"box(".fmt(f)?;
				value.fmt(f, context)?;
				")".fmt(f)
			}

			Self::Array(ix) => write!(f, "array#{}", ix),

			Self::Field { owner, name } => symbol::Qualified(*owner, *name).fmt(f, context),

			Self::Result(ix) => write!(f, "result#{}", ix),

			Self::Opaque => color::Fg(color::Yellow, "?").fmt(f),
		}
	}
}


impl<'a> Display<'a> for Invocation {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		color::Fg(color::Magenta, "invoke").fmt(f)?;
		color::Fg(color::Magenta, self.dispatch).fmt(f)?;
		" ".fmt(f)?;

		if let Some(receiver) = &self.receiver {
			receiver.fmt(f, context)?;
			" ".fmt(f)?;
		}

		symbol::Qualified(self.owner, self.name).fmt(f, context)?;
		"(".fmt(f)?;
		fmt::Sep(&self.args[..], ", ").fmt(f, context)?;
		")".fmt(f)
	}
}
