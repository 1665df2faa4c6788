use std::fmt::Display as _;

use super::{
	insn::{Entry, Invoke},
	Constant,
	Dispatch,
	Instruction,
	Listing,
	SlotIx,
	Type,
};
use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};


impl std::fmt::Display for SlotIx {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color::Fg(color::Green, '#').fmt(f)?;
		color::Fg(color::Green, self.0).fmt(f)
	}
}


impl std::fmt::Display for Dispatch {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Static => "static",
			Self::Virtual => "virtual",
			Self::Interface => "interface",
			Self::Special => "special",
		}.fmt(f)
	}
}


impl<'a> Display<'a> for Type {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		let primitive = match self {
			Self::Void => "void",
			Self::Bool => "boolean",
			Self::Byte => "byte",
			Self::Char => "char",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
			Self::Handle => "handle",

			Self::Object(class) => return class.fmt(f, context),

			Self::Array(element) => {
				element.fmt(f, context)?;
				return "[]".fmt(f);
			}
		};

		color::Fg(color::Blue, primitive).fmt(f)
	}
}


impl<'a> Display<'a> for Constant {
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
		}
	}
}


impl<'a> Display<'a> for Invoke {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		symbol::Qualified(self.owner, self.name).fmt(f, context)?;
		"(".fmt(f)?;
		fmt::Sep(&self.params[..], ", ").fmt(f, context)?;
		") ".fmt(f)?;
		self.ret.fmt(f, context)
	}
}


fn op(f: &mut std::fmt::Formatter, name: &str) -> std::fmt::Result {
	color::Fg(color::Yellow, name).fmt(f)
}


fn field(
	f: &mut std::fmt::Formatter,
	context: &symbol::Interner,
	name: &str,
	owner: symbol::Symbol,
	field: symbol::Symbol,
	ty: &Type,
) -> std::fmt::Result {
	op(f, name)?;
	" ".fmt(f)?;
	symbol::Qualified(owner, field).fmt(f, context)?;
	" ".fmt(f)?;
	ty.fmt(f, context)
}


impl<'a> Display<'a> for Instruction {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Push(constant) => {
				op(f, "push")?;
				" ".fmt(f)?;
				constant.fmt(f, context)
			}

			Self::Load { slot, ty } => {
				op(f, "load")?;
				write!(f, " {} ", slot)?;
				ty.fmt(f, context)
			}

			Self::Store { slot, ty } => {
				op(f, "store")?;
				write!(f, " {} ", slot)?;
				ty.fmt(f, context)
			}

			Self::GetField { owner, name, ty } => field(f, context, "getfield", *owner, *name, ty),
			Self::PutField { owner, name, ty } => field(f, context, "putfield", *owner, *name, ty),
			Self::GetStatic { owner, name, ty } => field(f, context, "getstatic", *owner, *name, ty),
			Self::PutStatic { owner, name, ty } => field(f, context, "putstatic", *owner, *name, ty),

			Self::Convert { from, to } => {
				op(f, "convert")?;
				" ".fmt(f)?;
				from.fmt(f, context)?;
				" -> ".fmt(f)?;
				to.fmt(f, context)
			}

			Self::Box { from, to } => {
				op(f, "box")?;
				" ".fmt(f)?;
				from.fmt(f, context)?;
				" -> ".fmt(f)?;
				to.fmt(f, context)
			}

			Self::Unbox { from, to } => {
				op(f, "unbox")?;
				" ".fmt(f)?;
				from.fmt(f, context)?;
				" -> ".fmt(f)?;
				to.fmt(f, context)
			}

			Self::CheckCast(ty) => {
				op(f, "checkcast")?;
				" ".fmt(f)?;
				ty.fmt(f, context)
			}

			Self::Pop(ty) => {
				op(f, "pop")?;
				" ".fmt(f)?;
				ty.fmt(f, context)
			}

			Self::Dup => op(f, "dup"),

			Self::Swap => op(f, "swap"),

			Self::NewArray(ty) => {
				op(f, "newarray")?;
				" ".fmt(f)?;
				ty.fmt(f, context)
			}

			Self::ArrayStore(ty) => {
				op(f, "arraystore")?;
				" ".fmt(f)?;
				ty.fmt(f, context)
			}

			Self::Invoke(invoke) => {
				color::Fg(color::Magenta, "invoke").fmt(f)?;
				color::Fg(color::Magenta, invoke.dispatch).fmt(f)?;
				" ".fmt(f)?;
				invoke.fmt(f, context)
			}
		}
	}
}


impl<'a> Display<'a> for Listing {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		for entry in self.entries() {
			match entry {
				Entry::Line(line) => writeln!(f, "{} {}", color::Fg(color::Cyan, "line"), line)?,

				Entry::Instruction(instruction) => {
					"\t".fmt(f)?;
					instruction.fmt(f, context)?;
					"\n".fmt(f)?;
				}
			}
		}

		Ok(())
	}
}
