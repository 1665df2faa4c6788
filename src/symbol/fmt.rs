use std::fmt::Display as _;

use super::{Interner, Symbol};
use crate::{
	fmt::Display,
	term::color,
};


/// Displayed in place of the dummy symbol.
pub const INVALID: &str = "<invalid>";


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		match context.resolve(*self) {
			Some(ident) if *self != Self::default() => color::Fg(color::Green, ident).fmt(f),
			_ => color::Fg(color::Red, INVALID).fmt(f),
		}
	}
}


/// A member name qualified by its owner, such as `Foo.bar`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Qualified(pub Symbol, pub Symbol);


impl<'a> Display<'a> for Qualified {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		self.0.fmt(f, context)?;
		".".fmt(f)?;
		self.1.fmt(f, context)
	}
}
