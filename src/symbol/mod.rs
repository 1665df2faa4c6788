mod fmt;

use intaglio::{Symbol as SymbolInner, SymbolTable};
pub use fmt::Qualified;


/// A symbol is a reference to a name stored in the symbol interner.
/// Class names, method names, fields and locals are all symbols.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Symbol(SymbolInner);


/// The default symbol is a dummy symbol. It resolves to "<invalid symbol>", and is
/// displayed as "<invalid>".
impl Default for Symbol {
	fn default() -> Self {
		Self(SymbolInner::new(0))
	}
}


/// A symbol interner, used to store class, method and variable names.
#[derive(Debug)]
pub struct Interner(SymbolTable);


impl Interner {
	/// Create a new interner. Please note that this allocates memory even if no symbols are
	/// inserted.
	pub fn new() -> Self {
		let mut interner = SymbolTable::new();
		interner
			.intern("<invalid symbol>")
			.expect("failed to intern symbol");
		Self(interner)
	}


	/// Get the symbol for a name, if it has been interned.
	pub fn get<T>(&self, value: T) -> Option<Symbol>
	where
		T: AsRef<str>,
	{
		self.0
			.check_interned(value.as_ref())
			.map(Symbol)
	}


	/// Get the symbol for a name. The name is interned if needed.
	pub fn get_or_intern<T>(&mut self, value: T) -> Symbol
	where
		T: AsRef<str>,
	{
		if let Some(symbol) = self.get(value.as_ref()) {
			return symbol;
		}

		let value = value.as_ref().to_owned();

		Symbol(
			self.0
				.intern(value)
				.expect("failed to intern symbol")
		)
	}


	/// Resolve the string for a symbol.
	pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
		self.0.get(symbol.0)
	}


	/// Get the number of interned strings.
	/// This does not include the dummy symbol.
	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.0.len() - 1
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}
