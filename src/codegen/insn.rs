use super::{Dispatch, SlotIx, Type};
use crate::{source::SourcePos, symbol::Symbol};


/// Constants that may be pushed directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
	Null,
	Bool(bool),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	/// A reference to a method, resolved by the loader.
	Handle { owner: Symbol, name: Symbol },
}


/// An invocation target, as encoded in the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoke {
	pub dispatch: Dispatch,
	pub owner: Symbol,
	pub name: Symbol,
	/// Parameter types, excluding the receiver of non-static dispatches.
	pub params: Box<[Type]>,
	pub ret: Type,
}


/// The stack machine instruction set.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
	Push(Constant),
	Load { slot: SlotIx, ty: Type },
	Store { slot: SlotIx, ty: Type },
	/// Pops the receiver.
	GetField { owner: Symbol, name: Symbol, ty: Type },
	/// Pops the value, then the receiver.
	PutField { owner: Symbol, name: Symbol, ty: Type },
	GetStatic { owner: Symbol, name: Symbol, ty: Type },
	PutStatic { owner: Symbol, name: Symbol, ty: Type },
	Convert { from: Type, to: Type },
	Box { from: Type, to: Type },
	Unbox { from: Type, to: Type },
	CheckCast(Type),
	Pop(Type),
	Dup,
	Swap,
	/// Pops the length, pushes an array of the given element type.
	NewArray(Type),
	/// Pops the value, the index and the array.
	ArrayStore(Type),
	Invoke(Invoke),
}


impl Instruction {
	/// Whether this is an invocation instruction.
	pub fn is_invoke(&self) -> bool {
		matches!(self, Self::Invoke(_))
	}
}


/// Receives instructions in emission order.
/// The order of calls is exactly the order of the emitted instructions.
pub trait Sink {
	fn emit(&mut self, instruction: Instruction);
}


/// Associates source lines with the next emitted instructions.
pub trait LineRecorder {
	fn mark_line(&mut self, pos: SourcePos);

	/// The most recently recorded line, if any.
	fn last_line(&self) -> Option<u32>;
}


/// An entry in a listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
	Line(u32),
	Instruction(Instruction),
}


/// A recording sink, keeping line markers interleaved with instructions.
#[derive(Debug, Default)]
pub struct Listing {
	entries: Vec<Entry>,
	last_line: Option<u32>,
}


impl Listing {
	pub fn new() -> Self {
		Self::default()
	}


	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}


	/// The instructions, without line markers.
	pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
		self.entries
			.iter()
			.filter_map(
				|entry| match entry {
					Entry::Instruction(instruction) => Some(instruction),
					Entry::Line(_) => None,
				}
			)
	}


	/// How many invocation instructions were emitted.
	pub fn invocations(&self) -> usize {
		self.instructions()
			.filter(|instruction| instruction.is_invoke())
			.count()
	}


	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}


impl Sink for Listing {
	fn emit(&mut self, instruction: Instruction) {
		self.entries.push(Entry::Instruction(instruction));
	}
}


impl LineRecorder for Listing {
	fn mark_line(&mut self, pos: SourcePos) {
		// Consecutive markers for the same line are redundant.
		if self.last_line != Some(pos.line) {
			self.entries.push(Entry::Line(pos.line));
			self.last_line = Some(pos.line);
		}
	}


	fn last_line(&self) -> Option<u32> {
		self.last_line
	}
}
