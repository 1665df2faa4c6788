use std::fmt::{self, Display};

use super::Operand;
use crate::codegen::SlotIx;


/// A local slot.
#[derive(Debug, Clone)]
enum Slot {
	/// Never stored into.
	Empty,
	/// Holds an operand.
	Value(Operand),
	/// The upper half of a two-slot value.
	Top,
}


impl Default for Slot {
	fn default() -> Self {
		Self::Empty
	}
}


/// The local slots of the running frame.
#[derive(Debug, Default)]
pub struct Locals {
	slots: Vec<Slot>,
}


impl Locals {
	/// Fetch the operand stored in a slot.
	/// Returns None if the slot holds no value, or only its upper half.
	pub fn fetch(&self, slot_ix: SlotIx) -> Option<Operand> {
		match self.slots.get(slot_ix.0 as usize) {
			Some(Slot::Value(operand)) => Some(operand.clone()),
			_ => None,
		}
	}


	/// Store an operand in a slot, growing the frame if needed.
	pub fn store(&mut self, slot_ix: SlotIx, operand: Operand) {
		let ix = slot_ix.0 as usize;
		let size = operand.ty.size() as usize;

		if size == 0 {
			return;
		}

		if self.slots.len() < ix + size {
			self.slots.resize_with(ix + size, Slot::default);
		}

		// Overwriting the upper half of a wide value invalidates it.
		if ix > 0 && matches!(self.slots[ix], Slot::Top) {
			self.slots[ix - 1] = Slot::Empty;
		}

		self.slots[ix] = Slot::Value(operand);

		if size == 2 {
			self.slots[ix + 1] = Slot::Top;
		}
	}
}


/// The operand stack.
pub struct Stack {
	/// The operands, top last.
	operands: Vec<Operand>,
	/// The maximum allowed size for the stack.
	max_size: usize,
}


impl Stack {
	/// Create a new stack with the given maximum size.
	pub fn new(max_size: usize) -> Self {
		Self {
			operands: Vec::new(),
			max_size,
		}
	}


	/// Push an operand.
	/// Returns StackOverflow if the size exceeds the maximum size.
	pub fn push(&mut self, operand: Operand) -> Result<(), StackOverflow> {
		if self.len() >= self.max_size {
			Err(StackOverflow)
		} else {
			self.operands.push(operand);
			Ok(())
		}
	}


	/// Pop the top operand.
	pub fn pop(&mut self) -> Option<Operand> {
		self.operands.pop()
	}


	/// The top operand.
	pub fn peek(&self) -> Option<&Operand> {
		self.operands.last()
	}


	/// The operands, bottom first.
	pub fn operands(&self) -> &[Operand] {
		&self.operands
	}


	/// Check if the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.operands.is_empty()
	}


	/// Get the stack length.
	pub fn len(&self) -> usize {
		self.operands.len()
	}
}


impl Default for Stack {
	fn default() -> Self {
		/// The default operand stack size for verified listings.
		const STACK_SIZE: usize = 1024;

		Self::new(STACK_SIZE)
	}
}


impl std::fmt::Debug for Stack {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (ix, operand) in self.operands.iter().rev().enumerate() {
			writeln!(f, "{}: {:?}", ix, operand.value)?;
		}

		Ok(())
	}
}


/// Stack overflow error.
#[derive(Debug)]
pub struct StackOverflow;


impl Display for StackOverflow {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "stack overflow")
	}
}


impl std::error::Error for StackOverflow { }
