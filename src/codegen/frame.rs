use super::{Error, Type};
use crate::symbol::Symbol;


/// The index of a local slot in the activation record.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SlotIx(pub u32);


impl SlotIx {
	/// Advance the index by the given amount of slots, returning the previous index.
	fn bump(&mut self, size: u32) -> SlotIx {
		let previous = *self;
		self.0 += size;
		previous
	}
}


/// A live slot in the frame.
#[derive(Debug)]
struct Slot {
	ix: SlotIx,
	ty: Type,
	/// Temporaries have no name.
	name: Option<Symbol>,
}


/// A scope token, produced by `FrameMap::mark` and consumed by `FrameMap::drop_to`.
/// Not copyable, so that each mark is dropped at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a mark must be dropped with FrameMap::drop_to"]
pub struct Mark {
	generation: u32,
	/// The amount of live slots when the mark was taken.
	live: usize,
	/// The watermark when the mark was taken.
	top: SlotIx,
}


/// Local slot allocator for a single method frame.
/// Slots are allocated and released in strict nested order.
#[derive(Debug, Default)]
pub struct FrameMap {
	/// Live slots, in allocation order.
	slots: Vec<Slot>,
	/// The next free slot.
	top: SlotIx,
	/// The highest watermark ever reached.
	max: SlotIx,
	/// Generations of the live marks, innermost last.
	marks: Vec<u32>,
	generation: u32,
}


impl FrameMap {
	pub fn new() -> Self {
		Self::default()
	}


	/// Allocate a named local.
	pub fn enter(&mut self, name: Symbol, ty: Type) -> SlotIx {
		self.alloc(Some(name), ty)
	}


	/// Allocate an anonymous temporary.
	pub fn enter_temp(&mut self, ty: Type) -> SlotIx {
		self.alloc(None, ty)
	}


	fn alloc(&mut self, name: Option<Symbol>, ty: Type) -> SlotIx {
		let ix = self.top.bump(ty.size());
		self.max = self.max.max(self.top);
		self.slots.push(Slot { ix, ty, name });
		ix
	}


	/// Find the innermost live local with the given name.
	pub fn lookup(&self, name: Symbol) -> Option<(SlotIx, &Type)> {
		self.slots
			.iter()
			.rev()
			.find(|slot| slot.name == Some(name))
			.map(|slot| (slot.ix, &slot.ty))
	}


	/// Capture the current watermark.
	pub fn mark(&mut self) -> Mark {
		self.generation += 1;
		self.marks.push(self.generation);

		Mark {
			generation: self.generation,
			live: self.slots.len(),
			top: self.top,
		}
	}


	/// Release every slot allocated since the mark.
	/// The mark must be the innermost live one.
	pub fn drop_to(&mut self, mark: Mark) -> Result<(), Error> {
		match self.marks.last() {
			Some(&generation) if generation == mark.generation => {
				self.marks.pop();
				self.slots.truncate(mark.live);
				self.top = mark.top;
				Ok(())
			}

			_ => Err(Error::unbalanced_mark()),
		}
	}


	/// The next free slot.
	pub fn watermark(&self) -> SlotIx {
		self.top
	}


	/// The amount of slots the frame needs, considering every allocation so far.
	pub fn max_slots(&self) -> u32 {
		self.max.0
	}


	/// How many marks are alive.
	pub fn depth(&self) -> usize {
		self.marks.len()
	}
}
