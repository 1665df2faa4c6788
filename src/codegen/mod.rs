//! Call emission for the stack machine.
//!
//! Given a resolved call and the descriptor of its target, the emitter evaluates every
//! argument in source order and leaves the stack in declared order right before the
//! invocation. Omitted parameters are forwarded to a synthesized default target, and
//! closure bodies receive their captured values as trailing hidden parameters.

mod callable;
mod call;
mod error;
mod frame;
mod generator;
mod kind;
mod reorder;
mod ty;
mod value;
pub mod fmt;
pub mod insn;

use crate::source::SourcePos;
pub use call::{
	Argument,
	ArgumentAndDeclIndex,
	Capture,
	DefaultValue,
	EmissionMode,
	ResolvedArgument,
	ResolvedCall,
};
pub use callable::{Callable, DefaultTarget, Dispatch};
pub use error::{Error, ErrorKind};
pub use frame::{FrameMap, Mark, SlotIx};
pub use generator::{
	emit,
	Binding,
	CallGenerator,
	CapturedCall,
	DefaultCall,
	DirectCall,
	HiddenParam,
	HiddenParams,
	Materialized,
	Shaped,
	Unprocessed,
};
pub use insn::{Constant, Instruction, LineRecorder, Listing, Sink};
pub use kind::ValueKind;
pub use reorder::reorder_arguments_if_needed;
pub use ty::Type;
pub use value::{coerce, StackValue};


/// The expression evaluation collaborator.
/// Call emission delegates every sub-expression to it, and it may in turn emit nested
/// calls through `emit`.
pub trait Codegen {
	/// The expressions this evaluator understands.
	type Expr;

	/// Emit the code for the expression, returning a handle to its value.
	/// The value is not necessarily on the stack yet.
	fn gen(&mut self, expr: &Self::Expr) -> Result<StackValue, Error>;

	/// The slot allocator of the method being emitted.
	fn frame(&mut self) -> &mut FrameMap;

	/// The instruction sink of the method being emitted.
	fn sink(&mut self) -> &mut dyn Sink;

	/// Associate the next instructions with the given position.
	fn mark_start_line_number(&mut self, pos: SourcePos);

	/// The most recently marked line.
	fn last_line(&self) -> Option<u32>;
}
