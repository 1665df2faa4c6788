//! The reference driver: a tiny expression language, and the evaluator that emits it.
//!
//! The evaluator is the expression codegen collaborator of the call emitter. Nested calls
//! re-enter `codegen::emit`.

mod error;
pub mod model;
#[cfg(test)]
mod tests;

use crate::{
	codegen::{
		self,
		Callable,
		Codegen,
		Constant,
		FrameMap,
		LineRecorder,
		Listing,
		ResolvedCall,
		Sink,
		SlotIx,
		StackValue,
		Type,
	},
	source::{Source, SourcePos},
	symbol::{Interner, Symbol},
};
pub use error::{Error, InFile};


/// An expression of the driver language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	Int(i32),
	Long(i64),
	Double(f64),
	Bool(bool),
	Null(Type),
	Local(Symbol),
	/// A field read. Static fields have no receiver.
	Field {
		owner: Symbol,
		name: Symbol,
		ty: Type,
		receiver: Option<Box<Expr>>,
	},
	Call(Box<CallSite>),
}


/// A resolved call along with its target.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
	pub callable: Callable,
	pub call: ResolvedCall<Expr>,
}


/// A lowered model file: the locals in scope and the call statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
	pub locals: Vec<(Symbol, Type)>,
	pub calls: Vec<CallSite>,
}


/// Load and lower a model file.
pub fn load(source: &Source, interner: &mut Interner) -> Result<Program, Error> {
	let model: model::Model = serde_json::from_slice(&source.contents)?;
	model.lower(interner)
}


/// The expression evaluator, emitting into a listing.
#[derive(Debug, Default)]
pub struct Evaluator {
	frame: FrameMap,
	listing: Listing,
	/// Slots of the locals in scope, in declaration order.
	locals: Vec<(SlotIx, Type)>,
}


impl Evaluator {
	/// Create an evaluator with the given locals in scope.
	pub fn new(locals: &[(Symbol, Type)]) -> Self {
		let mut frame = FrameMap::new();

		let locals = locals
			.iter()
			.map(|(name, ty)| (frame.enter(*name, ty.clone()), ty.clone()))
			.collect();

		Self {
			frame,
			listing: Listing::new(),
			locals,
		}
	}


	/// Emit every call of the program as a statement.
	pub fn emit_program(&mut self, program: &Program) -> Result<(), codegen::Error> {
		for site in &program.calls {
			self.emit_statement(site)?;
		}

		Ok(())
	}


	/// Emit a call as a statement, discarding its result.
	pub fn emit_statement(&mut self, site: &CallSite) -> Result<(), codegen::Error> {
		codegen::emit(&site.callable, &site.call, self)?;

		StackValue
			::on_stack(site.callable.ret.clone())
			.put(&Type::Void, &mut self.listing)
			.map_err(|error| error.at(site.call.pos))
	}


	pub fn listing(&self) -> &Listing {
		&self.listing
	}


	/// The slots of the locals in scope, in declaration order.
	pub fn locals(&self) -> &[(SlotIx, Type)] {
		&self.locals
	}


	/// The amount of slots the emitted code needs.
	pub fn max_slots(&self) -> u32 {
		self.frame.max_slots()
	}
}


impl Codegen for Evaluator {
	type Expr = Expr;

	fn gen(&mut self, expr: &Expr) -> Result<StackValue, codegen::Error> {
		match expr {
			Expr::Int(int) => Ok(StackValue::int(*int)),
			Expr::Long(long) => Ok(StackValue::long(*long)),
			Expr::Double(double) => Ok(StackValue::constant(Constant::Double(*double), Type::Double)),
			Expr::Bool(b) => Ok(StackValue::constant(Constant::Bool(*b), Type::Bool)),
			Expr::Null(ty) => Ok(StackValue::null(ty.clone())),

			Expr::Local(name) => self.frame
				.lookup(*name)
				.map(|(slot, ty)| StackValue::local(slot, ty.clone()))
				.ok_or_else(|| codegen::Error::unknown_local(*name)),

			Expr::Field { owner, name, ty, receiver } => {
				let receiver = match receiver {
					Some(receiver) => Some(self.gen(receiver)?),
					None => None,
				};

				Ok(StackValue::field(*owner, *name, ty.clone(), receiver))
			}

			Expr::Call(site) => {
				codegen::emit(&site.callable, &site.call, self)?;
				Ok(StackValue::on_stack(site.callable.ret.clone()))
			}
		}
	}


	fn frame(&mut self) -> &mut FrameMap {
		&mut self.frame
	}


	fn sink(&mut self) -> &mut dyn Sink {
		&mut self.listing
	}


	fn mark_start_line_number(&mut self, pos: SourcePos) {
		self.listing.mark_line(pos)
	}


	fn last_line(&self) -> Option<u32> {
		LineRecorder::last_line(&self.listing)
	}
}
