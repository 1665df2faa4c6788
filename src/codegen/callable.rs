use super::{
	insn::{Instruction, Invoke},
	Error,
	Sink,
	Type,
};
use crate::symbol::Symbol;


/// How the machine selects the method body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dispatch {
	Static,
	Virtual,
	Interface,
	/// Non-virtual instance call, such as private methods or constructors.
	Special,
}


impl Dispatch {
	/// Whether the dispatch takes a receiver below the arguments.
	pub fn has_receiver(self) -> bool {
		self != Self::Static
	}
}


/// The synthesized entry point that computes omitted parameters.
/// Its parameters are the original ones, followed by the mask words, the method handles
/// and the captured values of default lambdas. It is always dispatched statically, taking
/// the receiver of the original method as an explicit leading parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTarget {
	pub name: Symbol,
	pub params: Box<[Type]>,
}


/// A static description of an invocation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
	pub owner: Symbol,
	pub name: Symbol,
	pub dispatch: Dispatch,
	pub params: Box<[Type]>,
	pub ret: Type,
	pub default: Option<DefaultTarget>,
}


impl Callable {
	/// The type of the receiver, if the dispatch takes one.
	pub fn receiver(&self) -> Option<Type> {
		if self.dispatch.has_receiver() {
			Some(Type::Object(self.owner))
		} else {
			None
		}
	}


	/// Emit the invocation of this callable.
	pub fn gen_invoke_instruction(&self, sink: &mut dyn Sink) {
		sink.emit(
			Instruction::Invoke(
				Invoke {
					dispatch: self.dispatch,
					owner: self.owner,
					name: self.name,
					params: self.params.clone(),
					ret: self.ret.clone(),
				}
			)
		)
	}


	/// Emit the invocation of the default-forwarding target.
	pub fn gen_invoke_default_instruction(&self, sink: &mut dyn Sink) -> Result<(), Error> {
		let target = self.default
			.as_ref()
			.ok_or_else(Error::missing_default_target)?;

		let params = self
			.receiver()
			.into_iter()
			.chain(target.params.iter().cloned())
			.collect();

		sink.emit(
			Instruction::Invoke(
				Invoke {
					dispatch: Dispatch::Static,
					owner: self.owner,
					name: target.name,
					params,
					ret: self.ret.clone(),
				}
			)
		);

		Ok(())
	}
}
