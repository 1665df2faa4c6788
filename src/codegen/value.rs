use super::{
	insn::{Constant, Instruction},
	Error,
	Sink,
	SlotIx,
	Type,
};
use crate::symbol::Symbol;


/// A value that can be produced onto the stack, or stored from the stack.
/// Putting a value consumes the handle, so that it is produced only once.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
	/// A value already sitting on top of the stack.
	OnStack(Type),
	/// A value held in a local slot.
	Local { slot: SlotIx, ty: Type },
	/// A constant, pushed as the given type.
	Constant { value: Constant, ty: Type },
	/// A field. Static fields have no receiver. Captured values are fields of the closure
	/// object.
	Field {
		owner: Symbol,
		name: Symbol,
		ty: Type,
		receiver: Option<Box<StackValue>>,
	},
}


impl StackValue {
	pub fn on_stack(ty: Type) -> Self {
		Self::OnStack(ty)
	}


	pub fn local(slot: SlotIx, ty: Type) -> Self {
		Self::Local { slot, ty }
	}


	pub fn constant(value: Constant, ty: Type) -> Self {
		Self::Constant { value, ty }
	}


	pub fn int(int: i32) -> Self {
		Self::constant(Constant::Int(int), Type::Int)
	}


	pub fn long(long: i64) -> Self {
		Self::constant(Constant::Long(long), Type::Long)
	}


	pub fn null(ty: Type) -> Self {
		Self::constant(Constant::Null, ty)
	}


	/// A method handle constant.
	pub fn handle(owner: Symbol, name: Symbol) -> Self {
		Self::constant(Constant::Handle { owner, name }, Type::Handle)
	}


	/// The zero value of the given type, used as placeholder for omitted parameters.
	pub fn zero(ty: Type) -> Self {
		let value = match ty {
			Type::Bool => Constant::Bool(false),
			Type::Byte | Type::Char | Type::Short | Type::Int => Constant::Int(0),
			Type::Long => Constant::Long(0),
			Type::Float => Constant::Float(0.0),
			Type::Double => Constant::Double(0.0),
			Type::Void | Type::Object(_) | Type::Array(_) | Type::Handle => Constant::Null,
		};

		Self::constant(value, ty)
	}


	/// A field of the given receiver, or a static field if there is no receiver.
	pub fn field(owner: Symbol, name: Symbol, ty: Type, receiver: Option<StackValue>) -> Self {
		Self::Field {
			owner,
			name,
			ty,
			receiver: receiver.map(Box::new),
		}
	}


	/// The type of the value before any conversion.
	pub fn ty(&self) -> &Type {
		match self {
			Self::OnStack(ty) => ty,
			Self::Local { ty, .. } => ty,
			Self::Constant { ty, .. } => ty,
			Self::Field { ty, .. } => ty,
		}
	}


	/// Produce the value onto the stack, converted to the target type.
	/// Putting as void discards the value.
	pub fn put(self, target: &Type, sink: &mut dyn Sink) -> Result<(), Error> {
		match self {
			Self::OnStack(ty) => coerce(&ty, target, sink),

			Self::Local { slot, ty } => {
				if *target == Type::Void {
					return Ok(());
				}

				sink.emit(Instruction::Load { slot, ty: ty.clone() });
				coerce(&ty, target, sink)
			}

			Self::Constant { value, ty } => {
				if *target == Type::Void {
					return Ok(());
				}

				sink.emit(Instruction::Push(value));
				coerce(&ty, target, sink)
			}

			Self::Field { owner, name, ty, receiver } => {
				match receiver {
					Some(receiver) => {
						receiver.put(&Type::Object(owner), sink)?;
						sink.emit(Instruction::GetField { owner, name, ty: ty.clone() });
					}

					None => sink.emit(Instruction::GetStatic { owner, name, ty: ty.clone() }),
				}

				coerce(&ty, target, sink)
			}
		}
	}


	/// Persist the given value into this handle's location.
	/// Only locals and fields have a location.
	pub fn store(&self, value: StackValue, sink: &mut dyn Sink) -> Result<(), Error> {
		match self {
			Self::OnStack(_) | Self::Constant { .. } => Err(Error::store_to_transient()),

			Self::Local { slot, ty } => {
				value.put(ty, sink)?;
				sink.emit(Instruction::Store { slot: *slot, ty: ty.clone() });
				Ok(())
			}

			Self::Field { owner, name, ty, receiver: None } => {
				value.put(ty, sink)?;
				sink.emit(Instruction::PutStatic { owner: *owner, name: *name, ty: ty.clone() });
				Ok(())
			}

			Self::Field { owner, name, ty, receiver: Some(receiver) } => {
				if ty.size() != 1 {
					return Err(Error::wide_field_store());
				}

				match &**receiver {
					// Already below the value, and out of reach for a cast.
					Self::OnStack(recv_ty) if !recv_ty.is_reference() => {
						return Err(Error::invalid_coercion(recv_ty.clone(), Type::Object(*owner)));
					}

					Self::OnStack(_) => value.put(ty, sink)?,

					receiver => {
						value.put(ty, sink)?;
						receiver.clone().put(&Type::Object(*owner), sink)?;
						sink.emit(Instruction::Swap);
					}
				}

				sink.emit(Instruction::PutField { owner: *owner, name: *name, ty: ty.clone() });
				Ok(())
			}
		}
	}
}


/// Convert the value on top of the stack.
pub fn coerce(from: &Type, to: &Type, sink: &mut dyn Sink) -> Result<(), Error> {
	if from == to {
		return Ok(());
	}

	match (from, to) {
		(Type::Void, _) => Err(Error::invalid_coercion(from.clone(), to.clone())),

		(_, Type::Void) => {
			sink.emit(Instruction::Pop(from.clone()));
			Ok(())
		}

		(Type::Bool, _) | (_, Type::Bool) if from.is_primitive() && to.is_primitive() => Err(
			Error::invalid_coercion(from.clone(), to.clone())
		),

		// Sub-int values are already ints on the stack.
		(_, Type::Int) if from.stack_type() == Type::Int => Ok(()),

		_ if from.is_numeric() && to.is_numeric() => {
			sink.emit(Instruction::Convert { from: from.stack_type(), to: to.clone() });
			Ok(())
		}

		_ if from.is_primitive() => {
			sink.emit(Instruction::Box { from: from.clone(), to: to.clone() });
			Ok(())
		}

		_ if to.is_primitive() => {
			sink.emit(Instruction::Unbox { from: from.clone(), to: to.clone() });
			Ok(())
		}

		_ => {
			sink.emit(Instruction::CheckCast(to.clone()));
			Ok(())
		}
	}
}
