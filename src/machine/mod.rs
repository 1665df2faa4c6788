//! A verifier for emitted listings.
//!
//! Runs the instructions over an abstract operand stack, checking operand types, and
//! records every invocation along with the arguments it received.

mod fault;
mod fmt;
mod mem;
#[cfg(test)]
mod tests;

use crate::{
	codegen::{Constant, Dispatch, Instruction, SlotIx, Type},
	symbol::Symbol,
};
pub use fault::Fault;
use mem::{Locals, Stack};


/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	/// Ints and sub-int types.
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Handle { owner: Symbol, name: Symbol },
	Boxed(Box<Value>),
	/// An index in the array heap.
	Array(usize),
	/// A value read from a field.
	Field { owner: Symbol, name: Symbol },
	/// The result of the nth invocation.
	Result(usize),
	/// A value whose contents are unknown, such as uninitialized parameters.
	Opaque,
}


/// A value with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
	pub ty: Type,
	pub value: Value,
}


impl Operand {
	pub fn new(ty: Type, value: Value) -> Self {
		Self { ty, value }
	}
}


/// A recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
	pub dispatch: Dispatch,
	pub owner: Symbol,
	pub name: Symbol,
	pub receiver: Option<Value>,
	/// Arguments in parameter order.
	pub args: Vec<Value>,
}


/// The listing verifier.
#[derive(Debug, Default)]
pub struct Machine {
	stack: Stack,
	locals: Locals,
	arrays: Vec<Vec<Value>>,
	invocations: Vec<Invocation>,
}


impl Machine {
	/// Create a machine with the given maximum operand stack size.
	pub fn new(max_size: usize) -> Self {
		Self {
			stack: Stack::new(max_size),
			..Self::default()
		}
	}


	/// Initialize a local, as if it had been stored before the listing.
	pub fn init_local(&mut self, slot_ix: SlotIx, ty: Type, value: Value) {
		self.locals.store(slot_ix, Operand::new(ty, value));
	}


	/// Run the given instructions.
	pub fn run<'a, I>(&mut self, instructions: I) -> Result<(), Fault>
	where
		I: IntoIterator<Item = &'a Instruction>,
	{
		for instruction in instructions {
			self.step(instruction)?;
		}

		Ok(())
	}


	/// Check that the operand stack is empty, as after a complete statement.
	pub fn check_balanced(&self) -> Result<(), Fault> {
		if self.stack.is_empty() {
			Ok(())
		} else {
			Err(Fault::UnbalancedStack(self.stack.len()))
		}
	}


	/// The operands currently on the stack, bottom first.
	pub fn operands(&self) -> &[Operand] {
		self.stack.operands()
	}


	/// The invocations so far, in execution order.
	pub fn invocations(&self) -> &[Invocation] {
		&self.invocations
	}


	/// The elements of an array.
	pub fn array(&self, ix: usize) -> Option<&[Value]> {
		self.arrays.get(ix).map(Vec::as_slice)
	}


	fn step(&mut self, instruction: &Instruction) -> Result<(), Fault> {
		match instruction {
			Instruction::Push(constant) => {
				let operand = match constant {
					Constant::Null => Operand::new(Type::Object(Symbol::default()), Value::Null),
					Constant::Bool(b) => Operand::new(Type::Bool, Value::Bool(*b)),
					Constant::Int(i) => Operand::new(Type::Int, Value::Int(*i)),
					Constant::Long(l) => Operand::new(Type::Long, Value::Long(*l)),
					Constant::Float(n) => Operand::new(Type::Float, Value::Float(*n)),
					Constant::Double(n) => Operand::new(Type::Double, Value::Double(*n)),
					Constant::Handle { owner, name } => Operand::new(
						Type::Handle,
						Value::Handle { owner: *owner, name: *name }
					),
				};

				self.push(operand)
			}

			Instruction::Load { slot, ty } => {
				let operand = self.locals
					.fetch(*slot)
					.ok_or(Fault::UninitializedLocal(*slot))?;

				check_type(ty, &operand.ty)?;

				self.push(Operand::new(ty.stack_type(), operand.value))
			}

			Instruction::Store { slot, ty } => {
				let operand = self.pop_typed(ty)?;
				self.locals.store(*slot, Operand::new(ty.clone(), operand.value));
				Ok(())
			}

			Instruction::GetField { owner, name, ty } => {
				self.pop_reference()?;
				self.push(Operand::new(ty.stack_type(), Value::Field { owner: *owner, name: *name }))
			}

			Instruction::GetStatic { owner, name, ty } => {
				self.push(Operand::new(ty.stack_type(), Value::Field { owner: *owner, name: *name }))
			}

			Instruction::PutField { ty, .. } => {
				self.pop_typed(ty)?;
				self.pop_reference()?;
				Ok(())
			}

			Instruction::PutStatic { ty, .. } => {
				self.pop_typed(ty)?;
				Ok(())
			}

			Instruction::Convert { from, to } => {
				let operand = self.pop_typed(from)?;
				let value = convert(operand.value, from, to)?;
				self.push(Operand::new(to.stack_type(), value))
			}

			Instruction::Box { from, to } => {
				let operand = self.pop_typed(from)?;
				self.push(Operand::new(to.clone(), Value::Boxed(Box::new(operand.value))))
			}

			Instruction::Unbox { to, .. } => {
				let operand = self.pop_reference()?;

				let value = match operand.value {
					Value::Boxed(value) => *value,
					Value::Null => return Err(Fault::invalid_conversion(operand.ty, to.clone())),
					_ => Value::Opaque,
				};

				self.push(Operand::new(to.stack_type(), value))
			}

			Instruction::CheckCast(ty) => {
				let operand = self.pop_reference()?;
				self.push(Operand::new(ty.clone(), operand.value))
			}

			Instruction::Pop(ty) => {
				self.pop_typed(ty)?;
				Ok(())
			}

			Instruction::Dup => {
				let operand = self.stack
					.peek()
					.cloned()
					.ok_or(Fault::StackUnderflow)?;

				self.push(operand)
			}

			Instruction::Swap => {
				let top = self.pop()?;
				let below = self.pop()?;
				self.push(top)?;
				self.push(below)
			}

			Instruction::NewArray(element) => {
				let length = match self.pop_typed(&Type::Int)?.value {
					Value::Int(length) if length >= 0 => length as usize,
					_ => return Err(Fault::NotAnArray),
				};

				self.arrays.push(vec![Value::Opaque; length]);
				let ix = self.arrays.len() - 1;

				self.push(Operand::new(Type::Array(Box::new(element.clone())), Value::Array(ix)))
			}

			Instruction::ArrayStore(element) => {
				let value = self.pop_typed(element)?.value;
				let index = self.pop_typed(&Type::Int)?.value;
				let array = self.pop_reference()?.value;

				match (array, index) {
					(Value::Array(array), Value::Int(index)) => {
						let slot = self.arrays
							.get_mut(array)
							.and_then(|array| array.get_mut(index as usize))
							.ok_or(Fault::NotAnArray)?;

						*slot = value;
						Ok(())
					}

					_ => Err(Fault::NotAnArray),
				}
			}

			Instruction::Invoke(invoke) => {
				let mut args = Vec::with_capacity(invoke.params.len());

				for param in invoke.params.iter().rev() {
					args.push(self.pop_typed(param)?.value);
				}
				args.reverse();

				let receiver = if invoke.dispatch.has_receiver() {
					Some(self.pop_reference()?.value)
				} else {
					None
				};

				self.invocations.push(
					Invocation {
						dispatch: invoke.dispatch,
						owner: invoke.owner,
						name: invoke.name,
						receiver,
						args,
					}
				);

				if invoke.ret != Type::Void {
					let result = Value::Result(self.invocations.len() - 1);
					self.push(Operand::new(invoke.ret.stack_type(), result))?;
				}

				Ok(())
			}
		}
	}


	fn push(&mut self, operand: Operand) -> Result<(), Fault> {
		self.stack
			.push(operand)
			.map_err(|_| Fault::StackOverflow)
	}


	fn pop(&mut self) -> Result<Operand, Fault> {
		self.stack
			.pop()
			.ok_or(Fault::StackUnderflow)
	}


	/// Pop an operand of the given type.
	fn pop_typed(&mut self, ty: &Type) -> Result<Operand, Fault> {
		let operand = self.pop()?;
		check_type(ty, &operand.ty)?;
		Ok(operand)
	}


	fn pop_reference(&mut self) -> Result<Operand, Fault> {
		let operand = self.pop()?;

		if operand.ty.is_reference() {
			Ok(operand)
		} else {
			Err(Fault::type_mismatch(Type::Object(Symbol::default()), operand.ty))
		}
	}
}


/// Check that an operand of type `found` may be used as `expected`.
/// References are not checked against each other, as there is no class hierarchy.
fn check_type(expected: &Type, found: &Type) -> Result<(), Fault> {
	let expected = expected.stack_type();
	let found = found.stack_type();

	if expected == found || (expected.is_reference() && found.is_reference()) {
		Ok(())
	} else {
		Err(Fault::type_mismatch(expected, found))
	}
}


fn convert(value: Value, from: &Type, to: &Type) -> Result<Value, Fault> {
	let invalid = || Fault::invalid_conversion(from.clone(), to.clone());

	let value = match (value, to) {
		(Value::Int(i), Type::Byte) => Value::Int(i as i8 as i32),
		(Value::Int(i), Type::Short) => Value::Int(i as i16 as i32),
		(Value::Int(i), Type::Char) => Value::Int(i as u16 as i32),
		(Value::Int(i), Type::Long) => Value::Long(i as i64),
		(Value::Int(i), Type::Float) => Value::Float(i as f32),
		(Value::Int(i), Type::Double) => Value::Double(i as f64),

		(Value::Long(l), Type::Int) => Value::Int(l as i32),
		(Value::Long(l), Type::Float) => Value::Float(l as f32),
		(Value::Long(l), Type::Double) => Value::Double(l as f64),

		(Value::Float(n), Type::Int) => Value::Int(n as i32),
		(Value::Float(n), Type::Long) => Value::Long(n as i64),
		(Value::Float(n), Type::Double) => Value::Double(n as f64),

		(Value::Double(n), Type::Int) => Value::Int(n as i32),
		(Value::Double(n), Type::Long) => Value::Long(n as i64),
		(Value::Double(n), Type::Float) => Value::Float(n as f32),

		(Value::Long(l), Type::Byte | Type::Short | Type::Char) => {
			return convert(Value::Int(l as i32), &Type::Int, to)
		}

		(value @ (Value::Opaque | Value::Field { .. } | Value::Result(_)), to) if to.is_numeric() => value,

		_ => return Err(invalid()),
	};

	Ok(value)
}
