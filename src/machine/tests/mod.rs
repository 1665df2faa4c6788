use assert_matches::assert_matches;

use super::*;
use crate::{
	codegen::insn::Invoke,
	symbol::Interner,
};


fn invoke(interner: &mut Interner, dispatch: Dispatch, params: Vec<Type>, ret: Type) -> Instruction {
	Instruction::Invoke(
		Invoke {
			dispatch,
			owner: interner.get_or_intern("Foo"),
			name: interner.get_or_intern("f"),
			params: params.into(),
			ret,
		}
	)
}


#[test]
fn test_invocation_records_arguments_in_parameter_order() {
	let mut interner = Interner::new();
	let mut machine = Machine::default();

	let listing = vec![
		Instruction::Push(Constant::Int(1)),
		Instruction::Push(Constant::Long(2)),
		invoke(&mut interner, Dispatch::Static, vec![Type::Int, Type::Long], Type::Int),
	];

	machine.run(&listing).unwrap();

	assert_eq!(machine.invocations().len(), 1);
	assert_eq!(machine.invocations()[0].args, vec![Value::Int(1), Value::Long(2)]);
	assert_eq!(machine.invocations()[0].receiver, None);
	assert_eq!(machine.operands(), &[Operand::new(Type::Int, Value::Result(0))]);
	assert_matches!(machine.check_balanced(), Err(Fault::UnbalancedStack(1)));
}


#[test]
fn test_instance_dispatch_pops_receiver() {
	let mut interner = Interner::new();
	let mut machine = Machine::default();
	let foo = Type::Object(interner.get_or_intern("Foo"));

	machine.init_local(SlotIx(0), foo.clone(), Value::Opaque);

	let listing = vec![
		Instruction::Load { slot: SlotIx(0), ty: foo },
		Instruction::Push(Constant::Int(7)),
		invoke(&mut interner, Dispatch::Virtual, vec![Type::Int], Type::Void),
	];

	machine.run(&listing).unwrap();

	assert_eq!(machine.invocations()[0].receiver, Some(Value::Opaque));
	assert_eq!(machine.check_balanced(), Ok(()));
}


#[test]
fn test_type_mismatch() {
	let mut interner = Interner::new();
	let mut machine = Machine::default();

	let listing = vec![
		Instruction::Push(Constant::Int(1)),
		invoke(&mut interner, Dispatch::Static, vec![Type::Long], Type::Void),
	];

	assert_matches!(
		machine.run(&listing),
		Err(Fault::TypeMismatch { expected: Type::Long, found: Type::Int })
	);
}


#[test]
fn test_sub_int_types_share_the_int_stack_type() {
	let mut interner = Interner::new();
	let mut machine = Machine::default();

	let listing = vec![
		Instruction::Push(Constant::Int(300)),
		Instruction::Convert { from: Type::Int, to: Type::Byte },
		invoke(&mut interner, Dispatch::Static, vec![Type::Byte], Type::Void),
	];

	machine.run(&listing).unwrap();

	assert_eq!(machine.invocations()[0].args, vec![Value::Int(44)]);
}


#[test]
fn test_underflow_and_uninitialized_local() {
	let mut machine = Machine::default();

	assert_matches!(machine.run(&[Instruction::Pop(Type::Int)]), Err(Fault::StackUnderflow));
	assert_matches!(
		machine.run(&[Instruction::Load { slot: SlotIx(3), ty: Type::Int }]),
		Err(Fault::UninitializedLocal(SlotIx(3)))
	);
}


#[test]
fn test_wide_locals() {
	let mut machine = Machine::default();

	let listing = vec![
		Instruction::Push(Constant::Long(5)),
		Instruction::Store { slot: SlotIx(0), ty: Type::Long },
		Instruction::Push(Constant::Int(1)),
		Instruction::Store { slot: SlotIx(1), ty: Type::Int },
	];

	machine.run(&listing).unwrap();

	// Storing into the upper half clobbers the long.
	assert_matches!(
		machine.run(&[Instruction::Load { slot: SlotIx(0), ty: Type::Long }]),
		Err(Fault::UninitializedLocal(SlotIx(0)))
	);
}


#[test]
fn test_void_local_occupies_no_slot() {
	let mut machine = Machine::default();

	machine.init_local(SlotIx(0), Type::Void, Value::Opaque);
	machine.init_local(SlotIx(0), Type::Int, Value::Int(3));

	machine.run(&[Instruction::Load { slot: SlotIx(0), ty: Type::Int }]).unwrap();

	assert_eq!(machine.operands(), &[Operand::new(Type::Int, Value::Int(3))]);
}


#[test]
fn test_arrays() {
	let mut machine = Machine::default();

	let listing = vec![
		Instruction::Push(Constant::Int(2)),
		Instruction::NewArray(Type::Int),
		Instruction::Dup,
		Instruction::Push(Constant::Int(1)),
		Instruction::Push(Constant::Int(9)),
		Instruction::ArrayStore(Type::Int),
	];

	machine.run(&listing).unwrap();

	assert_eq!(machine.array(0), Some(&[Value::Opaque, Value::Int(9)][..]));
	assert_eq!(
		machine.operands(),
		&[Operand::new(Type::Array(Box::new(Type::Int)), Value::Array(0))]
	);
}


#[test]
fn test_stack_overflow() {
	let mut machine = Machine::new(1);

	let listing = vec![
		Instruction::Push(Constant::Int(1)),
		Instruction::Push(Constant::Int(2)),
	];

	assert_matches!(machine.run(&listing), Err(Fault::StackOverflow));
}


#[test]
fn test_boxing() {
	let mut interner = Interner::new();
	let mut machine = Machine::default();
	let integer = Type::Object(interner.get_or_intern("Integer"));

	let listing = vec![
		Instruction::Push(Constant::Int(4)),
		Instruction::Box { from: Type::Int, to: integer.clone() },
		Instruction::Unbox { from: integer, to: Type::Int },
	];

	machine.run(&listing).unwrap();

	assert_eq!(machine.operands(), &[Operand::new(Type::Int, Value::Int(4))]);
}
