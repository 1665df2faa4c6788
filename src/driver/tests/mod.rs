use assert_matches::assert_matches;

use super::*;
use crate::codegen::{Argument, DefaultValue, Dispatch, Instruction};


fn lower(json: &str, interner: &mut Interner) -> Result<Program, Error> {
	let source = Source::from_reader(std::path::Path::new("<test>"), json.as_bytes())?;
	load(&source, interner)
}


#[test]
fn test_parse_type() {
	let mut interner = Interner::new();
	let foo = interner.get_or_intern("pkg.Foo");

	assert_eq!(model::parse_type("int", &mut interner).unwrap(), Type::Int);
	assert_eq!(model::parse_type("boolean", &mut interner).unwrap(), Type::Bool);
	assert_eq!(model::parse_type("pkg.Foo", &mut interner).unwrap(), Type::Object(foo));
	assert_eq!(
		model::parse_type("long[][]", &mut interner).unwrap(),
		Type::Array(Box::new(Type::Array(Box::new(Type::Long))))
	);

	assert_matches!(model::parse_type("", &mut interner), Err(Error::UnknownType(_)));
	assert_matches!(model::parse_type("1abc", &mut interner), Err(Error::UnknownType(_)));
	assert_matches!(model::parse_type("int[", &mut interner), Err(Error::UnknownType(_)));
}


#[test]
fn test_lower_call() {
	let mut interner = Interner::new();

	let program = lower(
		r#"{
			"locals": [ { "name": "x", "type": "long" } ],
			"methods": {
				"f": {
					"owner": "Foo", "name": "f", "dispatch": "interface",
					"params": ["int", "long", "int[]"], "ret": "int",
					"default": { "name": "f$default", "params": ["int", "long", "int[]", "int", "handle"] }
				}
			},
			"calls": [
				{
					"line": 3, "method": "f", "receiver": { "null": "Foo" },
					"args": [
						{ "decl": 1, "expr": { "local": "x" } },
						{ "decl": 0, "omitted": { "deferred": "f$p0" } },
						{ "decl": 2, "vararg": [ { "int": 1 } ] }
					]
				}
			]
		}"#,
		&mut interner,
	).unwrap();

	let foo = interner.get("Foo").unwrap();
	let x = interner.get("x").unwrap();
	let p0 = interner.get("f$p0").unwrap();

	assert_eq!(program.locals, vec![(x, Type::Long)]);
	assert_eq!(program.calls.len(), 1);

	let site = &program.calls[0];
	assert_eq!(site.callable.owner, foo);
	assert_eq!(site.callable.dispatch, Dispatch::Interface);
	assert_eq!(site.callable.ret, Type::Int);
	assert_eq!(site.callable.default.as_ref().map(|target| target.params.len()), Some(5));

	assert_eq!(site.call.pos, Some(SourcePos::line(3)));
	assert_eq!(site.call.receiver, Some(Expr::Null(Type::Object(foo))));

	let arguments: Vec<_> = site.call.arguments
		.iter()
		.map(|arg| (arg.decl_index, arg.argument.clone()))
		.collect();

	assert_eq!(
		arguments,
		vec![
			(1, Argument::Expr(Expr::Local(x))),
			(0, Argument::Omitted(DefaultValue::Deferred(p0))),
			(2, Argument::Vararg(vec![Expr::Int(1)].into())),
		]
	);
}


#[test]
fn test_lower_errors() {
	let mut interner = Interner::new();

	assert_matches!(
		lower(r#"{ "calls": [ { "method": "g" } ] }"#, &mut interner),
		Err(Error::UnknownMethod(name)) if &*name == "g"
	);

	assert_matches!(
		lower(r#"{ "methods": { "f": { "owner": "Foo", "name": "f", "ret": "[]" } } }"#, &mut interner),
		Err(Error::UnknownType(_))
	);

	assert_matches!(lower(r#"{ "unknown": [] }"#, &mut interner), Err(Error::Json(_)));
	assert_matches!(lower("[", &mut interner), Err(Error::Json(_)));
}


#[test]
fn test_void_does_not_hold_values() {
	let mut interner = Interner::new();

	assert_matches!(
		lower(r#"{ "locals": [ { "name": "x", "type": "void" } ] }"#, &mut interner),
		Err(Error::VoidValue(name)) if &*name == "void"
	);

	assert_matches!(
		lower(r#"{ "methods": { "f": { "owner": "Foo", "name": "f", "params": [ "void" ] } } }"#, &mut interner),
		Err(Error::VoidValue(_))
	);

	assert_matches!(
		lower(
			r#"{ "methods": { "f": {
				"owner": "Foo", "name": "f", "params": [ "int" ],
				"default": { "name": "f$default", "params": [ "int", " void " ] }
			} } }"#,
			&mut interner,
		),
		Err(Error::VoidValue(name)) if &*name == "void"
	);

	assert_matches!(model::parse_value_type("void[]", &mut interner), Err(Error::VoidValue(_)));
	assert_matches!(model::parse_type("void[]", &mut interner), Err(Error::VoidValue(_)));
	assert_eq!(model::parse_type("void", &mut interner).unwrap(), Type::Void);

	let program = lower(
		r#"{ "methods": { "f": { "owner": "Foo", "name": "f" } }, "calls": [ { "method": "f" } ] }"#,
		&mut interner,
	).unwrap();
	assert_eq!(program.calls[0].callable.ret, Type::Void);
}


#[test]
fn test_statement_discards_result() {
	let mut interner = Interner::new();

	let program = lower(
		r#"{
			"methods": {
				"f": { "owner": "Foo", "name": "f", "ret": "double" },
				"g": { "owner": "Foo", "name": "g" }
			},
			"calls": [ { "method": "f" }, { "method": "g" } ]
		}"#,
		&mut interner,
	).unwrap();

	let mut evaluator = Evaluator::new(&program.locals);
	evaluator.emit_program(&program).unwrap();

	let instructions: Vec<_> = evaluator.listing().instructions().collect();

	assert_eq!(instructions.len(), 3);
	assert!(instructions[0].is_invoke());
	assert_eq!(instructions[1], &Instruction::Pop(Type::Double));
	assert!(instructions[2].is_invoke());
}


#[test]
fn test_locals_are_allocated_in_order() {
	let mut interner = Interner::new();
	let a = interner.get_or_intern("a");
	let b = interner.get_or_intern("b");

	let evaluator = Evaluator::new(&[(a, Type::Double), (b, Type::Int)]);

	assert_eq!(evaluator.locals(), &[(SlotIx(0), Type::Double), (SlotIx(2), Type::Int)]);
	assert_eq!(evaluator.max_slots(), 3);
}


#[test]
fn test_field_read() {
	let mut interner = Interner::new();
	let this = interner.get_or_intern("this");
	let foo = interner.get_or_intern("Foo");
	let name = interner.get_or_intern("name");

	let mut evaluator = Evaluator::new(&[(this, Type::Object(foo))]);

	let field = Expr::Field {
		owner: foo,
		name,
		ty: Type::Int,
		receiver: Some(Box::new(Expr::Local(this))),
	};

	let value = evaluator.gen(&field).unwrap();
	value.put(&Type::Long, evaluator.sink()).unwrap();

	let instructions: Vec<_> = evaluator.listing().instructions().cloned().collect();

	assert_eq!(
		instructions,
		vec![
			Instruction::Load { slot: SlotIx(0), ty: Type::Object(foo) },
			Instruction::GetField { owner: foo, name, ty: Type::Int },
			Instruction::Convert { from: Type::Int, to: Type::Long },
		]
	);
}
