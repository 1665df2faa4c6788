//! The call-site model file, and its lowering into the emitter's model.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{CallSite, Error, Expr, Program};
use crate::{
	codegen::{Callable, Capture, DefaultTarget, DefaultValue, Dispatch, ResolvedCall, Type},
	source::SourcePos,
	symbol::{Interner, Symbol},
};


/// A model file, as written by hand.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
	#[serde(default)]
	pub locals: Vec<Local>,
	#[serde(default)]
	pub methods: BTreeMap<String, Method>,
	#[serde(default)]
	pub calls: Vec<Call>,
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Local {
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
	pub owner: String,
	pub name: String,
	#[serde(default)]
	pub dispatch: DispatchModel,
	#[serde(default)]
	pub params: Vec<String>,
	#[serde(default = "void")]
	pub ret: String,
	#[serde(default)]
	pub default: Option<DefaultModel>,
}


fn void() -> String {
	"void".to_owned()
}


#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchModel {
	Static,
	Virtual,
	Interface,
	Special,
}


impl Default for DispatchModel {
	fn default() -> Self {
		Self::Static
	}
}


impl From<DispatchModel> for Dispatch {
	fn from(dispatch: DispatchModel) -> Self {
		match dispatch {
			DispatchModel::Static => Self::Static,
			DispatchModel::Virtual => Self::Virtual,
			DispatchModel::Interface => Self::Interface,
			DispatchModel::Special => Self::Special,
		}
	}
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultModel {
	pub name: String,
	pub params: Vec<String>,
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Call {
	#[serde(default)]
	pub line: Option<u32>,
	pub method: String,
	#[serde(default)]
	pub receiver: Option<ExprModel>,
	#[serde(default)]
	pub args: Vec<Arg>,
	#[serde(default)]
	pub captures: Vec<CaptureModel>,
}


#[derive(Debug, Deserialize)]
pub struct Arg {
	pub decl: usize,
	#[serde(flatten)]
	pub value: ArgValue,
}


#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgValue {
	Expr(ExprModel),
	Vararg(Vec<ExprModel>),
	Omitted(OmittedModel),
}


#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OmittedModel {
	Placeholder,
	/// The name of the function computing the default.
	Deferred(String),
	Lambda(Vec<CaptureModel>),
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureModel {
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
	pub expr: ExprModel,
}


#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprModel {
	Int(i32),
	Long(i64),
	Double(f64),
	Bool(bool),
	/// The type of the null reference.
	Null(String),
	Local(String),
	Field(FieldModel),
	Call(Box<Call>),
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldModel {
	pub owner: String,
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
	#[serde(default)]
	pub receiver: Option<Box<ExprModel>>,
}


/// Parse a type name.
/// Primitive names are reserved, array types end with `[]`, anything else that looks like a
/// qualified identifier is a class.
pub fn parse_type(name: &str, interner: &mut Interner) -> Result<Type, Error> {
	let name = name.trim();

	if let Some(element) = name.strip_suffix("[]") {
		return Ok(Type::Array(Box::new(parse_value_type(element, interner)?)));
	}

	let ty = match name {
		"void" => Type::Void,
		"bool" | "boolean" => Type::Bool,
		"byte" => Type::Byte,
		"char" => Type::Char,
		"short" => Type::Short,
		"int" => Type::Int,
		"long" => Type::Long,
		"float" => Type::Float,
		"double" => Type::Double,
		"handle" => Type::Handle,

		class if is_class_name(class) => Type::Object(interner.get_or_intern(class)),

		_ => return Err(Error::unknown_type(name)),
	};

	Ok(ty)
}


/// Parse the type of something that holds a value, which excludes void.
pub fn parse_value_type(name: &str, interner: &mut Interner) -> Result<Type, Error> {
	match parse_type(name, interner)? {
		Type::Void => Err(Error::void_value(name.trim())),
		ty => Ok(ty),
	}
}


fn is_class_name(name: &str) -> bool {
	let mut chars = name.chars();

	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '_' => chars.all(
			|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '/')
		),
		_ => false,
	}
}


impl Model {
	/// Resolve every name and type, producing the program to be emitted.
	pub fn lower(self, interner: &mut Interner) -> Result<Program, Error> {
		let mut methods = HashMap::with_capacity(self.methods.len());

		for (key, method) in self.methods {
			let callable = lower_method(method, interner)?;
			methods.insert(key, callable);
		}

		let mut lowering = Lowering { interner, methods };

		let locals = self.locals
			.into_iter()
			.map(
				|local| Ok((
					lowering.interner.get_or_intern(&local.name),
					parse_value_type(&local.ty, lowering.interner)?,
				))
			)
			.collect::<Result<_, Error>>()?;

		let calls = self.calls
			.into_iter()
			.map(|call| lowering.call(call))
			.collect::<Result<_, Error>>()?;

		Ok(Program { locals, calls })
	}
}


fn lower_method(method: Method, interner: &mut Interner) -> Result<Callable, Error> {
	let params = method.params
		.iter()
		.map(|param| parse_value_type(param, interner))
		.collect::<Result<_, Error>>()?;

	let default = match method.default {
		Some(default) => Some(
			DefaultTarget {
				name: interner.get_or_intern(&default.name),
				params: default.params
					.iter()
					.map(|param| parse_value_type(param, interner))
					.collect::<Result<_, Error>>()?,
			}
		),
		None => None,
	};

	Ok(
		Callable {
			owner: interner.get_or_intern(&method.owner),
			name: interner.get_or_intern(&method.name),
			dispatch: method.dispatch.into(),
			params,
			ret: parse_type(&method.ret, interner)?,
			default,
		}
	)
}


/// Lowering state: the interner, and the methods calls may refer to.
struct Lowering<'a> {
	interner: &'a mut Interner,
	methods: HashMap<String, Callable>,
}


impl<'a> Lowering<'a> {
	fn call(&mut self, call: Call) -> Result<CallSite, Error> {
		let callable = self.methods
			.get(&call.method)
			.cloned()
			.ok_or_else(|| Error::unknown_method(call.method.as_str()))?;

		let mut resolved = ResolvedCall::new(call.line.map(SourcePos::line));

		if let Some(receiver) = call.receiver {
			resolved = resolved.receiver(self.expr(receiver)?);
		}

		for arg in call.args {
			resolved = match arg.value {
				ArgValue::Expr(expr) => resolved.arg(arg.decl, self.expr(expr)?),

				ArgValue::Vararg(exprs) => {
					let exprs = exprs
						.into_iter()
						.map(|expr| self.expr(expr))
						.collect::<Result<_, Error>>()?;

					resolved.vararg(arg.decl, exprs)
				}

				ArgValue::Omitted(default) => {
					let default = match default {
						OmittedModel::Placeholder => DefaultValue::Placeholder,

						OmittedModel::Deferred(function) => DefaultValue::Deferred(
							self.interner.get_or_intern(function)
						),

						OmittedModel::Lambda(captures) => DefaultValue::Lambda(
							captures
								.into_iter()
								.map(|capture| self.capture(capture))
								.collect::<Result<_, Error>>()?
						),
					};

					resolved.omit(arg.decl, default)
				}
			};
		}

		for capture in call.captures {
			resolved = resolved.capture(self.capture(capture)?);
		}

		Ok(CallSite { callable, call: resolved })
	}


	fn capture(&mut self, capture: CaptureModel) -> Result<Capture<Expr>, Error> {
		Ok(
			Capture {
				name: self.symbol(&capture.name),
				ty: parse_value_type(&capture.ty, self.interner)?,
				source: self.expr(capture.expr)?,
			}
		)
	}


	fn expr(&mut self, expr: ExprModel) -> Result<Expr, Error> {
		let expr = match expr {
			ExprModel::Int(int) => Expr::Int(int),
			ExprModel::Long(long) => Expr::Long(long),
			ExprModel::Double(double) => Expr::Double(double),
			ExprModel::Bool(b) => Expr::Bool(b),
			ExprModel::Null(ty) => Expr::Null(parse_value_type(&ty, self.interner)?),
			ExprModel::Local(name) => Expr::Local(self.symbol(&name)),

			ExprModel::Field(field) => Expr::Field {
				owner: self.symbol(&field.owner),
				name: self.symbol(&field.name),
				ty: parse_value_type(&field.ty, self.interner)?,
				receiver: match field.receiver {
					Some(receiver) => Some(Box::new(self.expr(*receiver)?)),
					None => None,
				},
			},

			ExprModel::Call(call) => Expr::Call(Box::new(self.call(*call)?)),
		};

		Ok(expr)
	}


	fn symbol(&mut self, name: &str) -> Symbol {
		self.interner.get_or_intern(name)
	}
}
