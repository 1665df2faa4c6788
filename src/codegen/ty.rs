use crate::symbol::Symbol;


/// A machine type, as seen by the stack machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
	Void,
	Bool,
	Byte,
	Char,
	Short,
	Int,
	Long,
	Float,
	Double,
	/// An object of the given class.
	Object(Symbol),
	/// An array with the given element type.
	Array(Box<Type>),
	/// A reference to a method, used by default-forwarding targets.
	Handle,
}


impl Type {
	/// How many local slots a value of this type occupies.
	pub fn size(&self) -> u32 {
		match self {
			Self::Void => 0,
			Self::Long | Self::Double => 2,
			_ => 1,
		}
	}


	/// Whether this is a primitive value type. Void is not a value type.
	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			Self::Bool
				| Self::Byte
				| Self::Char
				| Self::Short
				| Self::Int
				| Self::Long
				| Self::Float
				| Self::Double
		)
	}


	/// Whether this type participates in numeric conversions.
	pub fn is_numeric(&self) -> bool {
		self.is_primitive() && *self != Self::Bool
	}


	/// Whether values of this type are references.
	pub fn is_reference(&self) -> bool {
		matches!(self, Self::Object(_) | Self::Array(_) | Self::Handle)
	}


	/// The representation of this type on the operand stack.
	/// Sub-int types are held as ints.
	pub fn stack_type(&self) -> Type {
		match self {
			Self::Byte | Self::Char | Self::Short => Self::Int,
			other => other.clone(),
		}
	}


	/// The element type, if this is an array type.
	pub fn element(&self) -> Option<&Type> {
		match self {
			Self::Array(element) => Some(element),
			_ => None,
		}
	}
}
