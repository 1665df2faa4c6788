/// How a physical parameter position is being filled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// An ordinary argument.
	General,
	/// An array collecting spread arguments.
	GeneralVararg,
	/// A placeholder for an omitted argument.
	DefaultParameter,
	/// A word of the default bitmask.
	DefaultMask,
	/// A method reference used by the default-forwarding target to compute a default.
	MethodHandleInDefault,
	/// An implicit outer-scope value of a closure body.
	Captured,
	/// A captured value of a default-value closure.
	DefaultLambdaCapturedParameter,
}


impl ValueKind {
	/// Whether filling a position with this kind sets its bit in the default mask.
	pub fn sets_mask_bit(self) -> bool {
		self == Self::DefaultParameter
	}


	/// Whether values of this kind fill a declared parameter, as opposed to trailing
	/// synthetic parameters.
	pub fn is_declared(self) -> bool {
		matches!(self, Self::General | Self::GeneralVararg | Self::DefaultParameter)
	}
}
