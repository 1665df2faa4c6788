use std::{
	io,
	fmt::{self, Display},
	path::Path,
};

use crate::term::color;


/// An error in a model file.
#[derive(Debug)]
pub enum Error {
	Io(io::Error),
	Json(serde_json::Error),
	/// A call to a method that the model does not declare.
	UnknownMethod(Box<str>),
	/// A type name that could not be parsed.
	UnknownType(Box<str>),
	/// A void type where a value is required.
	VoidValue(Box<str>),
}


impl Error {
	pub fn unknown_method<T: Into<Box<str>>>(name: T) -> Self {
		Self::UnknownMethod(name.into())
	}


	pub fn unknown_type<T: Into<Box<str>>>(name: T) -> Self {
		Self::UnknownType(name.into())
	}


	pub fn void_value<T: Into<Box<str>>>(name: T) -> Self {
		Self::VoidValue(name.into())
	}


	/// Display the error, prefixed by the model path.
	pub fn in_file<'a>(&'a self, path: &'a Path) -> InFile<'a> {
		InFile { error: self, path }
	}
}


impl From<io::Error> for Error {
	fn from(error: io::Error) -> Self {
		Self::Io(error)
	}
}


impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Self {
		Self::Json(error)
	}
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(error) => write!(f, "{}", error),
			Self::Json(error) => write!(f, "malformed model: {}", error),
			Self::UnknownMethod(name) => write!(f, "unknown method '{}'", name),
			Self::UnknownType(name) => write!(f, "unknown type '{}'", name),
			Self::VoidValue(name) => write!(f, "'{}' does not hold a value", name),
		}
	}
}


impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			Self::Json(error) => Some(error),
			_ => None,
		}
	}
}


/// An error along with the model file it comes from.
#[derive(Debug)]
pub struct InFile<'a> {
	error: &'a Error,
	path: &'a Path,
}


impl<'a> Display for InFile<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{}: {}: {}",
			color::Fg(color::Red, "Error"),
			color::Fg(color::Yellow, self.path.display()),
			self.error
		)
	}
}
