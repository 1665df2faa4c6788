use std::{
	fmt::{self, Debug, Display},
	sync::atomic::{AtomicBool, Ordering},
};

use termion::color as term;
pub use termion::color::{Blue, Cyan, Green, Magenta, Red, Yellow};


/// Whether escape sequences should be produced. Enabled by default.
static ENABLED: AtomicBool = AtomicBool::new(true);


/// Enable or disable colored output for the whole process.
pub fn set_enabled(enabled: bool) {
	ENABLED.store(enabled, Ordering::Relaxed);
}


fn enabled() -> bool {
	ENABLED.load(Ordering::Relaxed)
}


/// Paint the foreground with a given color when formatting the value.
pub struct Fg<C, T>(pub C, pub T);


impl<C, T> Debug for Fg<C, T>
where
	C: term::Color + Copy,
	T: Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if !enabled() {
			return self.1.fmt(f);
		}

		write!(f, "{}", term::Fg(self.0))?;
		self.1.fmt(f)?;
		write!(f, "{}", term::Fg(term::Reset))
	}
}


impl<C, T> Display for Fg<C, T>
where
	C: term::Color + Copy,
	T: Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if !enabled() {
			return self.1.fmt(f);
		}

		write!(f, "{}{}{}", term::Fg(self.0), self.1, term::Fg(term::Reset))
	}
}

