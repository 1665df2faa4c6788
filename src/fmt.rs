/// Display with a formatting context.
/// Listings, faults and errors hold symbols, which can only be printed through the
/// interner.
pub trait Display<'a> {
	/// The format context.
	type Context: Copy + 'a;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result;


	/// Format to a string.
	fn fmt_string(&self, context: Self::Context) -> String {
		Show(self, context).to_string()
	}
}


impl<'a, T> Display<'a> for &T
where
	T: Display<'a> + ?Sized,
{
	type Context = T::Context;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		(**self).fmt(f, context)
	}
}


impl<'a, T> Display<'a> for Box<T>
where
	T: Display<'a> + ?Sized,
{
	type Context = T::Context;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		(**self).fmt(f, context)
	}
}


/// Adapter to std::fmt::Display, pairing a value with its context.
#[derive(Debug)]
pub struct Show<T, C>(pub T, pub C);


impl<'a, T, C> std::fmt::Display for Show<T, C>
where
	T: Display<'a, Context = C>,
	C: Copy,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		self.0.fmt(f, self.1)
	}
}


/// A list of items, displayed with a separator.
#[derive(Debug)]
pub struct Sep<'i, T>(pub &'i [T], pub &'static str);


impl<'a, 'i, T> Display<'a> for Sep<'i, T>
where
	T: Display<'a>,
{
	type Context = T::Context;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		for (ix, item) in self.0.iter().enumerate() {
			if ix > 0 {
				f.write_str(self.1)?;
			}

			item.fmt(f, context)?;
		}

		Ok(())
	}
}
