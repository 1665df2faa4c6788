use std::{
	io,
	fs,
	path::{Path, PathBuf},
};

use crate::source::Source;


/// Run a test for every file under the given directory, recursively.
/// The path is relative to the crate root. Files are visited in name order.
pub fn test_dir<P, F>(path: P, mut test: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(Source) -> io::Result<()>,
{
	let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	dir.push(path);

	fn run<F>(dir: &Path, test: &mut F) -> io::Result<()>
	where
		F: FnMut(Source) -> io::Result<()>,
	{
		let mut entries = fs::read_dir(dir)?
			.map(|entry| entry.map(|entry| entry.path()))
			.collect::<io::Result<Vec<_>>>()?;
		entries.sort();

		for path in entries {
			if path.is_dir() {
				run(&path, test)?;
			} else {
				test(Source::from_path(path)?)?;
			}
		}

		Ok(())
	}

	run(&dir, &mut test)
}
