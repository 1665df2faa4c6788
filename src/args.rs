use std::{ffi::OsString, path::PathBuf};

use clap::{clap_app, crate_authors, crate_version, crate_description, Arg};


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


/// What to do with the emitted listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Output {
	/// Print the listing.
	Listing,
	/// Run the listing on the verifier, and print the invocations.
	Run,
	/// Emit and verify, printing nothing on success.
	Check,
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// The model file. Read from stdin if missing.
	pub path: Option<PathBuf>,
	pub output: Output,
	pub color: bool,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		callgen =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@group output =>
				(@arg listing: --listing "Print the emitted listing (default)")
				(@arg run: --run "Run the listing on the verifier and print the invocations")
				(@arg check: --check "Emit and verify only, printing nothing on success")
			)
			(@arg path: "The model file. Reads from stdin if omitted")
	)
	.arg(
		Arg::with_name("no_color")
			.long("no-color")
			.help("Disable colored output")
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => {
			let output = if matches.is_present("run") {
				Output::Run
			} else if matches.is_present("check") {
				Output::Check
			} else {
				Output::Listing
			};

			Ok(
				Command::Run(
					Args {
						path: matches.value_of_os("path").map(PathBuf::from),
						output,
						color: !matches.is_present("no_color"),
					}
				)
			)
		}

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}
