mod args;

use std::path::Path;

use callgen::{
	driver::{self, Evaluator},
	fmt,
	machine::{Machine, Value},
	source::Source,
	symbol::Interner,
	term::color,
};
use tracing_subscriber::EnvFilter;

use args::{Args, Command, Output};


/// The environment variable holding the log filter.
const LOG_ENV: &str = "CALLGEN_LOG";


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let exit_code = match command {
		Command::Run(args) => run(args),
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			0
		},
	};

	std::process::exit(exit_code)
}


/// Install the log subscriber. Logging is disabled unless the filter variable is set.
fn init_logging() {
	if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.with_target(false)
			.init();
	}
}


fn run(args: Args) -> i32 {
	color::set_enabled(args.color);
	init_logging();

	let source = match &args.path {
		Some(path) => Source::from_path(path.as_path()),
		None => Source::from_reader(Path::new("<stdin>"), std::io::stdin().lock()),
	};

	let source = match source {
		Ok(source) => source,
		Err(error) => {
			let path = args.path.as_deref().unwrap_or_else(|| Path::new("<stdin>"));
			eprintln!("{}", driver::Error::from(error).in_file(path));
			return 1;
		}
	};

	let mut interner = Interner::new();

	// ----------------------------------------------------------------------------------------
	let program = match driver::load(&source, &mut interner) {
		Ok(program) => program,
		Err(error) => {
			eprintln!("{}", error.in_file(&source.path));
			return 1;
		}
	};

	tracing::debug!(calls = program.calls.len(), locals = program.locals.len(), "loaded model");

	let mut evaluator = Evaluator::new(&program.locals);

	if let Err(error) = evaluator.emit_program(&program) {
		eprintln!("{}", fmt::Show(&error, &interner));
		return 1;
	}

	// ----------------------------------------------------------------------------------------
	if args.output == Output::Listing {
		print!("{}", fmt::Show(evaluator.listing(), &interner));
		return 0;
	}

	let mut machine = Machine::default();

	for (slot, ty) in evaluator.locals() {
		machine.init_local(*slot, ty.clone(), Value::Opaque);
	}

	let result = machine
		.run(evaluator.listing().instructions())
		.and_then(|()| machine.check_balanced());

	if let Err(fault) = result {
		eprintln!("{}", fmt::Show(&fault, &interner));
		return 1;
	}

	if args.output == Output::Run {
		for invocation in machine.invocations() {
			println!("{}", fmt::Show(invocation, &interner));
		}
	}

	0
}
