#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cmd;

use cmd::CliError;

#[derive(Parser)]
#[command(name = "omlit", about = "Typed literal codec inspection tools")]
struct Cli {
	/// Raise log verbosity; repeat for more detail. `RUST_LOG` takes precedence.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Resolve a type signature and print its shape.
	Shape(cmd::shape::Args),
	/// Decode literal text against a type signature.
	Parse(cmd::parse::Args),
	/// Cast a JSON host value and print the outbound literal.
	Cast(cmd::cast::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn run(command: Commands) -> Result<(), CliError> {
	match command {
		Commands::Shape(args) => {
			debug!(signature = %args.signature, "shape command");
			cmd::shape::run(args)
		}
		Commands::Parse(args) => {
			debug!(signature = %args.signature, "parse command");
			cmd::parse::run(args)
		}
		Commands::Cast(args) => {
			debug!(signature = %args.signature, "cast command");
			cmd::cast::run(args)
		}
	}
}
