use std::path::PathBuf;

use omlit::codec::{ResolveMode, parse_signature, resolve_with};

use crate::cmd::CliError;
use crate::cmd::print::print_shape;
use crate::cmd::schema_file::load_registry;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Type signature, e.g. `list[tuple[Real, Real]]`.
	pub signature: String,
	#[arg(long)]
	pub schemas: Option<PathBuf>,
	/// Resolve for casting, keeping the component record atomic.
	#[arg(long)]
	pub cast: bool,
	#[arg(long)]
	pub json: bool,
}

/// Resolve a signature and print the resulting shape.
pub fn run(args: Args) -> Result<(), CliError> {
	let registry = load_registry(args.schemas.as_deref())?;
	let descr = parse_signature(&args.signature, &registry)?;
	let mode = if args.cast { ResolveMode::Cast } else { ResolveMode::Decode };
	let shape = resolve_with(&descr, mode)?;

	if args.json {
		return emit_json(&ShapeJson {
			signature: args.signature,
			mode: if args.cast { "cast" } else { "decode" },
			shape: shape.to_string(),
			sequence_depth: shape.sequence_depth(),
		});
	}

	println!("shape: {shape}");
	print_shape(&shape, 0);
	Ok(())
}

#[derive(serde::Serialize)]
struct ShapeJson {
	signature: String,
	mode: &'static str,
	shape: String,
	sequence_depth: usize,
}
