use std::path::PathBuf;

use omlit::codec::{ParseOptions, ValuePath, parse_signature, parse_with, resolve};

use crate::cmd::CliError;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::schema_file::load_registry;
use crate::cmd::util::{emit_json, read_text, value_json};

#[derive(clap::Args)]
pub struct Args {
	/// Type signature the literal is decoded against.
	pub signature: String,
	/// Literal text; read from `--file` when omitted.
	pub text: Option<String>,
	#[arg(long)]
	pub file: Option<PathBuf>,
	#[arg(long)]
	pub schemas: Option<PathBuf>,
	/// Value path such as `$[0].name` to print instead of the whole value.
	#[arg(long)]
	pub select: Option<String>,
	/// Require a comma after every record field.
	#[arg(long)]
	pub strict: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode literal text and print the value.
pub fn run(args: Args) -> Result<(), CliError> {
	let registry = load_registry(args.schemas.as_deref())?;
	let shape = resolve(&parse_signature(&args.signature, &registry)?)?;

	let text = match (args.text, &args.file) {
		(Some(text), _) => text,
		(None, Some(path)) => read_text(path)?,
		(None, None) => return Err(CliError::MissingInput),
	};

	let mut options = if args.strict { ParseOptions::strict() } else { ParseOptions::default() };
	if let Some(max_depth) = args.max_depth {
		options.max_depth = max_depth;
	}

	let value = parse_with(&shape, &text, &options)?;
	let path = match &args.select {
		Some(path) => ValuePath::parse(path)?,
		None => ValuePath::root(),
	};
	let selected = value.select(&path).ok_or_else(|| CliError::EmptySelection { path: path.to_string() })?;

	if args.json {
		return emit_json(&ParseJson {
			shape: shape.to_string(),
			path: path.to_string(),
			kind: selected.kind_label(),
			sequence_depth: selected.sequence_depth(),
			value: value_json(selected),
		});
	}

	println!("shape: {shape}");
	if !path.is_root() {
		println!("path: {path}");
	}
	print_value(selected, 0, 0, PrintOptions::default());
	Ok(())
}

#[derive(serde::Serialize)]
struct ParseJson {
	shape: String,
	path: String,
	kind: &'static str,
	sequence_depth: usize,
	value: serde_json::Value,
}
