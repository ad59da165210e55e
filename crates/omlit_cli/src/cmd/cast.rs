use std::path::PathBuf;

use omlit::codec::{CastOptions, FormatOptions, cast_with, format_literal, parse_signature, resolve_for_cast};

use crate::cmd::CliError;
use crate::cmd::schema_file::load_registry;
use crate::cmd::util::{emit_json, host_from_json, parse_json, value_json};

#[derive(clap::Args)]
pub struct Args {
	/// Type signature the value is cast into.
	pub signature: String,
	/// Host value as JSON; objects become records.
	pub value: String,
	#[arg(long)]
	pub schemas: Option<PathBuf>,
	/// Reject host sequences for non-list shapes instead of casting element-wise.
	#[arg(long = "no-broadcast")]
	pub no_broadcast: bool,
	/// Put record fields on separate lines.
	#[arg(long)]
	pub pretty: bool,
	#[arg(long)]
	pub json: bool,
}

/// Cast a JSON host value and print its literal text.
pub fn run(args: Args) -> Result<(), CliError> {
	let registry = load_registry(args.schemas.as_deref())?;
	let shape = resolve_for_cast(&parse_signature(&args.signature, &registry)?)?;
	let host = host_from_json(&parse_json(&args.value, "host value")?);

	let options = if args.no_broadcast { CastOptions::exact() } else { CastOptions::default() };
	let value = cast_with(&shape, &host, &options)?;
	let literal = format_literal(&value, &FormatOptions { pretty: args.pretty });

	if args.json {
		return emit_json(&CastJson {
			shape: shape.to_string(),
			literal,
			value: value_json(&value),
		});
	}

	println!("{literal}");
	Ok(())
}

#[derive(serde::Serialize)]
struct CastJson {
	shape: String,
	literal: String,
	value: serde_json::Value,
}
