use std::path::Path;

use omlit::codec::{EnumSchema, RecordSchema, SchemaRegistry, parse_signature, resolve};
use serde::Deserialize;
use tracing::debug;

use crate::cmd::CliError;
use crate::cmd::util::read_text;

/// JSON schema document: enumerations first, then records in dependency order.
#[derive(Debug, Deserialize)]
struct SchemaFile {
	#[serde(default)]
	enums: Vec<EnumEntry>,
	#[serde(default)]
	records: Vec<RecordEntry>,
}

#[derive(Debug, Deserialize)]
struct EnumEntry {
	home: String,
	members: Vec<MemberEntry>,
}

/// Bare names take ordinal `position + 1`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MemberEntry {
	Bare(String),
	Explicit { name: String, ordinal: i64 },
}

#[derive(Debug, Deserialize)]
struct RecordEntry {
	home: String,
	fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
	name: String,
	#[serde(rename = "type")]
	signature: String,
}

/// Build a registry with the built-in schemas plus those declared in `path`.
pub(crate) fn load_registry(path: Option<&Path>) -> Result<SchemaRegistry, CliError> {
	let mut registry = SchemaRegistry::with_builtins();
	let Some(path) = path else {
		return Ok(registry);
	};

	let text = read_text(path)?;
	let file: SchemaFile = serde_json::from_str(&text).map_err(|source| CliError::InvalidJson {
		context: path.display().to_string(),
		source,
	})?;

	for entry in file.enums {
		let members = entry.members.into_iter().zip(1_i64..).map(|(member, position)| match member {
			MemberEntry::Bare(name) => (name, position),
			MemberEntry::Explicit { name, ordinal } => (name, ordinal),
		});
		registry.register_enum(EnumSchema::new(&entry.home, members)?)?;
	}

	for entry in file.records {
		let mut fields = Vec::with_capacity(entry.fields.len());
		for field in entry.fields {
			let shape = resolve(&parse_signature(&field.signature, &registry)?)?;
			fields.push((field.name, shape));
		}
		registry.register_record(RecordSchema::new(&entry.home, fields)?)?;
	}

	debug!(
		path = %path.display(),
		enums = registry.enums().count(),
		records = registry.records().count(),
		"loaded schema file"
	);
	Ok(registry)
}
