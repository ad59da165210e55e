use std::path::Path;

use omlit::codec::{HostValue, Value};
use serde_json::{Map, Number, Value as Json};

use crate::cmd::CliError;

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Read a whole file as UTF-8 text.
pub(crate) fn read_text(path: &Path) -> Result<String, CliError> {
	std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}

/// Parse JSON text, labeling failures with `context`.
pub(crate) fn parse_json(text: &str, context: &str) -> Result<Json, CliError> {
	serde_json::from_str(text).map_err(|source| CliError::InvalidJson {
		context: context.to_owned(),
		source,
	})
}

/// Map a JSON document onto a host value.
///
/// Integral numbers that fit `i64` become integers; every other number is a float.
pub(crate) fn host_from_json(json: &Json) -> HostValue {
	match json {
		Json::Null => HostValue::Null,
		Json::Bool(value) => HostValue::Bool(*value),
		Json::Number(number) => match number.as_i64() {
			Some(value) => HostValue::Int(value),
			None => HostValue::Float(number.as_f64().unwrap_or(f64::NAN)),
		},
		Json::String(text) => HostValue::Str(text.clone()),
		Json::Array(items) => HostValue::Seq(items.iter().map(host_from_json).collect()),
		Json::Object(entries) => HostValue::Map(entries.iter().map(|(name, value)| (name.clone(), host_from_json(value))).collect()),
	}
}

/// Render a decoded value as JSON.
pub(crate) fn value_json(value: &Value) -> Json {
	match value {
		Value::Null => Json::Null,
		Value::Real(value) => Number::from_f64(*value).map_or(Json::Null, Json::Number),
		Value::Integer(value) => Json::from(*value),
		Value::Boolean(value) => Json::Bool(*value),
		Value::String(text) => Json::String(text.to_string()),
		Value::Identifier(ident) => Json::from(ident.as_str()),
		Value::Name(name) => Json::from(name.as_str()),
		Value::Member(member) => {
			let mut out = Map::new();
			out.insert("enum".to_owned(), Json::from(member.schema().home().as_str()));
			out.insert("member".to_owned(), Json::from(member.name()));
			out.insert("ordinal".to_owned(), Json::from(member.ordinal()));
			Json::Object(out)
		}
		Value::Record(record) => {
			let fields = record
				.fields()
				.iter()
				.map(|field| (field.name.to_string(), value_json(&field.value)))
				.collect::<Map<_, _>>();
			let mut out = Map::new();
			out.insert("record".to_owned(), Json::from(record.schema().home().as_str()));
			out.insert("fields".to_owned(), Json::Object(fields));
			Json::Object(out)
		}
		Value::Tuple(items) | Value::Sequence(items) => Json::Array(items.iter().map(value_json).collect()),
	}
}

#[cfg(test)]
mod tests;
