use tracing::trace;

use crate::codec::{CodecError, Describe, Identifier, Name, ParseOptions, Result, Value, parse_with, resolve};

/// Host types constructible from a decoded value.
pub trait FromValue: Sized {
	/// Convert `value`, failing when its kind does not fit.
	fn from_value(value: Value) -> Result<Self>;
}

fn host_mismatch(expected: &'static str, found: &Value) -> CodecError {
	CodecError::HostMismatch {
		expected,
		found: found.kind_label().to_owned(),
	}
}

/// Decode `text` straight into `T` using its static description.
pub fn decode<T: Describe + FromValue>(text: &str) -> Result<T> {
	decode_with(text, &ParseOptions::default())
}

/// Decode `text` into `T` with explicit options.
pub fn decode_with<T: Describe + FromValue>(text: &str, opt: &ParseOptions) -> Result<T> {
	let descr = T::describe();
	trace!(%descr, "typed decode");
	let shape = resolve(&descr)?;
	T::from_value(parse_with(&shape, text, opt)?)
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self> {
		Ok(value)
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Real(value) => Ok(value),
			Value::Integer(value) => Ok(value as f64),
			other => Err(host_mismatch("f64", &other)),
		}
	}
}

impl FromValue for i64 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Integer(value) => Ok(value),
			other => Err(host_mismatch("i64", &other)),
		}
	}
}

impl FromValue for i32 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Integer(value) => i32::try_from(value).map_err(|_| CodecError::HostMismatch {
				expected: "i32",
				found: format!("Integer {value}"),
			}),
			other => Err(host_mismatch("i32", &other)),
		}
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Boolean(value) => Ok(value),
			other => Err(host_mismatch("bool", &other)),
		}
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::String(text) => Ok(text.into_string()),
			other => Err(host_mismatch("String", &other)),
		}
	}
}

impl FromValue for Identifier {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Identifier(ident) => Ok(ident),
			other => Err(host_mismatch("Identifier", &other)),
		}
	}
}

impl FromValue for Name {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Name(name) => Ok(name),
			Value::Identifier(ident) => Ok(ident.into()),
			other => Err(host_mismatch("Name", &other)),
		}
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(host_mismatch("Vec", &other)),
		}
	}
}

impl<A: FromValue, B: FromValue> FromValue for (A, B) {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Tuple(items) => match <[Value; 2]>::try_from(items) {
				Ok([a, b]) => Ok((A::from_value(a)?, B::from_value(b)?)),
				Err(items) => Err(host_mismatch("2-tuple", &Value::Tuple(items))),
			},
			other => Err(host_mismatch("2-tuple", &other)),
		}
	}
}

impl<A: FromValue, B: FromValue, C: FromValue> FromValue for (A, B, C) {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Tuple(items) => match <[Value; 3]>::try_from(items) {
				Ok([a, b, c]) => Ok((A::from_value(a)?, B::from_value(b)?, C::from_value(c)?)),
				Err(items) => Err(host_mismatch("3-tuple", &Value::Tuple(items))),
			},
			other => Err(host_mismatch("3-tuple", &other)),
		}
	}
}

#[cfg(test)]
mod tests;
