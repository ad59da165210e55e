use std::fmt::{self, Write as _};

use crate::codec::Value;

/// Serializer layout switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
	/// Put each record field on its own indented line.
	pub pretty: bool,
}

impl FormatOptions {
	/// Multi-line record layout.
	pub fn pretty() -> Self {
		Self { pretty: true }
	}
}

/// Serialize `value` as single-line literal text.
pub fn to_literal(value: &Value) -> String {
	format_literal(value, &FormatOptions::default())
}

/// Serialize `value` as literal text.
pub fn format_literal(value: &Value, opt: &FormatOptions) -> String {
	Literal { value, opt: *opt }.to_string()
}

struct Literal<'a> {
	value: &'a Value,
	opt: FormatOptions,
}

impl fmt::Display for Literal<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_value(f, self.value, self.opt, 0)
	}
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, opt: FormatOptions, indent: usize) -> fmt::Result {
	match value {
		Value::Null => Ok(()),
		Value::Real(value) => write!(f, "{value:?}"),
		Value::Integer(value) => write!(f, "{value}"),
		Value::Boolean(value) => write!(f, "{value}"),
		Value::String(text) => write_string(f, text),
		Value::Identifier(ident) => f.write_str(ident.as_str()),
		Value::Name(name) => f.write_str(name.as_str()),
		// A dotted member name only resolves through the verbatim lookup.
		Value::Member(member) if member.name().contains('.') => f.write_str(member.name()),
		Value::Member(member) => write!(f, "{}.{}", member.schema().home(), member.name()),
		Value::Sequence(items) => write_items(f, ('{', '}'), items, opt, indent),
		Value::Tuple(items) => write_items(f, ('(', ')'), items, opt, indent),
		Value::Record(record) => {
			let home = record.schema().home().relative();
			write!(f, "record {home}")?;
			for field in record.fields() {
				if opt.pretty {
					f.write_char('\n')?;
					write_indent(f, indent + 1)?;
				} else {
					f.write_char(' ')?;
				}
				write!(f, "{} = ", field.name)?;
				write_value(f, &field.value, opt, indent + 1)?;
				f.write_char(',')?;
			}
			if opt.pretty {
				f.write_char('\n')?;
				write_indent(f, indent)?;
			} else {
				f.write_char(' ')?;
			}
			write!(f, "end {home};")
		}
	}
}

fn write_items(f: &mut fmt::Formatter<'_>, (open, close): (char, char), items: &[Value], opt: FormatOptions, indent: usize) -> fmt::Result {
	f.write_char(open)?;
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write_value(f, item, opt, indent)?;
	}
	f.write_char(close)
}

fn write_indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
	for _ in 0..level {
		f.write_str("    ")?;
	}
	Ok(())
}

fn write_string(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
	f.write_char('"')?;
	for ch in text.chars() {
		match ch {
			'"' => f.write_str("\\\"")?,
			'\\' => f.write_str("\\\\")?,
			'\n' => f.write_str("\\n")?,
			'\r' => f.write_str("\\r")?,
			'\t' => f.write_str("\\t")?,
			'\u{07}' => f.write_str("\\a")?,
			'\u{08}' => f.write_str("\\b")?,
			'\u{0b}' => f.write_str("\\v")?,
			'\u{0c}' => f.write_str("\\f")?,
			other => f.write_char(other)?,
		}
	}
	f.write_char('"')
}
