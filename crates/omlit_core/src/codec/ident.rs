use std::fmt;
use std::str::FromStr;

use crate::codec::{CodecError, Result};

/// Whether `text` is a single identifier: `(letter|_|$)(letter|digit|_|$)*`.
pub fn is_identifier(text: &str) -> bool {
	let bytes = text.as_bytes();
	let Some((first, rest)) = bytes.split_first() else {
		return false;
	};
	is_ident_start(*first) && rest.iter().all(|byte| is_ident_continue(*byte))
}

/// Whether `text` is a dotted name with an optional leading `.`.
pub fn is_dotted_name(text: &str) -> bool {
	let body = text.strip_prefix('.').unwrap_or(text);
	!body.is_empty() && body.split('.').all(is_identifier)
}

pub(crate) fn is_ident_start(byte: u8) -> bool {
	byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

pub(crate) fn is_ident_continue(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Simple identifier such as a variable or component name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Box<str>);

impl Identifier {
	/// Validate and wrap `text`.
	pub fn new(text: &str) -> Result<Self> {
		if !is_identifier(text) {
			return Err(CodecError::InvalidText {
				kind: "Identifier",
				text: text.to_owned(),
			});
		}
		Ok(Self(text.into()))
	}

	/// Borrow the identifier text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl FromStr for Identifier {
	type Err = CodecError;

	fn from_str(text: &str) -> Result<Self> {
		Self::new(text)
	}
}

impl AsRef<str> for Identifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Dotted class or type path, absolute when it starts with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(pub(crate) Box<str>);

impl Name {
	/// Validate and wrap `text`, preserving a leading `.` when present.
	pub fn new(text: &str) -> Result<Self> {
		if !is_dotted_name(text) {
			return Err(CodecError::InvalidText {
				kind: "Name",
				text: text.to_owned(),
			});
		}
		Ok(Self(text.into()))
	}

	/// Borrow the name text as written.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Whether the name carries a leading `.`.
	pub fn is_absolute(&self) -> bool {
		self.0.starts_with('.')
	}

	/// Name text without its leading `.`.
	pub fn relative(&self) -> &str {
		self.0.strip_prefix('.').unwrap_or(&self.0)
	}

	/// Same path with a leading `.`.
	pub fn to_absolute(&self) -> Self {
		if self.is_absolute() { self.clone() } else { Self(format!(".{}", self.0).into_boxed_str()) }
	}

	/// Compare two paths ignoring a leading `.` on either side.
	pub fn same_path(&self, other: &str) -> bool {
		self.relative() == other.strip_prefix('.').unwrap_or(other)
	}
}

impl From<Identifier> for Name {
	fn from(value: Identifier) -> Self {
		Self(value.0)
	}
}

impl FromStr for Name {
	type Err = CodecError;

	fn from_str(text: &str) -> Result<Self> {
		Self::new(text)
	}
}

impl AsRef<str> for Name {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
