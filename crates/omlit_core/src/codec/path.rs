use std::fmt;

use crate::codec::{CodecError, Result};

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named record field or tuple component.
	Field(String),
	/// Select a sequence or tuple element by zero-based index.
	Index(usize),
}

/// Position of a nested value, rendered as `$`, `$[2]`, `$[0].x`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
	/// Ordered sequence of path steps from the root.
	pub steps: Vec<PathStep>,
}

impl ValuePath {
	/// The root position.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether this is the root position.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	pub(crate) fn push(&mut self, step: PathStep) {
		self.steps.push(step);
	}

	pub(crate) fn pop(&mut self) {
		self.steps.pop();
	}

	pub(crate) fn truncate(&mut self, len: usize) {
		self.steps.truncate(len);
	}

	/// Parse `$`-rooted or bare path syntax: `x[1].y`, `$[0]`, `[2][3]`.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || CodecError::InvalidPath { path: input.to_owned() };

		let body = input.strip_prefix('$').unwrap_or(input);
		let bytes = body.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			match bytes[idx] {
				b'[' => {
					idx += 1;
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
						return Err(invalid());
					}
					let number = body[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					steps.push(PathStep::Index(number));
					idx += 1;
				}
				b'.' if bytes.get(idx + 1).is_some_and(|next| next.is_ascii_alphabetic() || *next == b'_') => {
					idx += 1;
				}
				byte if (byte.is_ascii_alphabetic() || byte == b'_') && (idx == 0 || bytes[idx - 1] == b'.') => {
					let start = idx;
					while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
						idx += 1;
					}
					steps.push(PathStep::Field(body[start..idx].to_owned()));
				}
				_ => return Err(invalid()),
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for ValuePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(idx) => write!(f, "[{idx}]")?,
			}
		}
		Ok(())
	}
}
