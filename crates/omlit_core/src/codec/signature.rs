//! Textual type signatures, the same syntax `TypeShape` and `TypeDescr` display with.

use crate::codec::ident::{is_dotted_name, is_ident_continue, is_identifier};
use crate::codec::{CodecError, LiteralValue, Result, SchemaRef, SchemaRegistry, TypeDescr};

/// Parse a signature such as `list[tuple[Real, Real]]` or `optional[.Pkg.Color]`.
///
/// Dotted words other than the built-in kinds are looked up in `registry`.
pub fn parse_signature(text: &str, registry: &SchemaRegistry) -> Result<TypeDescr> {
	let mut parser = SignatureParser { text, pos: 0, registry };
	let descr = parser.descr()?;
	parser.skip_whitespace();
	if parser.pos != text.len() {
		return Err(parser.error("trailing input"));
	}
	Ok(descr)
}

struct SignatureParser<'a> {
	text: &'a str,
	pos: usize,
	registry: &'a SchemaRegistry,
}

impl<'a> SignatureParser<'a> {
	fn error(&self, reason: &'static str) -> CodecError {
		CodecError::InvalidSignature {
			signature: self.text.to_owned(),
			at: self.pos,
			reason,
		}
	}

	fn peek(&self) -> Option<u8> {
		self.text.as_bytes().get(self.pos).copied()
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn eat(&mut self, byte: u8) -> bool {
		self.skip_whitespace();
		if self.peek() == Some(byte) {
			self.pos += 1;
			return true;
		}
		false
	}

	fn expect(&mut self, byte: u8, reason: &'static str) -> Result<()> {
		if self.eat(byte) { Ok(()) } else { Err(self.error(reason)) }
	}

	fn word(&mut self) -> Result<&'a str> {
		self.skip_whitespace();
		let start = self.pos;
		while self.peek().is_some_and(|byte| byte == b'.' || is_ident_continue(byte)) {
			self.pos += 1;
		}
		let text = self.text;
		let word = &text[start..self.pos];
		if !is_dotted_name(word) {
			self.pos = start;
			return Err(self.error("expected type name"));
		}
		Ok(word)
	}

	fn descr(&mut self) -> Result<TypeDescr> {
		let word = self.word()?;
		match word {
			"Real" => Ok(TypeDescr::Real),
			"Integer" => Ok(TypeDescr::Integer),
			"Boolean" => Ok(TypeDescr::Boolean),
			"String" => Ok(TypeDescr::String),
			"Identifier" => Ok(TypeDescr::Identifier),
			"Name" => Ok(TypeDescr::Name),
			"Component" => Ok(TypeDescr::Component),
			"none" => Ok(TypeDescr::NoneType),
			"list" => Ok(TypeDescr::list(self.single_argument()?)),
			"optional" => Ok(TypeDescr::optional(self.single_argument()?)),
			"union" => {
				self.expect(b'[', "expected \"[\"")?;
				let mut arms = vec![self.descr()?];
				while self.eat(b',') {
					arms.push(self.descr()?);
				}
				self.expect(b']', "expected \"]\"")?;
				Ok(TypeDescr::Union(arms))
			}
			"tuple" => self.tuple(),
			"literal" => self.literal(),
			home => match self.registry.lookup(home)? {
				SchemaRef::Record(schema) if schema.is_fixed_component() => Ok(TypeDescr::Component),
				SchemaRef::Record(schema) => Ok(TypeDescr::Record(schema)),
				SchemaRef::Enum(schema) => Ok(TypeDescr::Enum(schema)),
			},
		}
	}

	fn single_argument(&mut self) -> Result<TypeDescr> {
		self.expect(b'[', "expected \"[\"")?;
		let inner = self.descr()?;
		self.expect(b']', "expected \"]\"")?;
		Ok(inner)
	}

	fn tuple(&mut self) -> Result<TypeDescr> {
		self.expect(b'[', "expected \"[\"")?;
		let mut parts = Vec::new();
		if self.eat(b']') {
			return Ok(TypeDescr::Tuple(parts));
		}
		loop {
			let mark = self.pos;
			let word = self.word()?;
			let part = if is_identifier(word) && self.eat(b':') {
				(Some(word.to_owned()), self.descr()?)
			} else {
				self.pos = mark;
				(None, self.descr()?)
			};
			parts.push(part);
			if !self.eat(b',') {
				break;
			}
		}
		self.expect(b']', "expected \",\" or \"]\"")?;
		Ok(TypeDescr::Tuple(parts))
	}

	fn literal(&mut self) -> Result<TypeDescr> {
		self.expect(b'[', "expected \"[\"")?;
		let mut values = vec![self.literal_value()?];
		while self.eat(b',') {
			values.push(self.literal_value()?);
		}
		self.expect(b']', "expected \",\" or \"]\"")?;
		Ok(TypeDescr::Literal(values))
	}

	fn literal_value(&mut self) -> Result<LiteralValue> {
		self.skip_whitespace();
		match self.peek() {
			Some(b'"') => self.string().map(LiteralValue::String),
			Some(b'+' | b'-' | b'0'..=b'9') => {
				let start = self.pos;
				self.pos += 1;
				while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
					self.pos += 1;
				}
				let text = self.text;
				text[start..self.pos].parse().map(LiteralValue::Integer).map_err(|_| {
					self.pos = start;
					self.error("expected integer literal")
				})
			}
			_ => match self.word()? {
				"true" => Ok(LiteralValue::Boolean(true)),
				"false" => Ok(LiteralValue::Boolean(false)),
				_ => Err(self.error("expected literal value")),
			},
		}
	}

	fn string(&mut self) -> Result<String> {
		let open = self.pos;
		self.pos += 1;
		let mut out = String::new();
		let mut escaped = false;
		let text = self.text;
		for (offset, ch) in text[self.pos..].char_indices() {
			match ch {
				_ if escaped => {
					out.push(ch);
					escaped = false;
				}
				'\\' => escaped = true,
				'"' => {
					self.pos += offset + 1;
					return Ok(out);
				}
				_ => out.push(ch),
			}
		}
		self.pos = open;
		Err(self.error("unterminated string"))
	}
}
