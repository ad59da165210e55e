use std::sync::Arc;

use tracing::trace;

use crate::codec::ident::is_identifier;
use crate::codec::value::{FieldValue, MemberValue, RecordValue};
use crate::codec::{
	CodecError, EnumSchema, ErrorClass, FieldProblem, Identifier, Lexer, Name, PathStep, RecordSchema, Result, ScalarKind, Token, TokenKind, TupleShape, TypeShape,
	Value, ValuePath, fixed_component_schema,
};

/// Runtime limits and behavior switches for literal decoding.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
	/// Maximum nesting depth of arrays, tuples, and records.
	pub max_depth: u32,
	/// Accept a record's last field without its trailing `,`.
	///
	/// An optional last field may then also be empty: `label = end P;`.
	pub lenient_field_commas: bool,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			lenient_field_commas: true,
		}
	}
}

impl ParseOptions {
	/// Preset that accepts exactly the documented record grammar.
	pub fn strict() -> Self {
		Self {
			lenient_field_commas: false,
			..Self::default()
		}
	}
}

/// Decode literal `text` against `shape` with default options.
pub fn parse(shape: &TypeShape, text: &str) -> Result<Value> {
	parse_with(shape, text, &ParseOptions::default())
}

/// Decode literal `text` against `shape`.
pub fn parse_with(shape: &TypeShape, text: &str, opt: &ParseOptions) -> Result<Value> {
	trace!(%shape, len = text.len(), "parse literal");
	let mut parser = Parser::new(text, *opt)?;
	let value = parser.value(shape)?;
	if parser.token.kind != TokenKind::Eof {
		return Err(CodecError::DecodeTrailing {
			at: parser.token.at,
			found: parser.token.kind.to_string(),
		});
	}
	Ok(value)
}

struct Parser<'a> {
	lexer: Lexer<'a>,
	token: Token<'a>,
	opt: ParseOptions,
	path: ValuePath,
	depth: u32,
}

struct Checkpoint<'a> {
	lexer: Lexer<'a>,
	token: Token<'a>,
	path_len: usize,
	depth: u32,
}

impl<'a> Parser<'a> {
	fn new(text: &'a str, opt: ParseOptions) -> Result<Self> {
		let mut lexer = Lexer::new(text);
		let token = lexer.next_token()?;
		Ok(Self {
			lexer,
			token,
			opt,
			path: ValuePath::root(),
			depth: 0,
		})
	}

	fn bump(&mut self) -> Result<Token<'a>> {
		let next = self.lexer.next_token()?;
		Ok(std::mem::replace(&mut self.token, next))
	}

	fn checkpoint(&self) -> Checkpoint<'a> {
		Checkpoint {
			lexer: self.lexer.clone(),
			token: self.token.clone(),
			path_len: self.path.steps.len(),
			depth: self.depth,
		}
	}

	fn restore(&mut self, checkpoint: Checkpoint<'a>) {
		self.lexer = checkpoint.lexer;
		self.token = checkpoint.token;
		self.path.truncate(checkpoint.path_len);
		self.depth = checkpoint.depth;
	}

	fn mismatch(&self, expected: impl ToString) -> CodecError {
		CodecError::DecodeMismatch {
			path: self.path.clone(),
			at: self.token.at,
			expected: expected.to_string(),
			found: self.token.kind.to_string(),
		}
	}

	fn expect(&mut self, kind: TokenKind<'a>, expected: &str) -> Result<()> {
		if self.token.kind != kind {
			return Err(self.mismatch(expected));
		}
		self.bump()?;
		Ok(())
	}

	fn at_empty(&self) -> bool {
		matches!(self.token.kind, TokenKind::Eof | TokenKind::Comma | TokenKind::RBrace | TokenKind::RParen)
	}

	/// `end` right after `=` is an empty last field when the trailing comma may be omitted.
	fn at_empty_last_field(&self) -> bool {
		self.opt.lenient_field_commas && self.token.kind == TokenKind::Word("end")
	}

	fn enter(&mut self) -> Result<()> {
		if self.depth >= self.opt.max_depth {
			return Err(CodecError::DecodeDepthExceeded { max_depth: self.opt.max_depth });
		}
		self.depth += 1;
		Ok(())
	}

	fn value(&mut self, shape: &TypeShape) -> Result<Value> {
		self.enter()?;
		let value = match shape {
			TypeShape::Optional(inner) => {
				if self.at_empty() {
					Value::Null
				} else {
					self.value(inner)?
				}
			}
			TypeShape::SequenceOf(inner) => self.sequence(inner)?,
			TypeShape::TupleOf(tuple) => self.tuple(shape, tuple)?,
			TypeShape::UnionOf(kinds) => self.union(shape, kinds)?,
			TypeShape::Scalar(kind) => self.scalar(kind)?,
		};
		self.depth -= 1;
		Ok(value)
	}

	fn sequence(&mut self, inner: &TypeShape) -> Result<Value> {
		self.expect(TokenKind::LBrace, "\"{\"")?;
		let mut items = Vec::new();
		if self.token.kind == TokenKind::RBrace {
			self.bump()?;
			return Ok(Value::Sequence(items));
		}
		loop {
			self.path.push(PathStep::Index(items.len()));
			items.push(self.value(inner)?);
			self.path.pop();
			match self.token.kind {
				TokenKind::Comma => {
					self.bump()?;
				}
				TokenKind::RBrace => {
					self.bump()?;
					return Ok(Value::Sequence(items));
				}
				_ => return Err(self.mismatch("\",\" or \"}\"")),
			}
		}
	}

	fn tuple(&mut self, shape: &TypeShape, tuple: &TupleShape) -> Result<Value> {
		if let (TokenKind::Word("record"), Some(schema)) = (&self.token.kind, &tuple.record) {
			let schema = schema.clone();
			return self.record(&schema).map(Value::Record);
		}
		if self.token.kind != TokenKind::LParen {
			return Err(self.mismatch(shape));
		}

		let open = self.token.at;
		self.bump()?;
		let expected = tuple.arity();
		let mut items = Vec::with_capacity(expected);
		if self.token.kind == TokenKind::RParen {
			self.bump()?;
			if expected != 0 {
				return Err(self.arity_error(open, expected, 0));
			}
			return Ok(Value::Tuple(items));
		}

		loop {
			let Some(part) = tuple.parts.get(items.len()) else {
				let got = items.len() + self.skip_remaining_elements()?;
				return Err(self.arity_error(open, expected, got));
			};
			let step = match &part.name {
				Some(name) => PathStep::Field(name.to_string()),
				None => PathStep::Index(items.len()),
			};
			self.path.push(step);
			items.push(self.value(&part.shape)?);
			self.path.pop();
			match self.token.kind {
				TokenKind::Comma => {
					self.bump()?;
				}
				TokenKind::RParen => {
					self.bump()?;
					if items.len() != expected {
						return Err(self.arity_error(open, expected, items.len()));
					}
					return Ok(Value::Tuple(items));
				}
				_ => return Err(self.mismatch("\",\" or \")\"")),
			}
		}
	}

	fn arity_error(&self, at: usize, expected: usize, got: usize) -> CodecError {
		CodecError::DecodeArity {
			path: self.path.clone(),
			at,
			expected,
			got,
		}
	}

	/// Skip elements up to and including the closing `)`, returning how many were skipped.
	fn skip_remaining_elements(&mut self) -> Result<usize> {
		let mut count = 0;
		loop {
			if !self.at_empty() {
				self.skip_any()?;
			}
			count += 1;
			match self.token.kind {
				TokenKind::Comma => {
					self.bump()?;
				}
				TokenKind::RParen => {
					self.bump()?;
					return Ok(count);
				}
				_ => return Err(self.mismatch("\",\" or \")\"")),
			}
		}
	}

	/// Consume one value of any production without building it.
	fn skip_any(&mut self) -> Result<()> {
		self.enter()?;
		match self.token.kind {
			TokenKind::LBrace | TokenKind::LParen => {
				let close = if self.token.kind == TokenKind::LBrace { TokenKind::RBrace } else { TokenKind::RParen };
				self.bump()?;
				if self.token.kind != close {
					loop {
						if !self.at_empty() {
							self.skip_any()?;
						}
						if self.token.kind == TokenKind::Comma {
							self.bump()?;
							continue;
						}
						break;
					}
				}
				if self.token.kind != close {
					return Err(self.mismatch(&close));
				}
				self.bump()?;
			}
			TokenKind::Word("record") => {
				self.bump()?;
				self.expect_word("record name")?;
				while self.token.kind != TokenKind::Word("end") {
					self.expect_word("field name or end")?;
					self.expect(TokenKind::Equals, "\"=\"")?;
					if !self.at_empty() && !self.at_empty_last_field() {
						self.skip_any()?;
					}
					if self.token.kind == TokenKind::Comma {
						self.bump()?;
					} else if !(self.opt.lenient_field_commas && self.token.kind == TokenKind::Word("end")) {
						return Err(self.mismatch("\",\""));
					}
				}
				self.bump()?;
				self.expect_word("record name")?;
				self.expect(TokenKind::Semicolon, "\";\"")?;
			}
			TokenKind::Number { .. } | TokenKind::Str(_) | TokenKind::Word(_) => {
				self.bump()?;
			}
			_ => return Err(self.mismatch("value")),
		}
		self.depth -= 1;
		Ok(())
	}

	fn expect_word(&mut self, expected: &str) -> Result<&'a str> {
		match self.token.kind {
			TokenKind::Word(word) => {
				self.bump()?;
				Ok(word)
			}
			_ => Err(self.mismatch(expected)),
		}
	}

	fn union(&mut self, shape: &TypeShape, kinds: &[ScalarKind]) -> Result<Value> {
		for kind in kinds {
			let checkpoint = self.checkpoint();
			match self.scalar(kind) {
				Ok(value) => return Ok(value),
				Err(err) if err.class() == ErrorClass::Decode && !matches!(err, CodecError::DecodeDepthExceeded { .. }) => {
					trace!(candidate = %kind, error = %err, "union candidate rejected");
					self.restore(checkpoint);
				}
				Err(err) => return Err(err),
			}
		}
		Err(self.mismatch(shape))
	}

	fn scalar(&mut self, kind: &ScalarKind) -> Result<Value> {
		match kind {
			ScalarKind::Real => self.real(),
			ScalarKind::Integer => self.integer(),
			ScalarKind::Boolean => match self.token.kind {
				TokenKind::Word("true") => {
					self.bump()?;
					Ok(Value::Boolean(true))
				}
				TokenKind::Word("false") => {
					self.bump()?;
					Ok(Value::Boolean(false))
				}
				_ => Err(self.mismatch(kind)),
			},
			ScalarKind::String => match &mut self.token.kind {
				TokenKind::Str(text) => {
					let text = std::mem::take(text);
					self.bump()?;
					Ok(Value::String(text.into_boxed_str()))
				}
				_ => Err(self.mismatch(kind)),
			},
			ScalarKind::Identifier => {
				let (at, word) = self.word(kind)?;
				let ident = Identifier::new(word).map_err(|_| self.invalid_text(at, "Identifier", word))?;
				Ok(Value::Identifier(ident))
			}
			ScalarKind::Name => {
				let (at, word) = self.word(kind)?;
				let name = Name::new(word).map_err(|_| self.invalid_text(at, "Name", word))?;
				Ok(Value::Name(name))
			}
			ScalarKind::EnumMember(schema) => self.member(kind, schema),
			ScalarKind::Record(schema) => self.record(schema).map(Value::Record),
			ScalarKind::FixedComponent => self.record(&fixed_component_schema()).map(Value::Record),
		}
	}

	fn word(&mut self, kind: &ScalarKind) -> Result<(usize, &'a str)> {
		match self.token.kind {
			TokenKind::Word(word) => {
				let at = self.token.at;
				self.bump()?;
				Ok((at, word))
			}
			_ => Err(self.mismatch(kind)),
		}
	}

	fn invalid_text(&self, at: usize, kind: &'static str, literal: &str) -> CodecError {
		CodecError::DecodeInvalidText {
			path: self.path.clone(),
			at,
			kind,
			literal: literal.to_owned(),
		}
	}

	fn real(&mut self) -> Result<Value> {
		let TokenKind::Number { text, .. } = self.token.kind else {
			return Err(self.mismatch(ScalarKind::Real));
		};
		let at = self.token.at;
		let value = text
			.parse::<f64>()
			.ok()
			.filter(|value| value.is_finite())
			.ok_or_else(|| self.invalid_text(at, "Real", text))?;
		self.bump()?;
		Ok(Value::Real(value))
	}

	fn integer(&mut self) -> Result<Value> {
		let TokenKind::Number { text, integral: true } = self.token.kind else {
			return Err(self.mismatch(ScalarKind::Integer));
		};
		let at = self.token.at;
		let value = text.parse::<i64>().map_err(|_| self.invalid_text(at, "Integer", text))?;
		self.bump()?;
		Ok(Value::Integer(value))
	}

	fn member(&mut self, kind: &ScalarKind, schema: &Arc<EnumSchema>) -> Result<Value> {
		let (at, word) = self.word(kind)?;
		let index = schema.resolve_literal(word).ok_or_else(|| CodecError::DecodeUnknownMember {
			path: self.path.clone(),
			at,
			home: schema.home().to_string(),
			literal: word.to_owned(),
		})?;
		Ok(Value::Member(MemberValue::new(schema.clone(), index)))
	}

	fn record(&mut self, schema: &Arc<RecordSchema>) -> Result<RecordValue> {
		if self.token.kind != TokenKind::Word("record") {
			return Err(self.mismatch(format!("record {}", schema.home())));
		}
		self.bump()?;
		self.expect_word("record name")?;

		let mut slots: Vec<Option<Value>> = vec![None; schema.fields().len()];
		loop {
			let at = self.token.at;
			let name = match self.token.kind {
				TokenKind::Word("end") => break,
				TokenKind::Word(word) if is_identifier(word) => word,
				_ => return Err(self.mismatch("field name or end")),
			};
			self.bump()?;
			self.expect(TokenKind::Equals, "\"=\"")?;

			let Some((idx, field)) = schema.field(name) else {
				return Err(self.field_error(at, schema, name, FieldProblem::Unexpected));
			};
			if slots[idx].is_some() {
				return Err(self.field_error(at, schema, name, FieldProblem::Duplicate));
			}
			self.path.push(PathStep::Field(name.to_owned()));
			let value = if self.at_empty_last_field() && matches!(field.shape, TypeShape::Optional(_)) {
				Value::Null
			} else {
				self.value(&field.shape)?
			};
			self.path.pop();
			slots[idx] = Some(value);

			match self.token.kind {
				TokenKind::Comma => {
					self.bump()?;
				}
				TokenKind::Word("end") if self.opt.lenient_field_commas => {}
				_ => return Err(self.mismatch("\",\"")),
			}
		}

		let end_at = self.token.at;
		self.bump()?;
		self.expect_word("record name")?;
		self.expect(TokenKind::Semicolon, "\";\"")?;

		let mut fields = Vec::with_capacity(slots.len());
		for (field, slot) in schema.fields().iter().zip(slots) {
			let Some(value) = slot else {
				return Err(self.field_error(end_at, schema, &field.name, FieldProblem::Missing));
			};
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}
		Ok(RecordValue::new(schema.clone(), fields))
	}

	fn field_error(&self, at: usize, schema: &RecordSchema, field: &str, problem: FieldProblem) -> CodecError {
		CodecError::DecodeField {
			path: self.path.clone(),
			at,
			home: schema.home().to_string(),
			field: field.to_owned(),
			problem,
		}
	}
}

#[cfg(test)]
mod tests;
