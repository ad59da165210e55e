use std::fmt;

use crate::codec::ident::{is_ident_continue, is_ident_start};
use crate::codec::{CodecError, Result};

/// Lexical category of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
	/// `{`
	LBrace,
	/// `}`
	RBrace,
	/// `(`
	LParen,
	/// `)`
	RParen,
	/// `,`
	Comma,
	/// `=`
	Equals,
	/// `;`
	Semicolon,
	/// Numeric literal text; integral when it has neither fraction nor exponent.
	Number {
		/// Literal text including sign.
		text: &'a str,
		/// Whether the text matches the integer production.
		integral: bool,
	},
	/// Quoted string with escapes already resolved.
	Str(String),
	/// Dotted name, keyword, or boolean token.
	Word(&'a str),
	/// End of input.
	Eof,
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	/// Token category and payload.
	pub kind: TokenKind<'a>,
	/// Byte offset of the first character.
	pub at: usize,
}

impl fmt::Display for TokenKind<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::LBrace => f.write_str("\"{\""),
			Self::RBrace => f.write_str("\"}\""),
			Self::LParen => f.write_str("\"(\""),
			Self::RParen => f.write_str("\")\""),
			Self::Comma => f.write_str("\",\""),
			Self::Equals => f.write_str("\"=\""),
			Self::Semicolon => f.write_str("\";\""),
			Self::Number { text, .. } => write!(f, "number {text}"),
			Self::Str(text) => write!(f, "string {text:?}"),
			Self::Word(text) => write!(f, "name {text}"),
			Self::Eof => f.write_str("end of input"),
		}
	}
}

/// Bounded cursor producing literal tokens; whitespace between tokens is skipped.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
	text: &'a str,
	pos: usize,
}

impl<'a> Lexer<'a> {
	/// Create a lexer at offset 0.
	pub fn new(text: &'a str) -> Self {
		Self { text, pos: 0 }
	}

	/// Current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Scan the next token.
	pub fn next_token(&mut self) -> Result<Token<'a>> {
		self.skip_whitespace();
		let at = self.pos;
		let Some(byte) = self.peek() else {
			return Ok(Token { kind: TokenKind::Eof, at });
		};

		let kind = match byte {
			b'{' => self.punct(TokenKind::LBrace),
			b'}' => self.punct(TokenKind::RBrace),
			b'(' => self.punct(TokenKind::LParen),
			b')' => self.punct(TokenKind::RParen),
			b',' => self.punct(TokenKind::Comma),
			b'=' => self.punct(TokenKind::Equals),
			b';' => self.punct(TokenKind::Semicolon),
			b'"' => TokenKind::Str(self.string()?),
			b'+' | b'-' | b'0'..=b'9' => self.number()?,
			b'.' => self.word()?,
			byte if is_ident_start(byte) => self.word()?,
			_ => {
				return Err(CodecError::DecodeSyntax {
					at,
					reason: "unexpected character",
				});
			}
		};
		Ok(Token { kind, at })
	}

	/// Collect all tokens up to and excluding end of input.
	pub fn tokenize(text: &'a str) -> Result<Vec<Token<'a>>> {
		let mut lexer = Self::new(text);
		let mut out = Vec::new();
		loop {
			let token = lexer.next_token()?;
			if token.kind == TokenKind::Eof {
				return Ok(out);
			}
			out.push(token);
		}
	}

	fn peek(&self) -> Option<u8> {
		self.text.as_bytes().get(self.pos).copied()
	}

	fn peek_at(&self, offset: usize) -> Option<u8> {
		self.text.as_bytes().get(self.pos + offset).copied()
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn punct(&mut self, kind: TokenKind<'a>) -> TokenKind<'a> {
		self.pos += 1;
		kind
	}

	fn digits(&mut self) -> usize {
		let start = self.pos;
		while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
			self.pos += 1;
		}
		self.pos - start
	}

	fn number(&mut self) -> Result<TokenKind<'a>> {
		let start = self.pos;
		if matches!(self.peek(), Some(b'+' | b'-')) {
			self.pos += 1;
		}
		if self.digits() == 0 {
			return Err(CodecError::DecodeSyntax {
				at: self.pos,
				reason: "expected digit",
			});
		}

		let mut integral = true;
		if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|byte| byte.is_ascii_digit()) {
			self.pos += 1;
			self.digits();
			integral = false;
		}
		if matches!(self.peek(), Some(b'e' | b'E')) {
			self.pos += 1;
			if matches!(self.peek(), Some(b'+' | b'-')) {
				self.pos += 1;
			}
			if self.digits() == 0 {
				return Err(CodecError::DecodeSyntax {
					at: self.pos,
					reason: "expected exponent digit",
				});
			}
			integral = false;
		}

		Ok(TokenKind::Number {
			text: &self.text[start..self.pos],
			integral,
		})
	}

	fn word(&mut self) -> Result<TokenKind<'a>> {
		let start = self.pos;
		if self.peek() == Some(b'.') {
			self.pos += 1;
		}
		loop {
			if !self.peek().is_some_and(is_ident_start) {
				return Err(CodecError::DecodeSyntax {
					at: self.pos,
					reason: "expected identifier",
				});
			}
			self.pos += 1;
			while self.peek().is_some_and(is_ident_continue) {
				self.pos += 1;
			}
			if self.peek() == Some(b'.') {
				self.pos += 1;
				continue;
			}
			break;
		}
		Ok(TokenKind::Word(&self.text[start..self.pos]))
	}

	fn string(&mut self) -> Result<String> {
		let open = self.pos;
		self.pos += 1;
		let mut out = String::new();
		let text = self.text;
		let mut chars = text[self.pos..].char_indices();
		while let Some((offset, ch)) = chars.next() {
			match ch {
				'"' => {
					self.pos += offset + 1;
					return Ok(out);
				}
				'\\' => {
					let Some((_, escaped)) = chars.next() else {
						break;
					};
					let resolved = match escaped {
						'"' => '"',
						'\\' => '\\',
						'\'' => '\'',
						'?' => '?',
						'a' => '\u{07}',
						'b' => '\u{08}',
						'f' => '\u{0c}',
						'n' => '\n',
						'r' => '\r',
						't' => '\t',
						'v' => '\u{0b}',
						_ => {
							return Err(CodecError::DecodeSyntax {
								at: self.pos + offset,
								reason: "unknown escape sequence",
							});
						}
					};
					out.push(resolved);
				}
				other => out.push(other),
			}
		}
		Err(CodecError::DecodeSyntax {
			at: open,
			reason: "unterminated string",
		})
	}
}

#[cfg(test)]
mod tests;
