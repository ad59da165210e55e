use crate::codec::{CodecError, Lexer, TokenKind};

fn kinds(text: &str) -> Vec<TokenKind<'_>> {
	Lexer::tokenize(text).expect("text tokenizes").into_iter().map(|token| token.kind).collect()
}

#[test]
fn punctuation_and_words_are_split_on_whitespace() {
	assert_eq!(
		kinds(" {a , .P.b}( )=;"),
		[
			TokenKind::LBrace,
			TokenKind::Word("a"),
			TokenKind::Comma,
			TokenKind::Word(".P.b"),
			TokenKind::RBrace,
			TokenKind::LParen,
			TokenKind::RParen,
			TokenKind::Equals,
			TokenKind::Semicolon,
		]
	);
}

#[test]
fn numbers_record_whether_they_are_integral() {
	assert_eq!(
		kinds("-12 +3 1.5 2e3 4.0E-1"),
		[
			TokenKind::Number { text: "-12", integral: true },
			TokenKind::Number { text: "+3", integral: true },
			TokenKind::Number { text: "1.5", integral: false },
			TokenKind::Number { text: "2e3", integral: false },
			TokenKind::Number { text: "4.0E-1", integral: false },
		]
	);
}

#[test]
fn strings_resolve_escapes() {
	assert_eq!(kinds(r#""a\"b\\c\nd""#), [TokenKind::Str("a\"b\\c\nd".to_owned())]);
	assert_eq!(kinds(r#""""#), [TokenKind::Str(String::new())]);
	assert_eq!(kinds("\"line\nbreak ü\""), [TokenKind::Str("line\nbreak ü".to_owned())]);
}

#[test]
fn offsets_point_at_token_start() {
	let tokens = Lexer::tokenize("  {x}").expect("text tokenizes");
	let offsets: Vec<usize> = tokens.iter().map(|token| token.at).collect();
	assert_eq!(offsets, [2, 3, 4]);
}

#[test]
fn malformed_input_reports_syntax_errors() {
	for (text, reason) in [
		("\"open", "unterminated string"),
		(r#""\q""#, "unknown escape sequence"),
		("-", "expected digit"),
		("1e", "expected exponent digit"),
		("a.", "expected identifier"),
		("#", "unexpected character"),
	] {
		let err = Lexer::tokenize(text).expect_err("tokenizing fails");
		assert!(
			matches!(err, CodecError::DecodeSyntax { reason: found, .. } if found == reason),
			"{text:?} should fail with {reason:?}, got {err}"
		);
	}
}

#[test]
fn end_of_input_repeats() {
	let mut lexer = Lexer::new("x");
	assert_eq!(lexer.next_token().expect("word").kind, TokenKind::Word("x"));
	assert_eq!(lexer.next_token().expect("eof").kind, TokenKind::Eof);
	assert_eq!(lexer.next_token().expect("eof again").kind, TokenKind::Eof);
	assert_eq!(lexer.pos(), 1);
}
