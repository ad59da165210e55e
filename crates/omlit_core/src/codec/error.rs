use std::fmt;

use thiserror::Error;

use crate::codec::ValuePath;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Coarse error family used by callers to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// A type description could not be reduced to a shape. Programmer error.
	Resolution,
	/// Schema construction or registry lookup failed.
	Schema,
	/// Literal text did not match the grammar implied by a shape.
	Decode,
	/// A host value could not be normalized into a shape.
	Cast,
	/// The session transport reported a failure.
	Session,
}

/// Field coverage problem found while matching record fields by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
	/// A declared field never appeared.
	Missing,
	/// A field name is not declared by the schema.
	Unexpected,
	/// A declared field appeared more than once.
	Duplicate,
}

impl fmt::Display for FieldProblem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Missing => "is missing field",
			Self::Unexpected => "has undeclared field",
			Self::Duplicate => "repeats field",
		})
	}
}

/// Errors produced while resolving shapes, decoding literals, and casting host values.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Type description reduces to no known shape.
	#[error("cannot resolve type description {descr}: {reason}")]
	Unresolvable {
		/// Rendered description.
		descr: String,
		/// Why resolution stopped.
		reason: &'static str,
	},
	/// Union arm has no place in the candidate precedence order.
	#[error("union arm {arm} has no candidate precedence")]
	UnrankedUnionArm {
		/// Rendered arm kind.
		arm: String,
	},
	/// Union description carried no arms.
	#[error("union has no candidate arms")]
	EmptyUnion,
	/// Textual type signature is malformed.
	#[error("invalid type signature at {at}: {reason} in {signature:?}")]
	InvalidSignature {
		/// Original signature text.
		signature: String,
		/// Byte offset of the failure.
		at: usize,
		/// What was expected.
		reason: &'static str,
	},
	/// Value path expression syntax is invalid.
	#[error("invalid value path: {path}")]
	InvalidPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Qualified home path is not a dotted name.
	#[error("invalid qualified home path {home:?}")]
	InvalidHome {
		/// Offending home text.
		home: String,
	},
	/// A schema is already registered under the same home.
	#[error("schema already registered for {home}")]
	DuplicateSchema {
		/// Normalized home path.
		home: String,
	},
	/// No schema is registered under the requested home.
	#[error("no schema registered for {home}")]
	UnknownSchema {
		/// Requested home path.
		home: String,
	},
	/// Enumeration member name is empty or not a dotted name.
	#[error("invalid member {member:?} in enumeration {home}")]
	InvalidMember {
		/// Enumeration home path.
		home: String,
		/// Offending member name.
		member: String,
	},
	/// Enumeration declares the same member name or ordinal twice.
	#[error("duplicate member {member} in enumeration {home}")]
	DuplicateMember {
		/// Enumeration home path.
		home: String,
		/// Repeated member name or ordinal.
		member: String,
	},
	/// Record field name is not a plain identifier.
	#[error("invalid field {field:?} in record {home}")]
	InvalidField {
		/// Record home path.
		home: String,
		/// Offending field name.
		field: String,
	},
	/// Record declares the same field twice.
	#[error("duplicate field {field} in record {home}")]
	DuplicateField {
		/// Record home path.
		home: String,
		/// Repeated field name.
		field: String,
	},
	/// Text does not satisfy an identifier wrapper's construction rule.
	#[error("{text:?} is not a valid {kind}")]
	InvalidText {
		/// Wrapper kind label.
		kind: &'static str,
		/// Offending text.
		text: String,
	},
	/// Lexical failure inside literal text.
	#[error("decode at offset {at}: {reason}")]
	DecodeSyntax {
		/// Byte offset of the failure.
		at: usize,
		/// What went wrong.
		reason: &'static str,
	},
	/// Token does not fit the production the shape requires.
	#[error("decode at {path} (offset {at}): expected {expected}, found {found}")]
	DecodeMismatch {
		/// Nested value position.
		path: ValuePath,
		/// Byte offset of the offending token.
		at: usize,
		/// Expected production.
		expected: String,
		/// Description of the offending token.
		found: String,
	},
	/// Tuple literal has the wrong number of elements.
	#[error("decode at {path} (offset {at}): tuple has {got} elements, expected {expected}")]
	DecodeArity {
		/// Nested value position.
		path: ValuePath,
		/// Byte offset of the tuple.
		at: usize,
		/// Declared arity.
		expected: usize,
		/// Element count found.
		got: usize,
	},
	/// Literal does not name a member of the enumeration.
	#[error("decode at {path} (offset {at}): {literal:?} is not a member of {home}")]
	DecodeUnknownMember {
		/// Nested value position.
		path: ValuePath,
		/// Byte offset of the literal.
		at: usize,
		/// Enumeration home path.
		home: String,
		/// Literal text.
		literal: String,
	},
	/// Record literal field coverage does not match the schema.
	#[error("decode at {path} (offset {at}): record {home} {problem} {field}")]
	DecodeField {
		/// Nested value position of the record.
		path: ValuePath,
		/// Byte offset where the problem was detected.
		at: usize,
		/// Record home path.
		home: String,
		/// Field name.
		field: String,
		/// Coverage problem kind.
		problem: FieldProblem,
	},
	/// Token has the right production but an invalid value.
	#[error("decode at {path} (offset {at}): {literal:?} is not a valid {kind}")]
	DecodeInvalidText {
		/// Nested value position.
		path: ValuePath,
		/// Byte offset of the literal.
		at: usize,
		/// Target kind label.
		kind: &'static str,
		/// Literal text.
		literal: String,
	},
	/// Input continues after a complete value.
	#[error("decode at offset {at}: trailing input {found}")]
	DecodeTrailing {
		/// Byte offset of the first extra token.
		at: usize,
		/// Description of the extra token.
		found: String,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decoded value does not fit the requested host type.
	#[error("decoded {found} does not convert to {expected}")]
	HostMismatch {
		/// Host type label.
		expected: &'static str,
		/// Decoded value kind.
		found: String,
	},
	/// Host value has the wrong structure for the shape.
	#[error("cast at {path}: expected {expected}, found {found}")]
	CastMismatch {
		/// Nested value position.
		path: ValuePath,
		/// Expected shape.
		expected: String,
		/// Description of the offending value.
		found: String,
	},
	/// Host sequence has the wrong length for a tuple shape.
	#[error("cast at {path}: tuple has {got} elements, expected {expected}")]
	CastArity {
		/// Nested value position.
		path: ValuePath,
		/// Declared arity.
		expected: usize,
		/// Element count supplied.
		got: usize,
	},
	/// Host value names no member of the enumeration.
	#[error("cast at {path}: {literal} is not a member of {home}")]
	CastUnknownMember {
		/// Nested value position.
		path: ValuePath,
		/// Enumeration home path.
		home: String,
		/// Name or ordinal supplied.
		literal: String,
	},
	/// Host map keys do not cover the record schema.
	#[error("cast at {path}: record {home} {problem} {field}")]
	CastField {
		/// Nested value position of the record.
		path: ValuePath,
		/// Record home path.
		home: String,
		/// Field name.
		field: String,
		/// Coverage problem kind.
		problem: FieldProblem,
	},
	/// Host text or number cannot be converted to the target kind.
	#[error("cast at {path}: {literal:?} is not a valid {kind}")]
	CastInvalidText {
		/// Nested value position.
		path: ValuePath,
		/// Target kind label.
		kind: &'static str,
		/// Offending text.
		literal: String,
	},
	/// Cast recursion depth exceeded configured limit.
	#[error("cast depth exceeded (max={max_depth})")]
	CastDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Session transport failed to evaluate an expression.
	#[error("session evaluation of {operation} failed: {message}")]
	Session {
		/// Operation name.
		operation: String,
		/// Transport error text.
		message: String,
	},
}

impl CodecError {
	/// Classify the error into its family.
	pub fn class(&self) -> ErrorClass {
		match self {
			Self::Unresolvable { .. } | Self::UnrankedUnionArm { .. } | Self::EmptyUnion | Self::InvalidSignature { .. } | Self::InvalidPath { .. } => {
				ErrorClass::Resolution
			}
			Self::InvalidHome { .. }
			| Self::DuplicateSchema { .. }
			| Self::UnknownSchema { .. }
			| Self::InvalidMember { .. }
			| Self::DuplicateMember { .. }
			| Self::InvalidField { .. }
			| Self::DuplicateField { .. } => ErrorClass::Schema,
			Self::DecodeSyntax { .. }
			| Self::DecodeMismatch { .. }
			| Self::DecodeArity { .. }
			| Self::DecodeUnknownMember { .. }
			| Self::DecodeField { .. }
			| Self::DecodeInvalidText { .. }
			| Self::DecodeTrailing { .. }
			| Self::DecodeDepthExceeded { .. }
			| Self::HostMismatch { .. } => ErrorClass::Decode,
			Self::InvalidText { .. }
			| Self::CastMismatch { .. }
			| Self::CastArity { .. }
			| Self::CastUnknownMember { .. }
			| Self::CastField { .. }
			| Self::CastInvalidText { .. }
			| Self::CastDepthExceeded { .. } => ErrorClass::Cast,
			Self::Session { .. } => ErrorClass::Session,
		}
	}
}
