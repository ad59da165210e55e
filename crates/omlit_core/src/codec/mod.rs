mod convert;
mod decode;
mod descr;
mod encode;
mod error;
mod format;
mod ident;
mod lexer;
mod path;
mod schema;
mod session;
mod shape;
mod signature;
mod value;

#[cfg(test)]
mod test_support;

/// Typed host conversion and one-call decode helpers.
pub use convert::{FromValue, decode, decode_with};
/// Shape-driven literal decoding entry points and options.
pub use decode::{ParseOptions, parse, parse_with};
/// Static type descriptions and the per-type description trait.
pub use descr::{Describe, LiteralValue, TypeDescr};
/// Host value normalization entry points and options.
pub use encode::{CastOptions, HostValue, cast, cast_with};
/// Error, classification, and result aliases.
pub use error::{CodecError, ErrorClass, FieldProblem, Result};
/// Literal serializer entry points and options.
pub use format::{FormatOptions, format_literal, to_literal};
/// Restricted identifier wrapper kinds.
pub use ident::{Identifier, Name, is_dotted_name, is_identifier};
/// Literal tokenizer.
pub use lexer::{Lexer, Token, TokenKind};
/// Value path representation used for error context and selection.
pub use path::{PathStep, ValuePath};
/// Enumeration and record schemas plus their registry.
pub use schema::{EnumMember, EnumSchema, FieldSchema, RecordSchema, SchemaRef, SchemaRegistry, fixed_component_schema};
/// Session transport seam and call builder.
pub use session::{Call, Evaluate};
/// Resolved type shapes and the resolver.
pub use shape::{ResolveMode, ScalarKind, TuplePart, TupleShape, TypeShape, resolve, resolve_for_cast, resolve_with};
/// Textual type signature parser.
pub use signature::parse_signature;
/// Decoded runtime value types.
pub use value::{FieldValue, MemberValue, RecordValue, Value};
