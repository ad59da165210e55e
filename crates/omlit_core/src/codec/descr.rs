use std::fmt;
use std::sync::Arc;

use crate::codec::{EnumSchema, Identifier, Name, RecordSchema};

/// One value of a closed literal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
	/// Integer literal.
	Integer(i64),
	/// String literal.
	String(String),
	/// Boolean literal.
	Boolean(bool),
}

/// Static type description as written in an operation signature.
///
/// Descriptions may wrap and nest freely; [`crate::codec::resolve`] reduces them to a [`crate::codec::TypeShape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescr {
	/// Floating point number.
	Real,
	/// Signed integer.
	Integer,
	/// Boolean.
	Boolean,
	/// Quoted string.
	String,
	/// Simple identifier wrapper.
	Identifier,
	/// Dotted name wrapper.
	Name,
	/// Registered enumeration.
	Enum(Arc<EnumSchema>),
	/// Registered record.
	Record(Arc<RecordSchema>),
	/// Built-in component record.
	Component,
	/// The none-type; only meaningful as a union arm.
	NoneType,
	/// Nullable wrapper.
	Optional(Box<TypeDescr>),
	/// Transparent naming alias carrying a label only.
	Alias {
		/// Alias label.
		label: String,
		/// Aliased description.
		inner: Box<TypeDescr>,
	},
	/// Iterable of elements.
	List(Box<TypeDescr>),
	/// Sum of alternatives.
	Union(Vec<TypeDescr>),
	/// Closed set of literal values.
	Literal(Vec<LiteralValue>),
	/// Fixed tuple with optionally named components.
	Tuple(Vec<(Option<String>, TypeDescr)>),
	/// Description with no codec meaning.
	Opaque(String),
}

impl TypeDescr {
	/// `Optional(inner)`.
	pub fn optional(inner: TypeDescr) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// `List(element)`.
	pub fn list(element: TypeDescr) -> Self {
		Self::List(Box::new(element))
	}

	/// `Alias { label, inner }`.
	pub fn alias(label: impl Into<String>, inner: TypeDescr) -> Self {
		Self::Alias {
			label: label.into(),
			inner: Box::new(inner),
		}
	}

	/// Positional tuple.
	pub fn tuple(parts: impl IntoIterator<Item = TypeDescr>) -> Self {
		Self::Tuple(parts.into_iter().map(|part| (None, part)).collect())
	}
}

impl fmt::Display for TypeDescr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Real => f.write_str("Real"),
			Self::Integer => f.write_str("Integer"),
			Self::Boolean => f.write_str("Boolean"),
			Self::String => f.write_str("String"),
			Self::Identifier => f.write_str("Identifier"),
			Self::Name => f.write_str("Name"),
			Self::Enum(schema) => write!(f, "{}", schema.home()),
			Self::Record(schema) => write!(f, "{}", schema.home()),
			Self::Component => f.write_str("Component"),
			Self::NoneType => f.write_str("none"),
			Self::Optional(inner) => write!(f, "optional[{inner}]"),
			Self::Alias { label, inner } => write!(f, "{label}={inner}"),
			Self::List(inner) => write!(f, "list[{inner}]"),
			Self::Union(arms) => {
				f.write_str("union[")?;
				write_joined(f, arms.iter())?;
				f.write_str("]")
			}
			Self::Literal(values) => {
				f.write_str("literal[")?;
				for (idx, value) in values.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					match value {
						LiteralValue::Integer(v) => write!(f, "{v}")?,
						LiteralValue::String(v) => write!(f, "{v:?}")?,
						LiteralValue::Boolean(v) => write!(f, "{v}")?,
					}
				}
				f.write_str("]")
			}
			Self::Tuple(parts) => {
				f.write_str("tuple[")?;
				for (idx, (name, part)) in parts.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					if let Some(name) = name {
						write!(f, "{name}: ")?;
					}
					write!(f, "{part}")?;
				}
				f.write_str("]")
			}
			Self::Opaque(label) => write!(f, "<{label}>"),
		}
	}
}

pub(crate) fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = T>) -> fmt::Result {
	for (idx, item) in items.enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}

/// Host types with a static codec description.
///
/// String-like types describe themselves as scalars even though they are iterable.
pub trait Describe {
	/// Static description of `Self`.
	fn describe() -> TypeDescr;
}

impl Describe for f64 {
	fn describe() -> TypeDescr {
		TypeDescr::Real
	}
}

impl Describe for i64 {
	fn describe() -> TypeDescr {
		TypeDescr::Integer
	}
}

impl Describe for i32 {
	fn describe() -> TypeDescr {
		TypeDescr::Integer
	}
}

impl Describe for bool {
	fn describe() -> TypeDescr {
		TypeDescr::Boolean
	}
}

impl Describe for String {
	fn describe() -> TypeDescr {
		TypeDescr::String
	}
}

impl Describe for Identifier {
	fn describe() -> TypeDescr {
		TypeDescr::Identifier
	}
}

impl Describe for Name {
	fn describe() -> TypeDescr {
		TypeDescr::Name
	}
}

impl<T: Describe> Describe for Option<T> {
	fn describe() -> TypeDescr {
		TypeDescr::optional(T::describe())
	}
}

impl<T: Describe> Describe for Vec<T> {
	fn describe() -> TypeDescr {
		TypeDescr::list(T::describe())
	}
}

impl<A: Describe, B: Describe> Describe for (A, B) {
	fn describe() -> TypeDescr {
		TypeDescr::tuple([A::describe(), B::describe()])
	}
}

impl<A: Describe, B: Describe, C: Describe> Describe for (A, B, C) {
	fn describe() -> TypeDescr {
		TypeDescr::tuple([A::describe(), B::describe(), C::describe()])
	}
}
