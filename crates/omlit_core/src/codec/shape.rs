use std::fmt;
use std::sync::Arc;

use crate::codec::descr::write_joined;
use crate::codec::{CodecError, EnumSchema, LiteralValue, RecordSchema, Result, TypeDescr, fixed_component_schema};

/// Leaf value kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
	/// Floating point number.
	Real,
	/// Signed integer.
	Integer,
	/// `true` or `false`.
	Boolean,
	/// Quoted string.
	String,
	/// Simple identifier.
	Identifier,
	/// Dotted name.
	Name,
	/// Member of a registered enumeration.
	EnumMember(Arc<EnumSchema>),
	/// Instance of a registered record.
	Record(Arc<RecordSchema>),
	/// Built-in component record kept atomic.
	FixedComponent,
}

impl ScalarKind {
	/// Union candidate precedence, higher wins; `None` for kinds that never compete.
	pub fn precedence(&self) -> Option<u8> {
		match self {
			Self::Integer => Some(1),
			Self::String => Some(2),
			Self::Identifier => Some(3),
			Self::Name => Some(4),
			Self::EnumMember(_) => Some(5),
			Self::Real | Self::Boolean | Self::Record(_) | Self::FixedComponent => None,
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Real => f.write_str("Real"),
			Self::Integer => f.write_str("Integer"),
			Self::Boolean => f.write_str("Boolean"),
			Self::String => f.write_str("String"),
			Self::Identifier => f.write_str("Identifier"),
			Self::Name => f.write_str("Name"),
			Self::EnumMember(schema) => write!(f, "{}", schema.home()),
			Self::Record(schema) => write!(f, "{}", schema.home()),
			Self::FixedComponent => f.write_str("Component"),
		}
	}
}

/// One tuple component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuplePart {
	/// Component name when the tuple came from a named description.
	pub name: Option<Box<str>>,
	/// Component shape.
	pub shape: TypeShape,
}

/// Fixed tuple shape, optionally decomposed from a declared record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleShape {
	/// Ordered components.
	pub parts: Vec<TuplePart>,
	/// Record the components were decomposed from; enables the `record` literal form.
	pub record: Option<Arc<RecordSchema>>,
}

impl TupleShape {
	/// Positional tuple of unnamed parts.
	pub fn positional(parts: impl IntoIterator<Item = TypeShape>) -> Self {
		Self {
			parts: parts.into_iter().map(|shape| TuplePart { name: None, shape }).collect(),
			record: None,
		}
	}

	/// Named parts mirroring a record's fields.
	pub fn from_record(schema: Arc<RecordSchema>) -> Self {
		Self {
			parts: schema
				.fields()
				.iter()
				.map(|field| TuplePart {
					name: Some(field.name.clone()),
					shape: field.shape.clone(),
				})
				.collect(),
			record: Some(schema),
		}
	}

	/// Number of components.
	pub fn arity(&self) -> usize {
		self.parts.len()
	}
}

/// Canonical resolved shape that drives decoding and casting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
	/// Leaf value.
	Scalar(ScalarKind),
	/// Value or empty.
	Optional(Box<TypeShape>),
	/// Array of elements.
	SequenceOf(Box<TypeShape>),
	/// Fixed tuple or decomposed record.
	TupleOf(TupleShape),
	/// Candidate leaves, highest precedence first.
	UnionOf(Vec<ScalarKind>),
}

impl TypeShape {
	/// `SequenceOf(inner)`.
	pub fn sequence_of(inner: TypeShape) -> Self {
		Self::SequenceOf(Box::new(inner))
	}

	/// `Optional(inner)`.
	pub fn optional(inner: TypeShape) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// Positional `TupleOf`.
	pub fn tuple_of(parts: impl IntoIterator<Item = TypeShape>) -> Self {
		Self::TupleOf(TupleShape::positional(parts))
	}

	/// Number of directly nested `SequenceOf` layers, looking through `Optional`.
	pub fn sequence_depth(&self) -> usize {
		match self {
			Self::SequenceOf(inner) => 1 + inner.sequence_depth(),
			Self::Optional(inner) => inner.sequence_depth(),
			_ => 0,
		}
	}
}

impl fmt::Display for TypeShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(kind) => write!(f, "{kind}"),
			Self::Optional(inner) => write!(f, "optional[{inner}]"),
			Self::SequenceOf(inner) => write!(f, "list[{inner}]"),
			Self::TupleOf(TupleShape { record: Some(schema), .. }) => {
				if schema.is_fixed_component() {
					f.write_str("Component")
				} else {
					write!(f, "{}", schema.home())
				}
			}
			Self::TupleOf(TupleShape { parts, record: None }) => {
				f.write_str("tuple[")?;
				for (idx, part) in parts.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					if let Some(name) = &part.name {
						write!(f, "{name}: ")?;
					}
					write!(f, "{}", part.shape)?;
				}
				f.write_str("]")
			}
			Self::UnionOf(kinds) => {
				f.write_str("union[")?;
				write_joined(f, kinds.iter())?;
				f.write_str("]")
			}
		}
	}
}

/// Whether the built-in component record is kept atomic or split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
	/// Decode contexts: the component becomes a named `TupleOf`.
	Decode,
	/// Cast contexts: the component stays a `FixedComponent` leaf.
	Cast,
}

/// Resolve a description for decoding.
pub fn resolve(descr: &TypeDescr) -> Result<TypeShape> {
	resolve_with(descr, ResolveMode::Decode)
}

/// Resolve a description for casting.
pub fn resolve_for_cast(descr: &TypeDescr) -> Result<TypeShape> {
	resolve_with(descr, ResolveMode::Cast)
}

/// Resolve a description in the given mode.
pub fn resolve_with(descr: &TypeDescr, mode: ResolveMode) -> Result<TypeShape> {
	match descr {
		TypeDescr::Component if mode == ResolveMode::Decode => Ok(TypeShape::TupleOf(TupleShape::from_record(fixed_component_schema()))),
		TypeDescr::Optional(inner) => Ok(make_optional(resolve_with(inner, mode)?)),
		TypeDescr::Alias { inner, .. } => resolve_with(inner, mode),
		TypeDescr::List(element) => Ok(TypeShape::sequence_of(resolve_with(element, mode)?)),
		TypeDescr::Tuple(parts) => {
			let mut out = Vec::with_capacity(parts.len());
			for (name, part) in parts {
				out.push(TuplePart {
					name: name.as_deref().map(Box::from),
					shape: resolve_with(part, mode)?,
				});
			}
			Ok(TypeShape::TupleOf(TupleShape { parts: out, record: None }))
		}
		TypeDescr::Union(arms) => resolve_union(arms),
		TypeDescr::Literal(values) => resolve_union(&[TypeDescr::Literal(values.clone())]),
		TypeDescr::NoneType => Err(CodecError::Unresolvable {
			descr: descr.to_string(),
			reason: "none-type outside a union",
		}),
		TypeDescr::Opaque(_) => Err(CodecError::Unresolvable {
			descr: descr.to_string(),
			reason: "no codec shape",
		}),
		leaf => leaf_kind(leaf).map(TypeShape::Scalar),
	}
}

fn make_optional(inner: TypeShape) -> TypeShape {
	match inner {
		TypeShape::Optional(_) => inner,
		other => TypeShape::optional(other),
	}
}

fn leaf_kind(descr: &TypeDescr) -> Result<ScalarKind> {
	match descr {
		TypeDescr::Real => Ok(ScalarKind::Real),
		TypeDescr::Integer => Ok(ScalarKind::Integer),
		TypeDescr::Boolean => Ok(ScalarKind::Boolean),
		TypeDescr::String => Ok(ScalarKind::String),
		TypeDescr::Identifier => Ok(ScalarKind::Identifier),
		TypeDescr::Name => Ok(ScalarKind::Name),
		TypeDescr::Enum(schema) => Ok(ScalarKind::EnumMember(schema.clone())),
		TypeDescr::Record(schema) => Ok(ScalarKind::Record(schema.clone())),
		TypeDescr::Component => Ok(ScalarKind::FixedComponent),
		other => Err(CodecError::Unresolvable {
			descr: other.to_string(),
			reason: "union arm is not a scalar",
		}),
	}
}

fn resolve_union(arms: &[TypeDescr]) -> Result<TypeShape> {
	let mut kinds = Vec::new();
	let mut nullable = false;
	collect_arms(arms, &mut kinds, &mut nullable)?;

	if kinds.is_empty() {
		if nullable {
			return Err(CodecError::Unresolvable {
				descr: TypeDescr::Union(arms.to_vec()).to_string(),
				reason: "union of none-type only",
			});
		}
		return Err(CodecError::EmptyUnion);
	}

	let mut unique: Vec<ScalarKind> = Vec::with_capacity(kinds.len());
	for kind in kinds {
		if !unique.contains(&kind) {
			unique.push(kind);
		}
	}

	let shape = if unique.len() == 1 {
		TypeShape::Scalar(unique.remove(0))
	} else {
		if let Some(unranked) = unique.iter().find(|kind| kind.precedence().is_none()) {
			return Err(CodecError::UnrankedUnionArm { arm: unranked.to_string() });
		}
		unique.sort_by_key(|kind| std::cmp::Reverse(kind.precedence()));
		TypeShape::UnionOf(unique)
	};

	Ok(if nullable { make_optional(shape) } else { shape })
}

fn collect_arms(arms: &[TypeDescr], kinds: &mut Vec<ScalarKind>, nullable: &mut bool) -> Result<()> {
	for arm in arms {
		match arm {
			TypeDescr::NoneType => *nullable = true,
			TypeDescr::Optional(inner) => {
				*nullable = true;
				collect_arms(std::slice::from_ref(inner.as_ref()), kinds, nullable)?;
			}
			TypeDescr::Alias { inner, .. } => collect_arms(std::slice::from_ref(inner.as_ref()), kinds, nullable)?,
			TypeDescr::Union(nested) => collect_arms(nested, kinds, nullable)?,
			TypeDescr::Literal(values) => {
				if values.is_empty() {
					return Err(CodecError::EmptyUnion);
				}
				kinds.extend(values.iter().map(|value| match value {
					LiteralValue::Integer(_) => ScalarKind::Integer,
					LiteralValue::String(_) => ScalarKind::String,
					LiteralValue::Boolean(_) => ScalarKind::Boolean,
				}));
			}
			leaf => kinds.push(leaf_kind(leaf)?),
		}
	}
	Ok(())
}
