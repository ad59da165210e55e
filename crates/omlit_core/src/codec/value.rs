use std::sync::Arc;

use crate::codec::{EnumSchema, Identifier, Name, PathStep, RecordSchema, ValuePath};

/// Decoded or cast runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Empty literal under an optional shape.
	Null,
	/// Floating point number.
	Real(f64),
	/// Signed integer.
	Integer(i64),
	/// Boolean.
	Boolean(bool),
	/// Unescaped string contents.
	String(Box<str>),
	/// Validated simple identifier.
	Identifier(Identifier),
	/// Validated dotted name.
	Name(Name),
	/// Enumeration member.
	Member(MemberValue),
	/// Record instance.
	Record(RecordValue),
	/// Fixed tuple.
	Tuple(Vec<Value>),
	/// Array.
	Sequence(Vec<Value>),
}

impl Value {
	/// Short label of the value kind for diagnostics.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Real(_) => "Real",
			Self::Integer(_) => "Integer",
			Self::Boolean(_) => "Boolean",
			Self::String(_) => "String",
			Self::Identifier(_) => "Identifier",
			Self::Name(_) => "Name",
			Self::Member(_) => "enumeration member",
			Self::Record(_) => "record",
			Self::Tuple(_) => "tuple",
			Self::Sequence(_) => "sequence",
		}
	}

	/// Nesting depth of directly nested sequences, following first elements.
	pub fn sequence_depth(&self) -> usize {
		match self {
			Self::Sequence(items) => 1 + items.first().map_or(0, Value::sequence_depth),
			_ => 0,
		}
	}

	/// Walk `path` into tuples, sequences, and record fields.
	pub fn select(&self, path: &ValuePath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (current, step) {
				(Self::Sequence(items) | Self::Tuple(items), PathStep::Index(idx)) => items.get(*idx)?,
				(Self::Record(record), PathStep::Field(name)) => record.get(name)?,
				(Self::Record(record), PathStep::Index(idx)) => &record.fields().get(*idx)?.value,
				_ => return None,
			};
		}
		Some(current)
	}

	/// Text payload of string, identifier, and name values.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text.as_ref()),
			Self::Identifier(ident) => Some(ident.as_str()),
			Self::Name(name) => Some(name.as_str()),
			_ => None,
		}
	}
}

/// Member of an enumeration, bound to its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberValue {
	schema: Arc<EnumSchema>,
	index: usize,
}

impl MemberValue {
	pub(crate) fn new(schema: Arc<EnumSchema>, index: usize) -> Self {
		Self { schema, index }
	}

	/// Member named `name` as a value.
	pub fn by_name(schema: &Arc<EnumSchema>, name: &str) -> Option<Self> {
		schema.index_of(name).map(|index| Self::new(schema.clone(), index))
	}

	/// Owning enumeration.
	pub fn schema(&self) -> &Arc<EnumSchema> {
		&self.schema
	}

	/// Declared member name.
	pub fn name(&self) -> &str {
		&self.schema.members()[self.index].name
	}

	/// Integer value of the member.
	pub fn ordinal(&self) -> i64 {
		self.schema.members()[self.index].ordinal
	}
}

/// Record instance with fields stored in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	schema: Arc<RecordSchema>,
	fields: Vec<FieldValue>,
}

impl RecordValue {
	pub(crate) fn new(schema: Arc<RecordSchema>, fields: Vec<FieldValue>) -> Self {
		Self { schema, fields }
	}

	/// Record type.
	pub fn schema(&self) -> &Arc<RecordSchema> {
		&self.schema
	}

	/// Field values in declaration order.
	pub fn fields(&self) -> &[FieldValue] {
		&self.fields
	}

	/// Value of field `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}
}

/// One named record field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}
