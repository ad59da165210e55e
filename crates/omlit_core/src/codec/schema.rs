use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::codec::ident::{is_dotted_name, is_identifier};
use crate::codec::{CodecError, Name, Result, ScalarKind, TypeShape};

/// Home path of the built-in component record.
pub(crate) const COMPONENT_HOME: &str = ".OpenModelica.Scripting.Component";

/// One enumeration literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
	/// Member name as declared.
	pub name: Box<str>,
	/// Integer value of the member, 1-based when assigned implicitly.
	pub ordinal: i64,
}

/// Immutable enumeration type metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumSchema {
	home: Name,
	members: Vec<EnumMember>,
}

impl EnumSchema {
	/// Build a schema from explicit `(name, ordinal)` members.
	pub fn new<I, S>(home: &str, members: I) -> Result<Arc<Self>>
	where
		I: IntoIterator<Item = (S, i64)>,
		S: Into<String>,
	{
		let home = normalize_home(home)?;
		let mut out: Vec<EnumMember> = Vec::new();
		for (name, ordinal) in members {
			let name: String = name.into();
			if name.starts_with('.') || !is_dotted_name(&name) {
				return Err(CodecError::InvalidMember {
					home: home.to_string(),
					member: name,
				});
			}
			if out.iter().any(|item| *item.name == *name) {
				return Err(CodecError::DuplicateMember {
					home: home.to_string(),
					member: name,
				});
			}
			if out.iter().any(|item| item.ordinal == ordinal) {
				return Err(CodecError::DuplicateMember {
					home: home.to_string(),
					member: ordinal.to_string(),
				});
			}
			out.push(EnumMember {
				name: name.into_boxed_str(),
				ordinal,
			});
		}
		Ok(Arc::new(Self { home, members: out }))
	}

	/// Build a schema assigning ordinals `1..` in declaration order.
	pub fn from_names<I, S>(home: &str, names: I) -> Result<Arc<Self>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(home, names.into_iter().zip(1_i64..))
	}

	/// Absolute qualified home path.
	pub fn home(&self) -> &Name {
		&self.home
	}

	/// Members in declaration order.
	pub fn members(&self) -> &[EnumMember] {
		&self.members
	}

	/// Position of the member named exactly `name`.
	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.members.iter().position(|item| &*item.name == name)
	}

	/// Position of the member with integer value `ordinal`.
	pub fn index_of_ordinal(&self, ordinal: i64) -> Option<usize> {
		self.members.iter().position(|item| item.ordinal == ordinal)
	}

	/// Resolve member literal text.
	///
	/// A bare literal is looked up by member name. A dotted literal resolves by its trailing segment when
	/// its leading path equals this schema's home; otherwise the whole literal, leading `.` excluded, is
	/// looked up verbatim.
	pub fn resolve_literal(&self, literal: &str) -> Option<usize> {
		let body = literal.strip_prefix('.').unwrap_or(literal);
		match body.rsplit_once('.') {
			Some((lead, tail)) if self.home.same_path(lead) => self.index_of(tail),
			_ => self.index_of(body),
		}
	}
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
	/// Field identifier.
	pub name: Box<str>,
	/// Resolved field shape.
	pub shape: TypeShape,
}

/// Immutable record type metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
	home: Name,
	fields: Vec<FieldSchema>,
}

impl RecordSchema {
	/// Build a schema from ordered `(field, shape)` pairs.
	pub fn new<I, S>(home: &str, fields: I) -> Result<Arc<Self>>
	where
		I: IntoIterator<Item = (S, TypeShape)>,
		S: Into<String>,
	{
		let home = normalize_home(home)?;
		let mut out: Vec<FieldSchema> = Vec::new();
		for (name, shape) in fields {
			let name: String = name.into();
			if !is_identifier(&name) {
				return Err(CodecError::InvalidField {
					home: home.to_string(),
					field: name,
				});
			}
			if out.iter().any(|item| *item.name == *name) {
				return Err(CodecError::DuplicateField {
					home: home.to_string(),
					field: name,
				});
			}
			out.push(FieldSchema {
				name: name.into_boxed_str(),
				shape,
			});
		}
		Ok(Arc::new(Self { home, fields: out }))
	}

	/// Absolute qualified home path.
	pub fn home(&self) -> &Name {
		&self.home
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldSchema] {
		&self.fields
	}

	/// Look up a field and its declaration index.
	pub fn field(&self, name: &str) -> Option<(usize, &FieldSchema)> {
		self.fields.iter().enumerate().find(|(_, item)| &*item.name == name)
	}

	/// Whether this is the built-in component record.
	pub fn is_fixed_component(&self) -> bool {
		self.home.as_str() == COMPONENT_HOME
	}
}

/// Built-in fixed-arity component record returned by component listing operations.
pub fn fixed_component_schema() -> Arc<RecordSchema> {
	static COMPONENT: OnceLock<Arc<RecordSchema>> = OnceLock::new();
	COMPONENT
		.get_or_init(|| {
			let flag = || TypeShape::Scalar(ScalarKind::Boolean);
			let text = || TypeShape::Scalar(ScalarKind::String);
			let fields = [
				("className", TypeShape::Scalar(ScalarKind::Name)),
				("name", TypeShape::Scalar(ScalarKind::Identifier)),
				("comment", text()),
				("isProtected", flag()),
				("isFinal", flag()),
				("isFlow", flag()),
				("isStream", flag()),
				("isReplaceable", flag()),
				("variability", text()),
				("innerOuter", text()),
				("inputOutput", text()),
				("dimensions", TypeShape::SequenceOf(Box::new(text()))),
			];
			Arc::new(RecordSchema {
				home: Name(COMPONENT_HOME.into()),
				fields: fields
					.into_iter()
					.map(|(name, shape)| FieldSchema { name: name.into(), shape })
					.collect(),
			})
		})
		.clone()
}

/// Registered schema of either kind.
#[derive(Debug, Clone)]
pub enum SchemaRef {
	/// Enumeration schema.
	Enum(Arc<EnumSchema>),
	/// Record schema.
	Record(Arc<RecordSchema>),
}

/// Read-only after startup table of enumeration and record schemas keyed by home path.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
	enums: BTreeMap<Box<str>, Arc<EnumSchema>>,
	records: BTreeMap<Box<str>, Arc<RecordSchema>>,
}

impl SchemaRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry holding the built-in component record.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		let component = fixed_component_schema();
		registry.records.insert(component.home().as_str().into(), component);
		registry
	}

	/// Register an enumeration schema under its home path.
	pub fn register_enum(&mut self, schema: Arc<EnumSchema>) -> Result<Arc<EnumSchema>> {
		let home = schema.home().as_str();
		self.ensure_vacant(home)?;
		debug!(home, members = schema.members().len(), "registered enumeration schema");
		self.enums.insert(home.into(), schema.clone());
		Ok(schema)
	}

	/// Register a record schema under its home path.
	pub fn register_record(&mut self, schema: Arc<RecordSchema>) -> Result<Arc<RecordSchema>> {
		let home = schema.home().as_str();
		self.ensure_vacant(home)?;
		debug!(home, fields = schema.fields().len(), "registered record schema");
		self.records.insert(home.into(), schema.clone());
		Ok(schema)
	}

	/// Look up an enumeration by home, with or without leading `.`.
	pub fn enum_by_home(&self, home: &str) -> Option<&Arc<EnumSchema>> {
		self.enums.get(absolute_key(home).as_str())
	}

	/// Look up a record by home, with or without leading `.`.
	pub fn record_by_home(&self, home: &str) -> Option<&Arc<RecordSchema>> {
		self.records.get(absolute_key(home).as_str())
	}

	/// Look up a schema of either kind.
	pub fn lookup(&self, home: &str) -> Result<SchemaRef> {
		if let Some(schema) = self.enum_by_home(home) {
			return Ok(SchemaRef::Enum(schema.clone()));
		}
		if let Some(schema) = self.record_by_home(home) {
			return Ok(SchemaRef::Record(schema.clone()));
		}
		Err(CodecError::UnknownSchema { home: home.to_owned() })
	}

	/// Registered enumerations ordered by home.
	pub fn enums(&self) -> impl Iterator<Item = &Arc<EnumSchema>> {
		self.enums.values()
	}

	/// Registered records ordered by home.
	pub fn records(&self) -> impl Iterator<Item = &Arc<RecordSchema>> {
		self.records.values()
	}

	fn ensure_vacant(&self, home: &str) -> Result<()> {
		if self.enums.contains_key(home) || self.records.contains_key(home) {
			return Err(CodecError::DuplicateSchema { home: home.to_owned() });
		}
		Ok(())
	}
}

fn normalize_home(home: &str) -> Result<Name> {
	Name::new(home).map(|name| name.to_absolute()).map_err(|_| CodecError::InvalidHome { home: home.to_owned() })
}

fn absolute_key(home: &str) -> String {
	if home.starts_with('.') { home.to_owned() } else { format!(".{home}") }
}

#[cfg(test)]
mod tests;
