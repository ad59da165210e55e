use std::borrow::Cow;
use std::sync::Arc;

use tracing::trace;

use crate::codec::value::{FieldValue, MemberValue, RecordValue};
use crate::codec::{
	CodecError, EnumSchema, ErrorClass, FieldProblem, Identifier, Name, PathStep, RecordSchema, Result, ScalarKind, TupleShape, TypeShape, Value, ValuePath,
	fixed_component_schema,
};

/// Caller-supplied value before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
	/// Absent value; only an optional shape accepts it.
	Null,
	/// Boolean.
	Bool(bool),
	/// Integer number.
	Int(i64),
	/// Floating point number.
	Float(f64),
	/// Text; never treated as a sequence.
	Str(String),
	/// Ordered collection, used for arrays, tuples, and broadcasting.
	Seq(Vec<HostValue>),
	/// Field name to value pairs, used for records.
	Map(Vec<(String, HostValue)>),
	/// Already-typed value, passed through when it fits.
	Typed(Value),
}

impl HostValue {
	/// Short description for diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Self::Null => "null".to_owned(),
			Self::Bool(value) => format!("boolean {value}"),
			Self::Int(value) => format!("integer {value}"),
			Self::Float(value) => format!("float {value:?}"),
			Self::Str(text) => format!("string {text:?}"),
			Self::Seq(items) => format!("sequence of {} elements", items.len()),
			Self::Map(entries) => format!("map with {} entries", entries.len()),
			Self::Typed(value) => format!("typed {}", value.kind_label()),
		}
	}
}

impl From<bool> for HostValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for HostValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for HostValue {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}

impl From<f64> for HostValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for HostValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for HostValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Value> for HostValue {
	fn from(value: Value) -> Self {
		Self::Typed(value)
	}
}

impl From<Identifier> for HostValue {
	fn from(value: Identifier) -> Self {
		Self::Typed(Value::Identifier(value))
	}
}

impl From<Name> for HostValue {
	fn from(value: Name) -> Self {
		Self::Typed(Value::Name(value))
	}
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
	fn from(value: Vec<T>) -> Self {
		Self::Seq(value.into_iter().map(Into::into).collect())
	}
}

/// Runtime switches for host value normalization.
#[derive(Debug, Clone, Copy)]
pub struct CastOptions {
	/// Maximum nesting depth of host values.
	pub max_depth: u32,
	/// Cast host sequences element-wise against non-sequence shapes.
	pub broadcast: bool,
}

impl Default for CastOptions {
	fn default() -> Self {
		Self { max_depth: 64, broadcast: true }
	}
}

impl CastOptions {
	/// Preset for parameters the external API does not broadcast.
	pub fn exact() -> Self {
		Self {
			broadcast: false,
			..Self::default()
		}
	}
}

/// Normalize `host` into `shape` with default options.
pub fn cast(shape: &TypeShape, host: &HostValue) -> Result<Value> {
	cast_with(shape, host, &CastOptions::default())
}

/// Normalize `host` into `shape`.
pub fn cast_with(shape: &TypeShape, host: &HostValue, opt: &CastOptions) -> Result<Value> {
	trace!(%shape, host = %host.describe(), "cast host value");
	let mut caster = Caster {
		opt: *opt,
		path: ValuePath::root(),
		depth: 0,
	};
	caster.value(shape, host)
}

struct Caster {
	opt: CastOptions,
	path: ValuePath,
	depth: u32,
}

/// Typed primitives behave like their plain host counterparts.
fn lower(host: &HostValue) -> Cow<'_, HostValue> {
	match host {
		HostValue::Typed(Value::Null) => Cow::Owned(HostValue::Null),
		HostValue::Typed(Value::Boolean(value)) => Cow::Owned(HostValue::Bool(*value)),
		HostValue::Typed(Value::Integer(value)) => Cow::Owned(HostValue::Int(*value)),
		HostValue::Typed(Value::Real(value)) => Cow::Owned(HostValue::Float(*value)),
		HostValue::Typed(Value::String(text)) => Cow::Owned(HostValue::Str(text.to_string())),
		other => Cow::Borrowed(other),
	}
}

fn sequence_items(host: &HostValue) -> Option<Cow<'_, [HostValue]>> {
	match host {
		HostValue::Seq(items) => Some(Cow::Borrowed(items.as_slice())),
		HostValue::Typed(Value::Sequence(items) | Value::Tuple(items)) => Some(Cow::Owned(items.iter().cloned().map(HostValue::Typed).collect())),
		_ => None,
	}
}

fn is_tuple_input(tuple: &TupleShape, host: &HostValue) -> bool {
	sequence_items(host).is_some() || (tuple.record.is_some() && matches!(host, HostValue::Map(_) | HostValue::Typed(Value::Record(_))))
}

impl Caster {
	fn enter(&mut self) -> Result<()> {
		if self.depth >= self.opt.max_depth {
			return Err(CodecError::CastDepthExceeded { max_depth: self.opt.max_depth });
		}
		self.depth += 1;
		Ok(())
	}

	fn mismatch(&self, expected: impl ToString, host: &HostValue) -> CodecError {
		CodecError::CastMismatch {
			path: self.path.clone(),
			expected: expected.to_string(),
			found: host.describe(),
		}
	}

	fn invalid_text(&self, kind: &'static str, literal: impl Into<String>) -> CodecError {
		CodecError::CastInvalidText {
			path: self.path.clone(),
			kind,
			literal: literal.into(),
		}
	}

	fn value(&mut self, shape: &TypeShape, host: &HostValue) -> Result<Value> {
		self.enter()?;
		let lowered = lower(host);
		let host = &*lowered;
		let value = match shape {
			TypeShape::Optional(inner) => match host {
				HostValue::Null => Value::Null,
				other => self.value(inner, other)?,
			},
			TypeShape::SequenceOf(inner) => {
				let Some(items) = sequence_items(host) else {
					return Err(self.mismatch(shape, host));
				};
				self.elements(inner, &items)?
			}
			other => match sequence_items(host) {
				Some(items) if self.broadcasts(other, &items) => match self.positional(other, host, items.len())? {
					Some(value) => value,
					None => {
						trace!(shape = %other, len = items.len(), "broadcast host sequence");
						self.elements(other, &items)?
					}
				},
				_ => self.single(other, host)?,
			},
		};
		self.depth -= 1;
		Ok(value)
	}

	fn broadcasts(&self, shape: &TypeShape, items: &[HostValue]) -> bool {
		if !self.opt.broadcast {
			return false;
		}
		match shape {
			TypeShape::TupleOf(tuple) => !items.is_empty() && items.iter().all(|item| is_tuple_input(tuple, item)),
			_ => true,
		}
	}

	/// Cast a tuple-sized host sequence positionally with broadcasting off.
	///
	/// `None` means the parts rejected their items and the sequence is broadcast instead.
	fn positional(&mut self, shape: &TypeShape, host: &HostValue, len: usize) -> Result<Option<Value>> {
		let TypeShape::TupleOf(tuple) = shape else {
			return Ok(None);
		};
		if len != tuple.arity() {
			return Ok(None);
		}

		let path_len = self.path.steps.len();
		let depth = self.depth;
		let broadcast = std::mem::replace(&mut self.opt.broadcast, false);
		let result = self.tuple(shape, tuple, host);
		self.opt.broadcast = broadcast;
		match result {
			Ok(value) => Ok(Some(value)),
			Err(err) if err.class() == ErrorClass::Cast && !matches!(err, CodecError::CastDepthExceeded { .. }) => {
				trace!(shape = %shape, error = %err, "positional tuple rejected");
				self.path.truncate(path_len);
				self.depth = depth;
				Ok(None)
			}
			Err(err) => Err(err),
		}
	}

	fn elements(&mut self, inner: &TypeShape, items: &[HostValue]) -> Result<Value> {
		let mut out = Vec::with_capacity(items.len());
		for (idx, item) in items.iter().enumerate() {
			self.path.push(PathStep::Index(idx));
			out.push(self.value(inner, item)?);
			self.path.pop();
		}
		Ok(Value::Sequence(out))
	}

	fn single(&mut self, shape: &TypeShape, host: &HostValue) -> Result<Value> {
		match shape {
			TypeShape::TupleOf(tuple) => self.tuple(shape, tuple, host),
			TypeShape::UnionOf(kinds) => self.union(shape, kinds, host),
			TypeShape::Scalar(kind) => self.scalar(kind, host),
			TypeShape::Optional(_) | TypeShape::SequenceOf(_) => self.value(shape, host),
		}
	}

	fn tuple(&mut self, shape: &TypeShape, tuple: &TupleShape, host: &HostValue) -> Result<Value> {
		if let (Some(schema), HostValue::Map(_) | HostValue::Typed(Value::Record(_))) = (&tuple.record, host) {
			return self.record(schema, host).map(Value::Record);
		}
		let Some(items) = sequence_items(host) else {
			return Err(self.mismatch(shape, host));
		};
		if items.len() != tuple.arity() {
			return Err(CodecError::CastArity {
				path: self.path.clone(),
				expected: tuple.arity(),
				got: items.len(),
			});
		}

		let mut out = Vec::with_capacity(items.len());
		for (idx, (part, item)) in tuple.parts.iter().zip(items.iter()).enumerate() {
			let step = match &part.name {
				Some(name) => PathStep::Field(name.to_string()),
				None => PathStep::Index(idx),
			};
			self.path.push(step);
			out.push(self.value(&part.shape, item)?);
			self.path.pop();
		}
		Ok(Value::Tuple(out))
	}

	fn union(&mut self, shape: &TypeShape, kinds: &[ScalarKind], host: &HostValue) -> Result<Value> {
		let path_len = self.path.steps.len();
		let depth = self.depth;
		for kind in kinds {
			match self.scalar(kind, host) {
				Ok(value) => return Ok(value),
				Err(err) if err.class() == ErrorClass::Cast && !matches!(err, CodecError::CastDepthExceeded { .. }) => {
					trace!(candidate = %kind, error = %err, "union candidate rejected");
					self.path.truncate(path_len);
					self.depth = depth;
				}
				Err(err) => return Err(err),
			}
		}
		Err(self.mismatch(shape, host))
	}

	fn scalar(&mut self, kind: &ScalarKind, host: &HostValue) -> Result<Value> {
		match kind {
			ScalarKind::Real => self.real(host),
			ScalarKind::Integer => self.integer(host),
			ScalarKind::Boolean => match host {
				HostValue::Bool(value) => Ok(Value::Boolean(*value)),
				HostValue::Str(text) if text == "true" => Ok(Value::Boolean(true)),
				HostValue::Str(text) if text == "false" => Ok(Value::Boolean(false)),
				HostValue::Str(text) => Err(self.invalid_text("Boolean", text.as_str())),
				other => Err(self.mismatch(kind, other)),
			},
			ScalarKind::String => match host {
				HostValue::Str(text) => Ok(Value::String(text.as_str().into())),
				HostValue::Int(value) => Ok(Value::String(value.to_string().into_boxed_str())),
				HostValue::Float(value) => Ok(Value::String(format!("{value:?}").into_boxed_str())),
				HostValue::Typed(value @ (Value::Identifier(_) | Value::Name(_))) => Ok(Value::String(value.as_text().unwrap_or_default().into())),
				other => Err(self.mismatch(kind, other)),
			},
			ScalarKind::Identifier => match host {
				HostValue::Typed(Value::Identifier(ident)) => Ok(Value::Identifier(ident.clone())),
				HostValue::Str(text) => self.identifier(text),
				HostValue::Typed(Value::Name(name)) => self.identifier(name.as_str()),
				other => Err(self.mismatch(kind, other)),
			},
			ScalarKind::Name => match host {
				HostValue::Typed(Value::Name(name)) => Ok(Value::Name(name.clone())),
				HostValue::Typed(Value::Identifier(ident)) => Ok(Value::Name(Name::from(ident.clone()))),
				HostValue::Str(text) => Name::new(text).map(Value::Name).map_err(|_| self.invalid_text("Name", text.as_str())),
				other => Err(self.mismatch(kind, other)),
			},
			ScalarKind::EnumMember(schema) => self.member(kind, schema, host),
			ScalarKind::Record(schema) => self.record(schema, host).map(Value::Record),
			ScalarKind::FixedComponent => self.record(&fixed_component_schema(), host).map(Value::Record),
		}
	}

	fn real(&self, host: &HostValue) -> Result<Value> {
		match host {
			HostValue::Float(value) if value.is_finite() => Ok(Value::Real(*value)),
			HostValue::Float(value) => Err(self.invalid_text("Real", format!("{value:?}"))),
			HostValue::Int(value) => Ok(Value::Real(*value as f64)),
			HostValue::Str(text) => text
				.trim()
				.parse::<f64>()
				.ok()
				.filter(|value| value.is_finite())
				.map(Value::Real)
				.ok_or_else(|| self.invalid_text("Real", text.as_str())),
			other => Err(self.mismatch(ScalarKind::Real, other)),
		}
	}

	fn integer(&self, host: &HostValue) -> Result<Value> {
		match host {
			HostValue::Int(value) => Ok(Value::Integer(*value)),
			HostValue::Float(value) => {
				if value.is_finite() && value.fract() == 0.0 && *value >= i64::MIN as f64 && *value < i64::MAX as f64 {
					Ok(Value::Integer(*value as i64))
				} else {
					Err(self.invalid_text("Integer", format!("{value:?}")))
				}
			}
			HostValue::Str(text) => text.trim().parse::<i64>().map(Value::Integer).map_err(|_| self.invalid_text("Integer", text.as_str())),
			other => Err(self.mismatch(ScalarKind::Integer, other)),
		}
	}

	fn identifier(&self, text: &str) -> Result<Value> {
		Identifier::new(text).map(Value::Identifier).map_err(|_| self.invalid_text("Identifier", text))
	}

	fn member(&self, kind: &ScalarKind, schema: &Arc<EnumSchema>, host: &HostValue) -> Result<Value> {
		let index = match host {
			HostValue::Typed(Value::Member(member)) if **member.schema() == **schema => schema.index_of(member.name()),
			HostValue::Int(ordinal) => schema.index_of_ordinal(*ordinal),
			HostValue::Str(text) => schema.resolve_literal(text),
			HostValue::Typed(value @ (Value::Identifier(_) | Value::Name(_))) => value.as_text().and_then(|text| schema.resolve_literal(text)),
			other => return Err(self.mismatch(kind, other)),
		};
		let Some(index) = index else {
			let literal = match host {
				HostValue::Int(ordinal) => ordinal.to_string(),
				HostValue::Str(text) => text.clone(),
				HostValue::Typed(value) => value.as_text().map_or_else(|| value.kind_label().to_owned(), str::to_owned),
				other => other.describe(),
			};
			return Err(CodecError::CastUnknownMember {
				path: self.path.clone(),
				home: schema.home().to_string(),
				literal,
			});
		};
		Ok(Value::Member(MemberValue::new(schema.clone(), index)))
	}

	fn record(&mut self, schema: &Arc<RecordSchema>, host: &HostValue) -> Result<RecordValue> {
		let entries = match host {
			HostValue::Typed(Value::Record(record)) if **record.schema() == **schema => return Ok(record.clone()),
			HostValue::Map(entries) => entries,
			other => return Err(self.mismatch(schema.home(), other)),
		};

		let mut slots: Vec<Option<&HostValue>> = vec![None; schema.fields().len()];
		for (name, value) in entries {
			let Some((idx, _)) = schema.field(name) else {
				return Err(self.field_error(schema, name, FieldProblem::Unexpected));
			};
			if slots[idx].replace(value).is_some() {
				return Err(self.field_error(schema, name, FieldProblem::Duplicate));
			}
		}

		let mut fields = Vec::with_capacity(slots.len());
		for (field, slot) in schema.fields().iter().zip(slots) {
			let Some(host) = slot else {
				return Err(self.field_error(schema, &field.name, FieldProblem::Missing));
			};
			self.path.push(PathStep::Field(field.name.to_string()));
			let value = self.value(&field.shape, host)?;
			self.path.pop();
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}
		Ok(RecordValue::new(schema.clone(), fields))
	}

	fn field_error(&self, schema: &RecordSchema, field: &str, problem: FieldProblem) -> CodecError {
		CodecError::CastField {
			path: self.path.clone(),
			home: schema.home().to_string(),
			field: field.to_owned(),
			problem,
		}
	}
}
