use std::fmt;

use tracing::debug;

use crate::codec::{
	CastOptions, CodecError, Describe, FromValue, HostValue, ParseOptions, Result, TypeShape, Value, ValuePath, cast_with, parse_with, resolve, to_literal,
};

/// Transport that evaluates expression text in a live compiler session.
pub trait Evaluate {
	/// Transport failure type.
	type Error: fmt::Display;

	/// Evaluate `expression` and return the reply literal text.
	fn evaluate(&mut self, expression: &str) -> std::result::Result<String, Self::Error>;
}

/// Outbound operation call assembled from cast arguments.
#[derive(Debug, Clone)]
pub struct Call {
	operation: String,
	positional: Vec<String>,
	named: Vec<(String, String)>,
	cast: CastOptions,
	parse: ParseOptions,
}

impl Call {
	/// Start a call to `operation`.
	pub fn new(operation: impl Into<String>) -> Self {
		Self {
			operation: operation.into(),
			positional: Vec::new(),
			named: Vec::new(),
			cast: CastOptions::default(),
			parse: ParseOptions::default(),
		}
	}

	/// Replace cast options used for later arguments.
	pub fn cast_options(mut self, opt: CastOptions) -> Self {
		self.cast = opt;
		self
	}

	/// Replace parse options used for the reply.
	pub fn parse_options(mut self, opt: ParseOptions) -> Self {
		self.parse = opt;
		self
	}

	/// Append a positional argument; a null positional argument is rejected.
	pub fn arg(mut self, shape: &TypeShape, host: impl Into<HostValue>) -> Result<Self> {
		let value = cast_with(shape, &host.into(), &self.cast)?;
		if value == Value::Null {
			return Err(CodecError::CastMismatch {
				path: ValuePath::root(),
				expected: shape.to_string(),
				found: "null positional argument".to_owned(),
			});
		}
		self.positional.push(to_literal(&value));
		Ok(self)
	}

	/// Append a keyword argument; null values are left out of the call.
	pub fn named(mut self, name: &str, shape: &TypeShape, host: impl Into<HostValue>) -> Result<Self> {
		let value = cast_with(shape, &host.into(), &self.cast)?;
		if value != Value::Null {
			self.named.push((name.to_owned(), to_literal(&value)));
		}
		Ok(self)
	}

	/// Expression text `operation(arg, ..., name=arg)`.
	pub fn expression(&self) -> String {
		let args = self.positional.iter().cloned().chain(self.named.iter().map(|(name, text)| format!("{name}={text}")));
		format!("{}({})", self.operation, args.collect::<Vec<_>>().join(", "))
	}

	/// Evaluate the call and decode the reply against `returns`.
	pub fn invoke<E: Evaluate>(&self, session: &mut E, returns: &TypeShape) -> Result<Value> {
		let expression = self.expression();
		debug!(operation = %self.operation, %expression, "evaluate call");
		let reply = session.evaluate(&expression).map_err(|err| CodecError::Session {
			operation: self.operation.clone(),
			message: err.to_string(),
		})?;
		parse_with(returns, &reply, &self.parse)
	}

	/// Evaluate the call and convert the reply into `T`.
	pub fn invoke_typed<T: Describe + FromValue, E: Evaluate>(&self, session: &mut E) -> Result<T> {
		let shape = resolve(&T::describe())?;
		T::from_value(self.invoke(session, &shape)?)
	}
}
