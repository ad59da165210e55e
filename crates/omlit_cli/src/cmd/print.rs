use omlit::codec::{TupleShape, TypeShape, Value, to_literal};

/// Output truncation limits for decoded value trees.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintOptions {
	/// Maximum number of elements printed for arrays and tuples.
	pub max_items: usize,
	/// Maximum recursive print depth.
	pub max_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self { max_items: 32, max_depth: 8 }
	}
}

/// Print one decoded value tree.
pub(crate) fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Sequence(items) | Value::Tuple(items) => {
			let (open, close) = if matches!(value, Value::Sequence(_)) { ('{', '}') } else { ('(', ')') };
			if items.is_empty() {
				println!("{pad}{open}{close}");
				return;
			}
			if depth >= options.max_depth {
				println!("{pad}{open}... {} items{close}", items.len());
				return;
			}
			println!("{pad}{open}");
			for item in items.iter().take(options.max_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_items {
				println!("{pad}  ... {} more", items.len() - options.max_items);
			}
			println!("{pad}{close}");
		}
		Value::Record(record) => {
			let home = record.schema().home();
			if depth >= options.max_depth {
				println!("{pad}record {home} ...");
				return;
			}
			println!("{pad}record {home}");
			for field in record.fields() {
				if matches!(field.value, Value::Record(_) | Value::Sequence(_) | Value::Tuple(_)) {
					println!("{pad}  {} =", field.name);
					print_value(&field.value, indent + 4, depth + 1, options);
				} else {
					println!("{pad}  {} = {}", field.name, scalar_text(&field.value));
				}
			}
			println!("{pad}end");
		}
		scalar => println!("{pad}{}", scalar_text(scalar)),
	}
}

fn scalar_text(value: &Value) -> String {
	match value {
		Value::Null => "<empty>".to_owned(),
		other => to_literal(other),
	}
}

/// Print the structure of a resolved shape.
pub(crate) fn print_shape(shape: &TypeShape, indent: usize) {
	let pad = " ".repeat(indent);
	match shape {
		TypeShape::Scalar(kind) => println!("{pad}{kind}"),
		TypeShape::Optional(inner) => {
			println!("{pad}optional");
			print_shape(inner, indent + 2);
		}
		TypeShape::SequenceOf(inner) => {
			println!("{pad}list");
			print_shape(inner, indent + 2);
		}
		TypeShape::TupleOf(TupleShape { parts, record }) => {
			match record {
				Some(schema) => println!("{pad}record {} ({} fields)", schema.home(), parts.len()),
				None => println!("{pad}tuple ({} parts)", parts.len()),
			}
			for (idx, part) in parts.iter().enumerate() {
				match &part.name {
					Some(name) => println!("{pad}  .{name}"),
					None => println!("{pad}  [{idx}]"),
				}
				print_shape(&part.shape, indent + 4);
			}
		}
		TypeShape::UnionOf(kinds) => {
			println!("{pad}union");
			for (rank, kind) in kinds.iter().enumerate() {
				println!("{pad}  {}. {kind}", rank + 1);
			}
		}
	}
}
