use omlit::codec::{HostValue, SchemaRegistry, Value, parse, parse_signature, resolve};
use serde_json::json;

use super::{host_from_json, value_json};

#[test]
fn json_numbers_keep_integer_and_float_kinds() {
	let host = host_from_json(&json!([1, 2.5, null, "x", {"k": true}]));
	let HostValue::Seq(items) = host else {
		panic!("expected sequence, got {host:?}");
	};
	assert!(matches!(items[0], HostValue::Int(1)));
	assert!(matches!(items[1], HostValue::Float(value) if value == 2.5));
	assert!(matches!(items[2], HostValue::Null));
	assert!(matches!(&items[3], HostValue::Str(text) if text == "x"));
	assert!(matches!(&items[4], HostValue::Map(entries) if entries.len() == 1 && entries[0].0 == "k"));
}

#[test]
fn decoded_values_render_as_json() {
	let registry = SchemaRegistry::with_builtins();
	let shape = resolve(&parse_signature("tuple[list[Real], optional[String], Name]", &registry).expect("parses")).expect("resolves");
	let value = parse(&shape, "({1, 2.5}, , .A.B)").expect("decodes");
	assert_eq!(value_json(&value), json!([[1.0, 2.5], null, ".A.B"]));
	assert_eq!(value_json(&Value::Real(f64::INFINITY)), json!(null));
}
