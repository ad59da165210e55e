use crate::codec::{CodecError, FromValue, Identifier, Name, ParseOptions, Value, decode, decode_with};

#[test]
fn typed_decode_follows_static_description() {
	let pairs: Vec<(f64, f64)> = decode("{(1.0,2.0),(3,4.5)}").expect("pairs decode");
	assert_eq!(pairs, [(1.0, 2.0), (3.0, 4.5)]);

	let names: Vec<Name> = decode("{Modelica.Blocks, .Modelica.Icons}").expect("names decode");
	assert_eq!(names[1].as_str(), ".Modelica.Icons");

	let flag: bool = decode("true").expect("boolean decodes");
	assert!(flag);
}

#[test]
fn optional_targets_map_empty_text_to_none() {
	let value: Option<i64> = decode("").expect("empty decodes");
	assert_eq!(value, None);

	let value: Option<String> = decode("\"x\"").expect("string decodes");
	assert_eq!(value.as_deref(), Some("x"));
}

#[test]
fn three_tuples_decode_each_component() {
	let (ident, count, label): (Identifier, i32, String) = decode("(x, 3, \"c\")").expect("tuple decodes");
	assert_eq!(ident.as_str(), "x");
	assert_eq!(count, 3);
	assert_eq!(label, "c");
}

#[test]
fn out_of_range_and_wrong_kinds_fail() {
	let err = i32::from_value(Value::Integer(i64::from(i32::MAX) + 1)).expect_err("too large for i32");
	assert!(matches!(err, CodecError::HostMismatch { expected: "i32", .. }));

	let err = String::from_value(Value::Boolean(true)).expect_err("bool is not text");
	assert!(matches!(err, CodecError::HostMismatch { expected: "String", .. }));

	let err = <(i64, i64)>::from_value(Value::Tuple(vec![Value::Integer(1)])).expect_err("short tuple");
	assert!(matches!(err, CodecError::HostMismatch { expected: "2-tuple", .. }));
}

#[test]
fn decode_with_applies_parse_options() {
	let opt = ParseOptions {
		max_depth: 1,
		..ParseOptions::default()
	};
	let err = decode_with::<Vec<Vec<i64>>>("{{1}}", &opt).expect_err("depth exceeded");
	assert!(matches!(err, CodecError::DecodeDepthExceeded { max_depth: 1 }));
}
