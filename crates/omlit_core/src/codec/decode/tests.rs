use omlit_testkit::fixture_text;

use crate::codec::test_support::{color_schema, decode_shape, point_schema};
use crate::codec::value::{FieldValue, RecordValue};
use crate::codec::{
	CodecError, EnumSchema, ErrorClass, FieldProblem, Identifier, MemberValue, Name, ParseOptions, ScalarKind, TypeShape, Value, parse, parse_with,
};

fn ident(text: &str) -> Value {
	Value::Identifier(Identifier::new(text).expect("valid identifier"))
}

fn point(x: f64, y: f64, label: Option<&str>) -> Value {
	let fields = [
		("x", Value::Real(x)),
		("y", Value::Real(y)),
		("label", label.map_or(Value::Null, |text| Value::String(text.into()))),
	]
	.into_iter()
	.map(|(name, value)| FieldValue { name: name.into(), value })
	.collect();
	Value::Record(RecordValue::new(point_schema(), fields))
}

mod scenarios {
	use super::*;

	#[test]
	fn sequence_of_real_pairs() {
		let shape = decode_shape("list[tuple[Real, Real]]");
		let value = parse(&shape, "{(1.0,2.0),(3.0,4.0)}").expect("decodes");
		assert_eq!(
			value,
			Value::Sequence(vec![
				Value::Tuple(vec![Value::Real(1.0), Value::Real(2.0)]),
				Value::Tuple(vec![Value::Real(3.0), Value::Real(4.0)]),
			])
		);
	}

	#[test]
	fn enum_member_bare_and_qualified() {
		let shape = decode_shape(".Pkg.Color");
		let green = Value::Member(MemberValue::by_name(&color_schema(), "Green").expect("member exists"));
		assert_eq!(parse(&shape, ".Pkg.Color.Green").expect("qualified decodes"), green);
		assert_eq!(parse(&shape, "Green").expect("bare decodes"), green);
	}

	#[test]
	fn enum_member_from_other_home_fails_without_verbatim_match() {
		let shape = decode_shape(".Pkg.Color");
		let err = parse(&shape, ".Other.Green").expect_err("foreign home fails");
		assert!(matches!(err, CodecError::DecodeUnknownMember { ref literal, .. } if literal == ".Other.Green"));
		assert_eq!(err.class(), ErrorClass::Decode);
	}

	#[test]
	fn enum_member_from_other_home_matches_verbatim_member_name() {
		let schema = EnumSchema::from_names(".Pkg.Color", ["Red", "Green", "Other.Green"]).expect("schema builds");
		let shape = TypeShape::Scalar(ScalarKind::EnumMember(schema.clone()));
		let value = parse(&shape, ".Other.Green").expect("verbatim member decodes");
		let Value::Member(member) = value else {
			panic!("expected member, got {value:?}");
		};
		assert_eq!(member.name(), "Other.Green");
		assert_eq!(member.ordinal(), 3);
	}
}

#[test]
fn boolean_accepts_only_exact_words() {
	let shape = decode_shape("Boolean");
	assert_eq!(parse(&shape, "true").expect("true decodes"), Value::Boolean(true));
	assert_eq!(parse(&shape, " false ").expect("false decodes"), Value::Boolean(false));
	for text in ["True", "1", "", "yes", "\"true\""] {
		let err = parse(&shape, text).expect_err("non-boolean text fails");
		assert_eq!(err.class(), ErrorClass::Decode, "{text:?}");
	}
}

#[test]
fn sequences_decode_each_element() {
	let flat = decode_shape("list[Identifier]");
	assert_eq!(parse(&flat, "{}").expect("empty decodes"), Value::Sequence(Vec::new()));
	assert_eq!(
		parse(&flat, "{a, b ,c}").expect("three decode"),
		Value::Sequence(vec![ident("a"), ident("b"), ident("c")])
	);

	let nested = decode_shape("list[list[Identifier]]");
	assert_eq!(
		parse(&nested, "{{},{x}}").expect("nested decodes"),
		Value::Sequence(vec![Value::Sequence(Vec::new()), Value::Sequence(vec![ident("x")])])
	);
}

#[test]
fn sequence_depth_mismatch_fails() {
	let shape = decode_shape("list[Integer]");
	let err = parse(&shape, "{1,{2}}").expect_err("nested array fails");
	assert!(matches!(err, CodecError::DecodeMismatch { ref path, .. } if path.to_string() == "$[1]"));

	let err = parse(&decode_shape("list[list[Integer]]"), "{1}").expect_err("flat array fails");
	assert!(matches!(err, CodecError::DecodeMismatch { .. }));
}

#[test]
fn arrays_and_tuples_are_not_interchangeable() {
	let tuple = decode_shape("tuple[Integer, Integer]");
	assert!(parse(&tuple, "{1, 2}").is_err());
	assert_eq!(parse(&tuple, "(1, 2)").expect("tuple decodes"), Value::Tuple(vec![Value::Integer(1), Value::Integer(2)]));

	let list = decode_shape("list[Integer]");
	assert!(parse(&list, "(1, 2)").is_err());
}

#[test]
fn tuple_arity_is_exact() {
	let shape = decode_shape("tuple[Real, Real]");
	let long = parse(&shape, "(1.0, 2.0, {3, (4)})").expect_err("long tuple fails");
	assert!(matches!(long, CodecError::DecodeArity { expected: 2, got: 3, .. }), "{long}");

	let short = parse(&shape, "(1.0)").expect_err("short tuple fails");
	assert!(matches!(short, CodecError::DecodeArity { expected: 2, got: 1, .. }), "{short}");

	assert_eq!(parse(&decode_shape("tuple[]"), "()").expect("empty tuple"), Value::Tuple(Vec::new()));
}

#[test]
fn optional_accepts_empty_text() {
	let shape = decode_shape("optional[Real]");
	assert_eq!(parse(&shape, "").expect("empty decodes"), Value::Null);
	assert_eq!(parse(&shape, "  ").expect("blank decodes"), Value::Null);
	assert_eq!(parse(&shape, "2").expect("value decodes"), Value::Real(2.0));

	let tuple = decode_shape("tuple[optional[Integer], String]");
	assert_eq!(
		parse(&tuple, "(, \"x\")").expect("empty slot decodes"),
		Value::Tuple(vec![Value::Null, Value::String("x".into())])
	);

	let err = parse(&decode_shape("Real"), "").expect_err("required value missing");
	assert!(matches!(err, CodecError::DecodeMismatch { .. }));
}

#[test]
fn numbers_follow_their_productions() {
	let real = decode_shape("Real");
	assert_eq!(parse(&real, "3").expect("integral real"), Value::Real(3.0));
	assert_eq!(parse(&real, "-1.5e2").expect("exponent real"), Value::Real(-150.0));
	assert!(matches!(parse(&real, "1e999"), Err(CodecError::DecodeInvalidText { kind: "Real", .. })));

	let integer = decode_shape("Integer");
	assert_eq!(parse(&integer, "+42").expect("signed integer"), Value::Integer(42));
	assert!(matches!(parse(&integer, "1.5"), Err(CodecError::DecodeMismatch { .. })));
	assert!(matches!(
		parse(&integer, "99999999999999999999"),
		Err(CodecError::DecodeInvalidText { kind: "Integer", .. })
	));
}

#[test]
fn wrappers_validate_their_text() {
	let err = parse(&decode_shape("Identifier"), "a.b").expect_err("dotted identifier fails");
	assert!(matches!(err, CodecError::DecodeInvalidText { kind: "Identifier", .. }));

	let name = parse(&decode_shape("Name"), ".Modelica.Blocks").expect("name decodes");
	assert_eq!(name, Value::Name(Name::new(".Modelica.Blocks").expect("valid name")));

	let text = parse(&decode_shape("String"), r#""say \"hi\"""#).expect("string decodes");
	assert_eq!(text.as_text(), Some("say \"hi\""));
}

#[test]
fn union_tries_candidates_in_precedence_order() {
	let shape = decode_shape("union[Integer, String, .Pkg.Color, Name]");
	let green = Value::Member(MemberValue::by_name(&color_schema(), "Green").expect("member exists"));
	assert_eq!(parse(&shape, "Green").expect("member wins"), green);
	assert_eq!(
		parse(&shape, "Modelica.Blocks").expect("name falls through"),
		Value::Name(Name::new("Modelica.Blocks").expect("valid name"))
	);
	assert_eq!(parse(&shape, "\"s\"").expect("string"), Value::String("s".into()));
	assert_eq!(parse(&shape, "7").expect("integer"), Value::Integer(7));
	assert!(matches!(parse(&shape, "true"), Ok(Value::Name(_))));
	assert!(matches!(parse(&shape, "1.5"), Err(CodecError::DecodeMismatch { .. })));
}

#[test]
fn trailing_input_is_rejected() {
	let err = parse(&decode_shape("Integer"), "1 2").expect_err("trailing token fails");
	assert!(matches!(err, CodecError::DecodeTrailing { at: 2, .. }));
	assert!(parse(&decode_shape("list[Integer]"), "{1},").is_err());
}

#[test]
fn errors_carry_nested_path() {
	let shape = decode_shape("list[tuple[Real, Real]]");
	let err = parse(&shape, "{(1.0,2.0),(3.0,x)}").expect_err("bad element fails");
	let CodecError::DecodeMismatch { path, at, .. } = &err else {
		panic!("expected mismatch, got {err}");
	};
	assert_eq!(path.to_string(), "$[1][1]");
	assert_eq!(*at, 16);
}

#[test]
fn depth_limit_is_enforced() {
	let shape = decode_shape("list[list[list[Integer]]]");
	let opt = ParseOptions {
		max_depth: 2,
		..ParseOptions::default()
	};
	let err = parse_with(&shape, "{{{1}}}", &opt).expect_err("deep input fails");
	assert!(matches!(err, CodecError::DecodeDepthExceeded { max_depth: 2 }));
}

mod records {
	use super::*;

	#[test]
	fn fields_decode_in_any_order() {
		let shape = decode_shape(".Pkg.Point");
		let declared = parse(&shape, "record Pkg.Point x = 1.0, y = 2.0, label = \"p\", end Pkg.Point;").expect("declared order");
		let permuted = parse(&shape, "record Pkg.Point label = \"p\", y = 2.0, x = 1.0, end Pkg.Point;").expect("permuted order");
		assert_eq!(declared, permuted);
		assert_eq!(declared, point(1.0, 2.0, Some("p")));
	}

	#[test]
	fn coverage_mismatches_fail() {
		let shape = decode_shape(".Pkg.Point");
		let cases = [
			("record Pkg.Point x = 1.0, label = , end Pkg.Point;", "y", FieldProblem::Missing),
			("record Pkg.Point x = 1.0, y = 2.0, z = 3.0, label = , end Pkg.Point;", "z", FieldProblem::Unexpected),
			("record Pkg.Point x = 1.0, y = 2.0, x = 3.0, label = , end Pkg.Point;", "x", FieldProblem::Duplicate),
		];
		for (text, field, problem) in cases {
			let err = parse(&shape, text).expect_err("coverage mismatch fails");
			assert!(
				matches!(&err, CodecError::DecodeField { field: found, problem: got, .. } if found == field && *got == problem),
				"{text}: {err}"
			);
		}
	}

	#[test]
	fn last_field_comma_is_optional_unless_strict() {
		let shape = decode_shape(".Pkg.Point");
		let text = "record Pkg.Point x = 1.0, y = 2.0, label = \"p\" end Pkg.Point;";
		assert_eq!(parse(&shape, text).expect("lenient decodes"), point(1.0, 2.0, Some("p")));
		assert!(parse_with(&shape, text, &ParseOptions::strict()).is_err());
	}

	#[test]
	fn empty_optional_last_field_may_precede_end() {
		let shape = decode_shape("list[.Pkg.Point]");
		let text = "{record Pkg.Point x = 1, y = 2, label = end Pkg.Point;}";
		assert_eq!(parse(&shape, text).expect("empty last field decodes"), Value::Sequence(vec![point(1.0, 2.0, None)]));
		assert!(parse_with(&shape, text, &ParseOptions::strict()).is_err());

		let err = parse(&decode_shape(".Pkg.Point"), "record Pkg.Point x = 1, label = , y = end Pkg.Point;").expect_err("required field stays required");
		assert!(matches!(err, CodecError::DecodeMismatch { ref path, .. } if path.to_string() == "$.y"), "{err}");
	}

	#[test]
	fn extra_tuple_elements_with_empty_records_are_counted() {
		let shape = decode_shape("tuple[Integer]");
		let text = "(1, record Pkg.Point x = (, 2), label = end Pkg.Point;, )";
		let err = parse(&shape, text).expect_err("arity mismatch fails");
		assert!(matches!(err, CodecError::DecodeArity { expected: 1, got: 3, .. }), "{err}");
	}

	#[test]
	fn open_and_close_names_are_not_compared() {
		let shape = decode_shape(".Pkg.Point");
		let value = parse(&shape, "record A x = 0, y = 0, label = , end B;").expect("names unchecked");
		assert_eq!(value, point(0.0, 0.0, None));
	}

	#[test]
	fn field_errors_carry_path() {
		let shape = decode_shape("list[.Pkg.Point]");
		let err = parse(&shape, "{record Pkg.Point x = 1.0, y = true, label = , end Pkg.Point;}").expect_err("bad field fails");
		assert!(matches!(err, CodecError::DecodeMismatch { ref path, .. } if path.to_string() == "$[0].y"), "{err}");
	}

	#[test]
	fn fixture_points_decode() {
		let shape = decode_shape("list[.Pkg.Point]");
		let value = parse(&shape, &fixture_text("points.txt")).expect("fixture decodes");
		assert_eq!(
			value,
			Value::Sequence(vec![point(1.0, -25.0, Some("origin \"left\"")), point(3.25, 0.0, None)])
		);
	}

	#[test]
	fn fixture_components_decode_in_both_forms() {
		let shape = decode_shape("list[Component]");
		let value = parse(&shape, &fixture_text("components.txt")).expect("fixture decodes");
		let Value::Sequence(items) = &value else {
			panic!("expected sequence, got {value:?}");
		};
		assert_eq!(items.len(), 2);

		let Value::Record(first) = &items[0] else {
			panic!("expected record form, got {:?}", items[0]);
		};
		assert!(first.schema().is_fixed_component());
		assert_eq!(first.get("name"), Some(&ident("u")));
		assert_eq!(first.get("dimensions"), Some(&Value::Sequence(Vec::new())));

		let Value::Tuple(second) = &items[1] else {
			panic!("expected tuple form, got {:?}", items[1]);
		};
		assert_eq!(second.len(), 12);
		assert_eq!(second[1], ident("k"));
		assert_eq!(second[4], Value::Boolean(true));
		assert_eq!(
			second[11],
			Value::Sequence(vec![Value::String("3".into()), Value::String("n".into())])
		);
	}
}
