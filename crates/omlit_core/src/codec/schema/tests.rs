use crate::codec::test_support::{color_schema, point_schema};
use crate::codec::{CodecError, EnumSchema, ErrorClass, RecordSchema, ScalarKind, SchemaRef, SchemaRegistry, TypeShape, fixed_component_schema};

#[test]
fn enum_home_is_normalized_to_absolute() {
	let schema = EnumSchema::from_names("Pkg.Color", ["Red"]).expect("schema builds");
	assert_eq!(schema.home().as_str(), ".Pkg.Color");
	assert_eq!(schema.members()[0].ordinal, 1);
}

#[test]
fn enum_rejects_leading_dot_and_duplicate_members() {
	let dotted = EnumSchema::from_names(".Pkg.E", [".A"]).expect_err("leading dot member fails");
	assert!(matches!(dotted, CodecError::InvalidMember { .. }));

	let repeated = EnumSchema::from_names(".Pkg.E", ["A", "A"]).expect_err("duplicate member fails");
	assert!(matches!(repeated, CodecError::DuplicateMember { .. }));

	let ordinals = EnumSchema::new(".Pkg.E", [("A", 3), ("B", 3)]).expect_err("duplicate ordinal fails");
	assert!(matches!(ordinals, CodecError::DuplicateMember { ref member, .. } if member == "3"));
	assert_eq!(ordinals.class(), ErrorClass::Schema);
}

#[test]
fn resolve_literal_accepts_bare_and_qualified_forms() {
	let schema = color_schema();
	let green = schema.index_of("Green");
	assert!(green.is_some());
	assert_eq!(schema.resolve_literal("Green"), green);
	assert_eq!(schema.resolve_literal(".Pkg.Color.Green"), green);
	assert_eq!(schema.resolve_literal("Pkg.Color.Green"), green);
	assert_eq!(schema.resolve_literal(".Other.Green"), None);
	assert_eq!(schema.resolve_literal("Purple"), None);
}

#[test]
fn resolve_literal_falls_back_to_verbatim_dotted_member() {
	let schema = EnumSchema::from_names(".Pkg.Odd", ["Green", "Other.Green"]).expect("schema builds");
	assert_eq!(schema.resolve_literal(".Other.Green"), Some(1));
	assert_eq!(schema.resolve_literal(".Pkg.Odd.Green"), Some(0));
}

#[test]
fn record_rejects_bad_and_repeated_fields() {
	let real = || TypeShape::Scalar(ScalarKind::Real);
	let bad = RecordSchema::new(".Pkg.R", [("a.b", real())]).expect_err("dotted field fails");
	assert!(matches!(bad, CodecError::InvalidField { .. }));

	let repeated = RecordSchema::new(".Pkg.R", [("a", real()), ("a", real())]).expect_err("duplicate field fails");
	assert!(matches!(repeated, CodecError::DuplicateField { .. }));

	let home = RecordSchema::new("Pkg..R", [("a", real())]).expect_err("bad home fails");
	assert!(matches!(home, CodecError::InvalidHome { .. }));
}

#[test]
fn record_field_lookup_reports_declaration_index() {
	let schema = point_schema();
	let (idx, field) = schema.field("y").expect("field exists");
	assert_eq!(idx, 1);
	assert_eq!(field.shape, TypeShape::Scalar(ScalarKind::Real));
	assert!(schema.field("z").is_none());
	assert!(!schema.is_fixed_component());
}

#[test]
fn fixed_component_schema_is_shared_and_complete() {
	let first = fixed_component_schema();
	let second = fixed_component_schema();
	assert!(std::sync::Arc::ptr_eq(&first, &second));
	assert!(first.is_fixed_component());

	let names: Vec<&str> = first.fields().iter().map(|field| &*field.name).collect();
	assert_eq!(
		names,
		[
			"className",
			"name",
			"comment",
			"isProtected",
			"isFinal",
			"isFlow",
			"isStream",
			"isReplaceable",
			"variability",
			"innerOuter",
			"inputOutput",
			"dimensions"
		]
	);
}

#[test]
fn registry_rejects_duplicate_homes_across_kinds() {
	let mut registry = SchemaRegistry::with_builtins();
	registry.register_enum(color_schema()).expect("enum registers");

	let clash = RecordSchema::new("Pkg.Color", Vec::<(String, TypeShape)>::new()).expect("record builds");
	let err = registry.register_record(clash).expect_err("home already taken");
	assert!(matches!(err, CodecError::DuplicateSchema { ref home } if home == ".Pkg.Color"));
}

#[test]
fn registry_lookup_ignores_leading_dot() {
	let mut registry = SchemaRegistry::new();
	registry.register_record(point_schema()).expect("record registers");

	assert!(matches!(registry.lookup("Pkg.Point"), Ok(SchemaRef::Record(_))));
	assert!(registry.record_by_home(".Pkg.Point").is_some());
	assert!(registry.enum_by_home(".Pkg.Point").is_none());
	assert!(matches!(registry.lookup(".Pkg.Missing"), Err(CodecError::UnknownSchema { .. })));
	assert_eq!(registry.records().count(), 1);
	assert_eq!(registry.enums().count(), 0);
}
