use std::sync::Arc;

use crate::codec::{EnumSchema, RecordSchema, ScalarKind, SchemaRegistry, TypeShape, parse_signature, resolve, resolve_for_cast};

pub(crate) fn color_schema() -> Arc<EnumSchema> {
	EnumSchema::from_names(".Pkg.Color", ["Red", "Green", "Blue"]).expect("color schema builds")
}

pub(crate) fn point_schema() -> Arc<RecordSchema> {
	RecordSchema::new(
		".Pkg.Point",
		[
			("x", TypeShape::Scalar(ScalarKind::Real)),
			("y", TypeShape::Scalar(ScalarKind::Real)),
			("label", TypeShape::optional(TypeShape::Scalar(ScalarKind::String))),
		],
	)
	.expect("point schema builds")
}

pub(crate) fn registry() -> SchemaRegistry {
	let mut registry = SchemaRegistry::with_builtins();
	registry.register_enum(color_schema()).expect("color registers");
	registry.register_record(point_schema()).expect("point registers");
	registry
}

pub(crate) fn decode_shape(signature: &str) -> TypeShape {
	let descr = parse_signature(signature, &registry()).expect("signature parses");
	resolve(&descr).expect("signature resolves")
}

pub(crate) fn cast_shape(signature: &str) -> TypeShape {
	let descr = parse_signature(signature, &registry()).expect("signature parses");
	resolve_for_cast(&descr).expect("signature resolves")
}
