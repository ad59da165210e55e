#![allow(missing_docs)]

use std::process::{Command, Output};

use omlit_testkit::fixture_path;
use serde_json::Value;

#[test]
fn parse_json_decodes_fixture_records() {
	let json = run_json(&[
		"parse",
		"list[.Pkg.Point]",
		"--file",
		&fixture("points.txt"),
		"--schemas",
		&fixture("schemas.json"),
		"--json",
	]);

	assert_eq!(json["shape"], "list[.Pkg.Point]");
	assert_eq!(json["path"], "$");
	assert_eq!(json["kind"], "sequence");
	assert_eq!(json["sequence_depth"], 1);
	let items = json["value"].as_array().expect("value is an array");
	assert_eq!(items.len(), 2);
	assert_eq!(items[0]["record"], ".Pkg.Point");
	assert_eq!(items[0]["fields"]["y"], -25.0);
	assert_eq!(items[0]["fields"]["label"], "origin \"left\"");
	assert!(items[1]["fields"]["label"].is_null(), "empty slot decodes to null");
}

#[test]
fn parse_select_narrows_output() {
	let json = run_json(&[
		"parse",
		"list[.Pkg.Point]",
		"--file",
		&fixture("points.txt"),
		"--schemas",
		&fixture("schemas.json"),
		"--select",
		"$[1].x",
		"--json",
	]);

	assert_eq!(json["path"], "$[1].x");
	assert_eq!(json["kind"], "Real");
	assert_eq!(json["sequence_depth"], 0);
	assert_eq!(json["value"], 3.25);
}

#[test]
fn parse_reports_enum_members() {
	let json = run_json(&[
		"parse",
		"list[.Pkg.Color]",
		"{Red, .Pkg.Color.Blue}",
		"--schemas",
		&fixture("schemas.json"),
		"--json",
	]);

	assert_eq!(json["value"][1]["enum"], ".Pkg.Color");
	assert_eq!(json["value"][1]["member"], "Blue");
	assert_eq!(json["value"][1]["ordinal"], 3);
}

#[test]
fn cast_broadcasts_sequence_over_scalar_shape() {
	let json = run_json(&["cast", "Real", "[1, 2.5, \"3\"]", "--json"]);

	assert_eq!(json["shape"], "Real");
	assert_eq!(json["literal"], "{1.0, 2.5, 3.0}");
	assert_eq!(json["value"], serde_json::json!([1.0, 2.5, 3.0]));
}

#[test]
fn cast_objects_into_registered_records() {
	let json = run_json(&[
		"cast",
		".Pkg.Point",
		r#"{"y": 2, "x": 1, "label": null}"#,
		"--schemas",
		&fixture("schemas.json"),
		"--json",
	]);

	assert_eq!(json["literal"], "record Pkg.Point x = 1.0, y = 2.0, label = , end Pkg.Point;");
	assert_eq!(json["value"]["fields"]["x"], 1.0);
}

#[test]
fn cast_without_broadcast_rejects_sequences() {
	let output = run(&["cast", "Real", "[1, 2]", "--no-broadcast"]);
	assert!(!output.status.success(), "exact cast should fail");
	assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn shape_json_reports_resolution_mode() {
	let json = run_json(&["shape", "list[list[Component]]", "--json"]);
	assert_eq!(json["mode"], "decode");
	assert_eq!(json["shape"], "list[list[Component]]");
	assert_eq!(json["sequence_depth"], 2);

	let json = run_json(&["shape", "optional[Integer]", "--cast", "--json"]);
	assert_eq!(json["mode"], "cast");
	assert_eq!(json["sequence_depth"], 0);
}

#[test]
fn malformed_literal_exits_with_status_one() {
	let output = run(&["parse", "Boolean", "True"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty(), "nothing printed on failure");
}

#[test]
fn unknown_schema_is_reported() {
	let output = run(&["shape", ".Pkg.Missing"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Pkg.Missing"));
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_omlit")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"omlit command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
