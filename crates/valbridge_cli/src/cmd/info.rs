use std::path::PathBuf;

use valbridge::bridge::{EngineCaps, ParseOptions, Result, Value};

use crate::cmd::util::{emit_json, load_literal};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print the type summary of a literal file's value.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, json } = args;

	let value = load_literal(&path, &ParseOptions::default())?;
	let caps = EngineCaps::builtin();
	let summary = summarize(&path, &value, caps);

	if json {
		return emit_json(&summary);
	}

	println!("path: {}", summary.path);
	println!("type: {}", summary.type_name);
	println!("unit: {} ({})", summary.unit, summary.unit_code);
	println!("truthy: {}", summary.truthy);
	match summary.length {
		Some(length) => println!("length: {length}"),
		None => println!("length: -"),
	}
	println!("engine: {}", summary.engine.version);
	println!("numeric_units: {}", summary.engine.numeric_units);
	Ok(())
}

fn summarize(path: &std::path::Path, value: &Value, caps: EngineCaps) -> InfoJson {
	let (tag, unit) = value.get_type_with_unit();
	InfoJson {
		path: path.display().to_string(),
		type_name: tag.name(),
		unit: unit.name(),
		unit_code: unit.code(),
		truthy: value.is_truthy(),
		length: value.len().ok(),
		engine: EngineJson {
			version: caps.version_label(),
			numeric_units: caps.supports_numeric_units(),
		},
	}
}

#[derive(serde::Serialize)]
struct EngineJson {
	version: String,
	numeric_units: bool,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	#[serde(rename = "type")]
	type_name: &'static str,
	unit: &'static str,
	unit_code: u32,
	truthy: bool,
	length: Option<usize>,
	engine: EngineJson,
}
