use std::path::PathBuf;

use valbridge::bridge::{ParseOptions, Result};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_literal, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub strict: bool,
	#[arg(long)]
	pub compact: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
}

/// Parse a literal file and print its value tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file: path,
		json,
		strict,
		compact,
		max_depth,
		max_array,
	} = args;

	let parse_options = if strict { ParseOptions::strict_json() } else { ParseOptions::default() };
	let value = load_literal(&path, &parse_options)?;

	if json {
		let payload = ShowJson {
			path: path.display().to_string(),
			type_name: value.get_type().name(),
			value: value_json(&value)?,
		};
		return emit_json(&payload);
	}

	let mut options = if compact { PrintOptions::compact() } else { PrintOptions::default() };
	if let Some(max_depth) = max_depth {
		options.max_print_depth = max_depth;
	}
	if let Some(max_array) = max_array {
		options.max_array_items = max_array;
	}

	println!("path: {}", path.display());
	println!("type: {}", value.get_type());
	print_value(&value, options);
	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	#[serde(rename = "type")]
	type_name: &'static str,
	value: serde_json::Value,
}
