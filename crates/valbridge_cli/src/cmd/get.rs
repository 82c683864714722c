use std::path::PathBuf;

use valbridge::bridge::{ItemPath, ParseOptions, Result};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_literal, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "path")]
	pub path_expr: String,
	#[arg(long)]
	pub json: bool,
}

/// Select one nested value from a literal file.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, path_expr, json } = args;

	let item_path = ItemPath::parse(&path_expr)?;
	let root = load_literal(&path, &ParseOptions::default())?;
	let value = root.lookup(&item_path)?;

	if json {
		let payload = GetJson {
			path: path.display().to_string(),
			expr: path_expr,
			type_name: value.get_type().name(),
			value: value_json(value)?,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("expr: {path_expr}");
	println!("type: {}", value.get_type());
	print_value(value, PrintOptions::default());
	Ok(())
}

#[derive(serde::Serialize)]
struct GetJson {
	path: String,
	expr: String,
	#[serde(rename = "type")]
	type_name: &'static str,
	value: serde_json::Value,
}
