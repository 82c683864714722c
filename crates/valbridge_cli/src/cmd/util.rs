use std::path::Path;

use log::debug;
use serde::Serialize;
use valbridge::bridge::{ParseOptions, Result, Value, parse_with};

/// Read and parse one literal file.
pub(crate) fn load_literal(path: &Path, options: &ParseOptions) -> Result<Value> {
	let text = std::fs::read_to_string(path)?;
	let value = parse_with(&text, options)?;
	debug!("loaded {} as {}", path.display(), value.get_type());
	Ok(value)
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Convert a value into a JSON tree, failing on shapes JSON cannot hold.
pub(crate) fn value_json(value: &Value) -> Result<serde_json::Value> {
	Ok(serde_json::to_value(value).map_err(std::io::Error::from)?)
}
