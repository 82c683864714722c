use std::fmt::{self, Write};

use valbridge::bridge::{Value, ValueUnit};

/// Output truncation and formatting limits for value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum number of entries printed for maps.
	pub max_map_entries: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_array_items: 16,
			max_map_entries: 80,
			max_print_depth: 6,
		}
	}
}

impl PrintOptions {
	/// Preset for one-screen summaries.
	pub fn compact() -> Self {
		Self {
			max_string_len: 60,
			max_array_items: 4,
			max_map_entries: 12,
			max_print_depth: 2,
		}
	}
}

/// Print one value tree to stdout.
pub fn print_value(value: &Value, options: PrintOptions) {
	print!("{}", render_value(value, options));
}

/// Render one value tree, one scalar or bracket per line.
pub fn render_value(value: &Value, options: PrintOptions) -> String {
	let mut out = String::new();
	// Writing into a String cannot fail.
	let _ = write_value(&mut out, value, 0, 0, options);
	out
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	let pad = " ".repeat(indent);
	if let Ok(items) = value.as_array() {
		if depth >= options.max_print_depth {
			return writeln!(out, "{pad}[... {} items]", items.len());
		}
		writeln!(out, "{pad}[")?;
		for item in items.iter().take(options.max_array_items) {
			write_value(out, item, indent + 2, depth + 1, options)?;
		}
		if items.len() > options.max_array_items {
			writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items)?;
		}
		return writeln!(out, "{pad}]");
	}

	if let Ok(entries) = value.as_map() {
		if depth >= options.max_print_depth {
			return writeln!(out, "{pad}{{ ... {} entries }}", entries.len());
		}
		writeln!(out, "{pad}{{")?;
		for (key, item) in entries.iter().take(options.max_map_entries) {
			write!(out, "{pad}  {} = ", render_key(key))?;
			if item.is_container() {
				writeln!(out)?;
				write_value(out, item, indent + 4, depth + 1, options)?;
			} else {
				write_value(out, item, 0, depth + 1, options)?;
			}
		}
		if entries.len() > options.max_map_entries {
			writeln!(out, "{pad}  ... {} more entries", entries.len() - options.max_map_entries)?;
		}
		return writeln!(out, "{pad}}}");
	}

	writeln!(out, "{pad}{}", render_scalar(value, options))
}

fn render_key(key: &Value) -> String {
	match key.as_str() {
		Ok(text) if !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-') => text.to_owned(),
		_ => key.to_string(),
	}
}

fn render_scalar(value: &Value, options: PrintOptions) -> String {
	let Ok(text) = value.as_str() else {
		return value.to_string();
	};
	let (_, unit) = value.get_type_with_unit();
	match unit {
		ValueUnit::Secure => format!("<secure string, {} chars>", text.chars().count()),
		ValueUnit::Symbol => format!("#{}", truncate(text, options.max_string_len)),
		ValueUnit::Plain => Value::from(truncate(text, options.max_string_len)).to_string(),
		ValueUnit::Error | ValueUnit::Url => {
			format!("{} ({})", Value::from(truncate(text, options.max_string_len)), unit.name())
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
