use crate::bridge::{BridgeError, Result, Value};

/// One parsed operation in an item path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a map entry by string key.
	Key(String),
	/// Select an array element; negative counts from the end.
	Index(i64),
}

/// Parsed item path expression such as `items[0].name` or `[-1]`.
#[derive(Debug, Clone)]
pub struct ItemPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl ItemPath {
	/// Parse dotted key syntax with optional `[index]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || BridgeError::InvalidItemPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_' || bytes[idx] == b'-') {
				idx += 1;
			}

			if idx > start {
				steps.push(PathStep::Key(input[start..idx].to_owned()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				if idx < bytes.len() && bytes[idx] == b'-' {
					idx += 1;
				}
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}

				let number = input[n_start..idx].parse::<i64>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}
}

impl Value {
	/// Follow an item path through nested arrays and maps.
	pub fn lookup(&self, path: &ItemPath) -> Result<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Key(key) => current.get_item(key.as_str())?,
				PathStep::Index(index) => current.get_item(*index)?,
			};
		}
		Ok(current)
	}
}
