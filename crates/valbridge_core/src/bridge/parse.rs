use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::bridge::container::upsert_entry;
use crate::bridge::value::Data;
use crate::bridge::{BridgeError, Result, Value};

/// Literal grammar switches and limits.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
	/// Maximum number of nested arrays/objects; scalars do not count.
	pub max_depth: u32,
	/// Accept unquoted identifier keys in objects.
	pub allow_bare_keys: bool,
	/// Accept `//` and `/* */` comments.
	pub allow_comments: bool,
	/// Accept a trailing comma before `]` and `}`.
	pub allow_trailing_commas: bool,
	/// Accept `'single quoted'` strings.
	pub allow_single_quotes: bool,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			max_depth: 256,
			allow_bare_keys: true,
			allow_comments: true,
			allow_trailing_commas: true,
			allow_single_quotes: true,
		}
	}
}

impl ParseOptions {
	/// Plain JSON; every extension disabled.
	pub fn strict_json() -> Self {
		Self {
			allow_bare_keys: false,
			allow_comments: false,
			allow_trailing_commas: false,
			allow_single_quotes: false,
			..Self::default()
		}
	}
}

/// Parse literal text with default options. Empty input yields `undefined`.
pub fn parse(text: &str) -> Result<Value> {
	parse_with(text, &ParseOptions::default())
}

/// Parse literal text.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
	let mut parser = Parser {
		src: text,
		bytes: text.as_bytes(),
		pos: 0,
		options,
	};
	parser.document().inspect_err(|err| debug!("literal parse failed: {err}"))
}

/// Read and parse a literal file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
	let text = std::fs::read_to_string(path)?;
	parse(&text)
}

impl Value {
	/// Parse literal text with default options.
	pub fn parse(text: &str) -> Result<Self> {
		parse(text)
	}
}

impl FromStr for Value {
	type Err = BridgeError;

	fn from_str(text: &str) -> Result<Self> {
		parse(text)
	}
}

struct Parser<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
	options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
	fn document(&mut self) -> Result<Value> {
		self.skip_ws()?;
		if self.pos >= self.bytes.len() {
			return Ok(Value::new());
		}
		let value = self.value(0)?;
		self.skip_ws()?;
		if self.pos < self.bytes.len() {
			return Err(self.error("trailing characters after value"));
		}
		Ok(value)
	}

	fn error(&self, message: &str) -> BridgeError {
		BridgeError::Parse {
			offset: self.pos,
			message: message.to_owned(),
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn skip_ws(&mut self) -> Result<()> {
		while let Some(byte) = self.peek() {
			if byte.is_ascii_whitespace() {
				self.pos += 1;
			} else if byte == b'/' && self.options.allow_comments {
				self.skip_comment()?;
			} else {
				break;
			}
		}
		Ok(())
	}

	fn skip_comment(&mut self) -> Result<()> {
		match self.bytes.get(self.pos + 1) {
			Some(b'/') => {
				while self.peek().is_some_and(|byte| byte != b'\n') {
					self.pos += 1;
				}
				Ok(())
			}
			Some(b'*') => {
				let body = self.pos + 2;
				match self.src[body..].find("*/") {
					Some(end) => {
						self.pos = body + end + 2;
						Ok(())
					}
					None => Err(self.error("unterminated comment")),
				}
			}
			_ => Err(self.error("unexpected character '/'")),
		}
	}

	/// `depth` counts the containers enclosing the value being parsed.
	fn value(&mut self, depth: u32) -> Result<Value> {
		match self.peek() {
			None => Err(self.error("unexpected end of input")),
			Some(b'{') => {
				self.check_depth(depth)?;
				self.object(depth)
			}
			Some(b'[') => {
				self.check_depth(depth)?;
				self.array(depth)
			}
			Some(b'"') => self.string(b'"').map(Value::from),
			Some(b'\'') if self.options.allow_single_quotes => self.string(b'\'').map(Value::from),
			Some(byte) if byte == b'-' || byte.is_ascii_digit() => self.number(),
			Some(byte) if is_ident_start(byte) => self.keyword(),
			Some(_) => Err(self.error("unexpected character")),
		}
	}

	fn check_depth(&self, depth: u32) -> Result<()> {
		if depth >= self.options.max_depth {
			return Err(BridgeError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Ok(())
	}

	fn keyword(&mut self) -> Result<Value> {
		let start = self.pos;
		let word = self.identifier();
		let data = match word {
			"null" => Data::Null,
			"undefined" => Data::Undefined,
			"true" => Data::Bool(true),
			"false" => Data::Bool(false),
			_ => {
				self.pos = start;
				return Err(self.error("unknown keyword"));
			}
		};
		Ok(Value::from_data(data))
	}

	fn identifier(&mut self) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(is_ident_byte) {
			self.pos += 1;
		}
		let src = self.src;
		&src[start..self.pos]
	}

	fn array(&mut self, depth: u32) -> Result<Value> {
		self.pos += 1;
		let mut items = Vec::new();
		loop {
			self.skip_ws()?;
			match self.peek() {
				None => return Err(self.error("unterminated array")),
				Some(b']') if items.is_empty() => break,
				_ => {}
			}

			items.push(self.value(depth + 1)?);

			self.skip_ws()?;
			match self.peek() {
				Some(b',') => {
					self.pos += 1;
					self.skip_ws()?;
					if self.peek() == Some(b']') {
						if !self.options.allow_trailing_commas {
							return Err(self.error("trailing comma in array"));
						}
						break;
					}
				}
				Some(b']') => break,
				None => return Err(self.error("unterminated array")),
				Some(_) => return Err(self.error("expected ',' or ']'")),
			}
		}
		self.pos += 1;
		Ok(Value::from_data(Data::Array(items)))
	}

	fn object(&mut self, depth: u32) -> Result<Value> {
		self.pos += 1;
		let mut entries = Vec::new();
		loop {
			self.skip_ws()?;
			match self.peek() {
				None => return Err(self.error("unterminated object")),
				Some(b'}') if entries.is_empty() => break,
				_ => {}
			}

			let key = self.key()?;
			self.skip_ws()?;
			if self.peek() != Some(b':') {
				return Err(self.error("expected ':' after object key"));
			}
			self.pos += 1;
			self.skip_ws()?;
			let value = self.value(depth + 1)?;
			upsert_entry(&mut entries, key, value);

			self.skip_ws()?;
			match self.peek() {
				Some(b',') => {
					self.pos += 1;
					self.skip_ws()?;
					if self.peek() == Some(b'}') {
						if !self.options.allow_trailing_commas {
							return Err(self.error("trailing comma in object"));
						}
						break;
					}
				}
				Some(b'}') => break,
				None => return Err(self.error("unterminated object")),
				Some(_) => return Err(self.error("expected ',' or '}'")),
			}
		}
		self.pos += 1;
		Ok(Value::from_data(Data::Map(entries)))
	}

	fn key(&mut self) -> Result<Value> {
		match self.peek() {
			Some(b'"') => self.string(b'"').map(Value::from),
			Some(b'\'') if self.options.allow_single_quotes => self.string(b'\'').map(Value::from),
			Some(byte) if self.options.allow_bare_keys && is_ident_start(byte) => Ok(Value::from(self.identifier())),
			None => Err(self.error("unterminated object")),
			Some(_) => Err(self.error("expected object key")),
		}
	}

	fn string(&mut self, quote: u8) -> Result<String> {
		self.pos += 1;
		let mut out = String::new();
		loop {
			let Some(ch) = self.src[self.pos..].chars().next() else {
				return Err(self.error("unterminated string"));
			};
			self.pos += ch.len_utf8();
			match ch {
				c if c == char::from(quote) => return Ok(out),
				'\\' => out.push(self.escape()?),
				c if u32::from(c) < 0x20 => {
					self.pos -= 1;
					return Err(self.error("control character in string"));
				}
				c => out.push(c),
			}
		}
	}

	fn escape(&mut self) -> Result<char> {
		let Some(byte) = self.peek() else {
			return Err(self.error("unterminated string"));
		};
		self.pos += 1;
		Ok(match byte {
			b'"' => '"',
			b'\'' => '\'',
			b'\\' => '\\',
			b'/' => '/',
			b'b' => '\u{8}',
			b'f' => '\u{c}',
			b'n' => '\n',
			b'r' => '\r',
			b't' => '\t',
			b'u' => return self.unicode_escape(),
			_ => {
				self.pos -= 1;
				return Err(self.error("invalid escape sequence"));
			}
		})
	}

	fn unicode_escape(&mut self) -> Result<char> {
		let first = self.hex4()?;
		let code = if (0xd800..0xdc00).contains(&first) {
			if !self.src[self.pos..].starts_with("\\u") {
				return Err(self.error("unpaired surrogate in unicode escape"));
			}
			self.pos += 2;
			let second = self.hex4()?;
			if !(0xdc00..0xe000).contains(&second) {
				return Err(self.error("invalid low surrogate in unicode escape"));
			}
			0x10000 + ((first - 0xd800) << 10) + (second - 0xdc00)
		} else {
			first
		};
		char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
	}

	fn hex4(&mut self) -> Result<u32> {
		let digits = self.src.get(self.pos..self.pos + 4).ok_or_else(|| self.error("truncated unicode escape"))?;
		if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
			return Err(self.error("invalid unicode escape"));
		}
		let code = u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid unicode escape"))?;
		self.pos += 4;
		Ok(code)
	}

	fn number(&mut self) -> Result<Value> {
		let start = self.pos;
		if self.peek() == Some(b'-') {
			self.pos += 1;
		}

		let int_start = self.pos;
		self.skip_digits();
		if self.pos == int_start {
			return Err(self.error("expected digits"));
		}
		if self.bytes[int_start] == b'0' && self.pos - int_start > 1 {
			self.pos = int_start;
			return Err(self.error("leading zero in number"));
		}

		let mut is_float = false;
		if self.peek() == Some(b'.') {
			is_float = true;
			self.pos += 1;
			let frac_start = self.pos;
			self.skip_digits();
			if self.pos == frac_start {
				return Err(self.error("expected digits after '.'"));
			}
		}
		if matches!(self.peek(), Some(b'e' | b'E')) {
			is_float = true;
			self.pos += 1;
			if matches!(self.peek(), Some(b'+' | b'-')) {
				self.pos += 1;
			}
			let exp_start = self.pos;
			self.skip_digits();
			if self.pos == exp_start {
				return Err(self.error("expected exponent digits"));
			}
		}

		let text = &self.src[start..self.pos];
		if !is_float {
			if let Ok(v) = text.parse::<i64>() {
				return Ok(Value::from(v));
			}
		}
		text.parse::<f64>().map(Value::from).map_err(|_| BridgeError::Parse {
			offset: start,
			message: format!("invalid number {text}"),
		})
	}

	fn skip_digits(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
			self.pos += 1;
		}
	}
}

fn is_ident_start(byte: u8) -> bool {
	byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

fn is_ident_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte == b'-'
}

#[cfg(test)]
mod tests;
