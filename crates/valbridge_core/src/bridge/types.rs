/// Primary type tag of a [`Value`](crate::bridge::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	/// Absent value; the bridge's implicit "empty".
	Undefined,
	/// Explicit null.
	Null,
	/// Boolean.
	Bool,
	/// 64-bit signed integer.
	Int,
	/// 64-bit float.
	Float,
	/// Text, refined by [`ValueUnit`].
	String,
	/// Raw byte buffer.
	Bytes,
	/// Symbol reported with its own primary tag.
	Symbol,
	/// Ordered sequence of values.
	Array,
	/// Insertion-ordered key/value pairs.
	Map,
	/// Callable handle.
	Function,
	/// Error text reported with its own primary tag.
	ErrorString,
	/// Date/time ticks.
	Date,
	/// Fixed-point currency amount.
	Currency,
	/// Packed `0xAABBGGRR` color.
	Color,
	/// Duration in seconds.
	Duration,
	/// Angle in radians.
	Angle,
	/// Opaque engine object handle.
	Object,
	/// Opaque engine resource handle.
	Resource,
	/// Opaque asynchronous text handle.
	TextAsync,
}

impl ValueType {
	/// Stable lowercase name used in errors and CLI output.
	pub fn name(self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::Bytes => "bytes",
			Self::Symbol => "symbol",
			Self::Array => "array",
			Self::Map => "map",
			Self::Function => "function",
			Self::ErrorString => "error_string",
			Self::Date => "date",
			Self::Currency => "currency",
			Self::Color => "color",
			Self::Duration => "duration",
			Self::Angle => "angle",
			Self::Object => "object",
			Self::Resource => "resource",
			Self::TextAsync => "text_async",
		}
	}
}

impl std::fmt::Display for ValueType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Secondary tag refining string-class values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueUnit {
	/// Plain text, or no refinement for non-string tags.
	#[default]
	Plain,
	/// Error message text.
	Error,
	/// Text flagged for sensitive handling.
	Secure,
	/// URL text.
	Url,
	/// Interned symbol name.
	Symbol,
}

impl ValueUnit {
	/// Engine unit code.
	pub fn code(self) -> u32 {
		match self {
			Self::Plain => 0,
			Self::Error => 1,
			Self::Secure => 2,
			Self::Url => 3,
			Self::Symbol => 0xffff,
		}
	}

	/// Reverse of [`ValueUnit::code`].
	pub fn from_code(code: u32) -> Option<Self> {
		match code {
			0 => Some(Self::Plain),
			1 => Some(Self::Error),
			2 => Some(Self::Secure),
			3 => Some(Self::Url),
			0xffff => Some(Self::Symbol),
			_ => None,
		}
	}

	/// Stable lowercase name.
	pub fn name(self) -> &'static str {
		match self {
			Self::Plain => "plain",
			Self::Error => "error",
			Self::Secure => "secure",
			Self::Url => "url",
			Self::Symbol => "symbol",
		}
	}
}

/// Tag plus unit pair; every classification predicate is a pure function of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
	/// Primary tag.
	pub tag: ValueType,
	/// Secondary tag.
	pub unit: ValueUnit,
}

impl TypeInfo {
	/// Pair a tag with a unit.
	pub fn new(tag: ValueType, unit: ValueUnit) -> Self {
		Self { tag, unit }
	}
}

#[allow(missing_docs)]
impl TypeInfo {
	pub fn is_undefined(self) -> bool {
		self.tag == ValueType::Undefined
	}

	pub fn is_null(self) -> bool {
		self.tag == ValueType::Null
	}

	pub fn is_bool(self) -> bool {
		self.tag == ValueType::Bool
	}

	pub fn is_int(self) -> bool {
		self.tag == ValueType::Int
	}

	pub fn is_float(self) -> bool {
		self.tag == ValueType::Float
	}

	/// Generic string check; symbols and error strings count as strings.
	pub fn is_string(self) -> bool {
		matches!(self.tag, ValueType::String | ValueType::Symbol | ValueType::ErrorString)
	}

	pub fn is_bytes(self) -> bool {
		self.tag == ValueType::Bytes
	}

	pub fn is_symbol(self) -> bool {
		self.tag == ValueType::Symbol || (self.tag == ValueType::String && self.unit == ValueUnit::Symbol)
	}

	pub fn is_error_string(self) -> bool {
		self.tag == ValueType::ErrorString || (self.tag == ValueType::String && self.unit == ValueUnit::Error)
	}

	pub fn is_secure_string(self) -> bool {
		self.tag == ValueType::String && self.unit == ValueUnit::Secure
	}

	pub fn is_url(self) -> bool {
		self.tag == ValueType::String && self.unit == ValueUnit::Url
	}

	pub fn is_array(self) -> bool {
		self.tag == ValueType::Array
	}

	pub fn is_map(self) -> bool {
		self.tag == ValueType::Map
	}

	pub fn is_function(self) -> bool {
		self.tag == ValueType::Function
	}

	pub fn is_date(self) -> bool {
		self.tag == ValueType::Date
	}

	pub fn is_currency(self) -> bool {
		self.tag == ValueType::Currency
	}

	pub fn is_color(self) -> bool {
		self.tag == ValueType::Color
	}

	pub fn is_duration(self) -> bool {
		self.tag == ValueType::Duration
	}

	pub fn is_angle(self) -> bool {
		self.tag == ValueType::Angle
	}

	pub fn is_object(self) -> bool {
		self.tag == ValueType::Object
	}

	pub fn is_resource(self) -> bool {
		self.tag == ValueType::Resource
	}

	pub fn is_text_async(self) -> bool {
		self.tag == ValueType::TextAsync
	}

	/// Array or map.
	pub fn is_container(self) -> bool {
		matches!(self.tag, ValueType::Array | ValueType::Map)
	}

	/// Any tag whose payload is a number.
	pub fn is_numeric(self) -> bool {
		matches!(
			self.tag,
			ValueType::Int | ValueType::Float | ValueType::Date | ValueType::Currency | ValueType::Color | ValueType::Duration | ValueType::Angle
		)
	}
}
