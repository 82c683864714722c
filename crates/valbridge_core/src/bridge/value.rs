use std::fmt;

use crate::bridge::{BridgeError, Callable, Result, TypeInfo, ValueType, ValueUnit};

/// Kind of opaque engine handle carried by a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
	/// Engine object.
	Object,
	/// Engine resource.
	Resource,
	/// Asynchronous text producer.
	TextAsync,
}

impl OpaqueKind {
	fn tag(self) -> ValueType {
		match self {
			Self::Object => ValueType::Object,
			Self::Resource => ValueType::Resource,
			Self::TextAsync => ValueType::TextAsync,
		}
	}
}

/// Dynamically typed datum exchanged with the engine.
///
/// Every value uniquely owns its payload: cloning deep-copies data and shares
/// only callable handles, which are reference counted.
#[derive(Clone, Default)]
pub struct Value {
	pub(crate) data: Data,
}

#[derive(Debug, Clone, Default)]
pub(crate) enum Data {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String {
		text: Box<str>,
		unit: ValueUnit,
	},
	Bytes(Vec<u8>),
	Array(Vec<Value>),
	Map(Vec<(Value, Value)>),
	Function(Callable),
	Date(i64),
	Currency(i64),
	Color(u32),
	Duration(f64),
	Angle(f64),
	Opaque {
		kind: OpaqueKind,
		id: u64,
	},
}

impl Value {
	/// Create an `undefined` value.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn from_data(data: Data) -> Self {
		Self { data }
	}

	/// Reset to `undefined`, releasing the previous payload immediately.
	pub fn clear(&mut self) {
		self.data = Data::Undefined;
	}

	/// Tag and unit of this value.
	pub fn type_info(&self) -> TypeInfo {
		let tag = match &self.data {
			Data::Undefined => ValueType::Undefined,
			Data::Null => ValueType::Null,
			Data::Bool(_) => ValueType::Bool,
			Data::Int(_) => ValueType::Int,
			Data::Float(_) => ValueType::Float,
			Data::String { unit, .. } => return TypeInfo::new(ValueType::String, *unit),
			Data::Bytes(_) => ValueType::Bytes,
			Data::Array(_) => ValueType::Array,
			Data::Map(_) => ValueType::Map,
			Data::Function(_) => ValueType::Function,
			Data::Date(_) => ValueType::Date,
			Data::Currency(_) => ValueType::Currency,
			Data::Color(_) => ValueType::Color,
			Data::Duration(_) => ValueType::Duration,
			Data::Angle(_) => ValueType::Angle,
			Data::Opaque { kind, .. } => kind.tag(),
		};
		TypeInfo::new(tag, ValueUnit::Plain)
	}

	/// Primary tag.
	pub fn get_type(&self) -> ValueType {
		self.type_info().tag
	}

	/// Primary tag together with its unit.
	pub fn get_type_with_unit(&self) -> (ValueType, ValueUnit) {
		let info = self.type_info();
		(info.tag, info.unit)
	}

	pub(crate) fn type_name(&self) -> &'static str {
		self.get_type().name()
	}

	pub(crate) fn mismatch(&self, expected: &'static str) -> BridgeError {
		BridgeError::TypeMismatch {
			expected,
			got: self.type_name(),
		}
	}

	/// Truthiness: absent, zero, and empty values are false.
	pub fn is_truthy(&self) -> bool {
		match &self.data {
			Data::Undefined | Data::Null => false,
			Data::Bool(v) => *v,
			Data::Int(v) | Data::Date(v) | Data::Currency(v) => *v != 0,
			Data::Float(v) | Data::Duration(v) | Data::Angle(v) => *v != 0.0,
			Data::Color(v) => *v != 0,
			Data::String { text, .. } => !text.is_empty(),
			Data::Bytes(v) => !v.is_empty(),
			Data::Array(items) => !items.is_empty(),
			Data::Map(entries) => !entries.is_empty(),
			Data::Function(_) | Data::Opaque { .. } => true,
		}
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Result<bool> {
		match self.data {
			Data::Bool(v) => Ok(v),
			_ => Err(self.mismatch("bool")),
		}
	}

	/// Integer payload.
	pub fn as_int(&self) -> Result<i64> {
		match self.data {
			Data::Int(v) => Ok(v),
			_ => Err(self.mismatch("int")),
		}
	}

	/// Float payload.
	pub fn as_float(&self) -> Result<f64> {
		match self.data {
			Data::Float(v) => Ok(v),
			_ => Err(self.mismatch("float")),
		}
	}

	/// Text payload of any string unit.
	pub fn as_str(&self) -> Result<&str> {
		match &self.data {
			Data::String { text, .. } => Ok(text),
			_ => Err(self.mismatch("string")),
		}
	}

	/// Byte payload.
	pub fn as_bytes(&self) -> Result<&[u8]> {
		match &self.data {
			Data::Bytes(v) => Ok(v),
			_ => Err(self.mismatch("bytes")),
		}
	}

	/// Owned copy of the byte payload.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		self.as_bytes().map(<[u8]>::to_vec)
	}

	/// Packed `0xAABBGGRR` color payload.
	pub fn as_color(&self) -> Result<u32> {
		match self.data {
			Data::Color(v) => Ok(v),
			_ => Err(self.mismatch("color")),
		}
	}

	/// Array elements.
	pub fn as_array(&self) -> Result<&[Value]> {
		match &self.data {
			Data::Array(items) => Ok(items),
			_ => Err(self.mismatch("array")),
		}
	}

	/// Map entries in insertion order.
	pub fn as_map(&self) -> Result<&[(Value, Value)]> {
		match &self.data {
			Data::Map(entries) => Ok(entries),
			_ => Err(self.mismatch("map")),
		}
	}

	/// Callable handle.
	pub fn as_callable(&self) -> Result<&Callable> {
		match &self.data {
			Data::Function(callable) => Ok(callable),
			_ => Err(self.mismatch("function")),
		}
	}
}

#[allow(missing_docs)]
impl Value {
	pub fn is_undefined(&self) -> bool {
		self.type_info().is_undefined()
	}

	pub fn is_null(&self) -> bool {
		self.type_info().is_null()
	}

	pub fn is_bool(&self) -> bool {
		self.type_info().is_bool()
	}

	pub fn is_int(&self) -> bool {
		self.type_info().is_int()
	}

	pub fn is_float(&self) -> bool {
		self.type_info().is_float()
	}

	pub fn is_string(&self) -> bool {
		self.type_info().is_string()
	}

	pub fn is_bytes(&self) -> bool {
		self.type_info().is_bytes()
	}

	pub fn is_symbol(&self) -> bool {
		self.type_info().is_symbol()
	}

	pub fn is_error_string(&self) -> bool {
		self.type_info().is_error_string()
	}

	pub fn is_secure_string(&self) -> bool {
		self.type_info().is_secure_string()
	}

	pub fn is_url(&self) -> bool {
		self.type_info().is_url()
	}

	pub fn is_array(&self) -> bool {
		self.type_info().is_array()
	}

	pub fn is_map(&self) -> bool {
		self.type_info().is_map()
	}

	pub fn is_function(&self) -> bool {
		self.type_info().is_function()
	}

	pub fn is_date(&self) -> bool {
		self.type_info().is_date()
	}

	pub fn is_currency(&self) -> bool {
		self.type_info().is_currency()
	}

	pub fn is_color(&self) -> bool {
		self.type_info().is_color()
	}

	pub fn is_duration(&self) -> bool {
		self.type_info().is_duration()
	}

	pub fn is_angle(&self) -> bool {
		self.type_info().is_angle()
	}

	pub fn is_object(&self) -> bool {
		self.type_info().is_object()
	}

	pub fn is_resource(&self) -> bool {
		self.type_info().is_resource()
	}

	pub fn is_text_async(&self) -> bool {
		self.type_info().is_text_async()
	}

	pub fn is_container(&self) -> bool {
		self.type_info().is_container()
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.data == other.data
	}
}

impl PartialEq for Data {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) | (Self::Date(a), Self::Date(b)) | (Self::Currency(a), Self::Currency(b)) => a == b,
			(Self::Float(a), Self::Float(b)) | (Self::Duration(a), Self::Duration(b)) | (Self::Angle(a), Self::Angle(b)) => a == b,
			(Self::Color(a), Self::Color(b)) => a == b,
			(Self::String { text: a, unit: ua }, Self::String { text: b, unit: ub }) => ua == ub && a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => maps_equal(a, b),
			(Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
			(Self::Opaque { kind: ka, id: ia }, Self::Opaque { kind: kb, id: ib }) => ka == kb && ia == ib,
			_ => false,
		}
	}
}

fn maps_equal(left: &[(Value, Value)], right: &[(Value, Value)]) -> bool {
	left.len() == right.len()
		&& left
			.iter()
			.all(|(key, value)| right.iter().any(|(other_key, other_value)| key == other_key && value == other_value))
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Value").field(&self.data).finish()
	}
}

/// Literal rendering; never fails, whatever the payload.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.data {
			Data::Undefined => f.write_str("undefined"),
			Data::Null => f.write_str("null"),
			Data::Bool(v) => write!(f, "{v}"),
			Data::Int(v) => write!(f, "{v}"),
			Data::Float(v) => write!(f, "{v:?}"),
			Data::String { text, unit } => match unit {
				ValueUnit::Symbol => write!(f, "#{text}"),
				_ => write_quoted(f, text),
			},
			Data::Bytes(v) => write!(f, "b\"{}\"", v.escape_ascii()),
			Data::Array(items) => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Data::Map(entries) => {
				f.write_str("{")?;
				for (idx, (key, value)) in entries.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key}: {value}")?;
				}
				f.write_str("}")
			}
			Data::Function(callable) => write!(f, "{callable}"),
			Data::Date(v) => write!(f, "date({v})"),
			Data::Currency(v) => write!(f, "currency({v})"),
			Data::Color(v) => write!(f, "color(0x{v:08x})"),
			Data::Duration(v) => write!(f, "{v:?}s"),
			Data::Angle(v) => write!(f, "{v:?}rad"),
			Data::Opaque { kind, id } => write!(f, "<{} #{id}>", kind.tag()),
		}
	}
}

pub(crate) fn write_quoted(f: &mut impl fmt::Write, text: &str) -> fmt::Result {
	f.write_char('"')?;
	for ch in text.chars() {
		match ch {
			'"' => f.write_str("\\\"")?,
			'\\' => f.write_str("\\\\")?,
			'\n' => f.write_str("\\n")?,
			'\r' => f.write_str("\\r")?,
			'\t' => f.write_str("\\t")?,
			c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
			c => f.write_char(c)?,
		}
	}
	f.write_char('"')
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::from_data(Data::Bool(value))
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::from_data(Data::Int(i64::from(value)))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::from_data(Data::Int(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::from_data(Data::Float(value))
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::from_data(Data::String {
			text: value.into(),
			unit: ValueUnit::Plain,
		})
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::from_data(Data::String {
			text: value.into_boxed_str(),
			unit: ValueUnit::Plain,
		})
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::from_data(Data::Array(items))
	}
}

impl From<Callable> for Value {
	fn from(callable: Callable) -> Self {
		Self::from_data(Data::Function(callable))
	}
}
