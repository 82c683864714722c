use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::bridge::container::upsert_entry;
use crate::bridge::value::Data;
use crate::bridge::{BridgeError, Callable, HostFunction, Result, Value, ValueUnit};

/// Host-side dynamic datum.
///
/// This is the closed set of host shapes the bridge knows about, including
/// shapes it rejects (`Set`, `Opaque`).
#[derive(Debug, Clone)]
pub enum HostValue {
	/// Absent value.
	None,
	/// Boolean.
	Bool(bool),
	/// Integer.
	Int(i64),
	/// Float.
	Float(f64),
	/// Text.
	Text(String),
	/// Byte buffer.
	Bytes(Vec<u8>),
	/// Ordered, growable sequence.
	List(Vec<HostValue>),
	/// Fixed-size sequence.
	Tuple(Vec<HostValue>),
	/// Insertion-ordered key/value mapping.
	Map(Vec<(HostValue, HostValue)>),
	/// Unordered set; has no engine mapping.
	Set(Vec<HostValue>),
	/// Host function.
	Function(HostFunction),
	/// Error object.
	Error(HostError),
	/// Any other host object; has no engine mapping.
	Opaque(OpaqueHost),
}

/// Host error captured as its type name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
	/// Rust type name of the captured error.
	pub type_name: String,
	/// `Display` text of the error.
	pub message: String,
}

impl HostError {
	/// Capture an error's type name and message.
	pub fn capture<E: std::error::Error + ?Sized>(err: &E) -> Self {
		Self {
			type_name: std::any::type_name::<E>().to_owned(),
			message: err.to_string(),
		}
	}
}

/// Arbitrary host object the bridge cannot convert.
#[derive(Clone)]
pub struct OpaqueHost {
	type_name: &'static str,
	object: Arc<dyn Any + Send + Sync>,
}

impl OpaqueHost {
	/// Rust type name of the wrapped object.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Borrow the wrapped object as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.object.downcast_ref()
	}
}

impl fmt::Debug for OpaqueHost {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("OpaqueHost").field(&self.type_name).finish()
	}
}

impl HostValue {
	/// Wrap any host object.
	pub fn opaque<T: Any + Send + Sync>(object: T) -> Self {
		Self::Opaque(OpaqueHost {
			type_name: std::any::type_name::<T>(),
			object: Arc::new(object),
		})
	}

	/// Capture an error object.
	pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
		Self::Error(HostError::capture(err))
	}

	/// Host-side type name, as a dynamic host would report it.
	pub fn type_name(&self) -> &str {
		match self {
			Self::None => "none",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Text(_) => "text",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
			Self::Tuple(_) => "tuple",
			Self::Map(_) => "map",
			Self::Set(_) => "set",
			Self::Function(_) => "function",
			Self::Error(err) => &err.type_name,
			Self::Opaque(object) => object.type_name,
		}
	}
}

impl PartialEq for HostValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::None, Self::None) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) | (Self::Set(a), Self::Set(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Function(a), Self::Function(b)) => a == b,
			(Self::Error(a), Self::Error(b)) => a == b,
			(Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(&a.object, &b.object),
			_ => false,
		}
	}
}

/// Limits for recursive host/value conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
	/// Maximum number of nested sequences/mappings; scalars do not count.
	pub max_depth: u32,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self { max_depth: 256 }
	}
}

impl Value {
	/// Convert a host value with default limits.
	pub fn from_host(host: impl Into<HostValue>) -> Result<Self> {
		Self::from_host_with(host.into(), &ConvertOptions::default())
	}

	/// Convert a host value, recursing into sequences and mappings.
	///
	/// Anything already converted is dropped if a later element fails.
	pub fn from_host_with(host: HostValue, options: &ConvertOptions) -> Result<Self> {
		host_to_value(host, 0, options)
	}

	/// Convert back to a host value with default limits.
	pub fn to_host(&self) -> Result<HostValue> {
		self.to_host_with(&ConvertOptions::default())
	}

	/// Convert back to a host value.
	///
	/// Numeric subtypes unwrap to their raw payload; string units collapse to text.
	pub fn to_host_with(&self, options: &ConvertOptions) -> Result<HostValue> {
		value_to_host(self, 0, options)
	}
}

/// `depth` counts the containers enclosing the value being converted.
fn check_depth(is_container: bool, depth: u32, options: &ConvertOptions) -> Result<()> {
	if is_container && depth >= options.max_depth {
		return Err(BridgeError::DepthExceeded { max_depth: options.max_depth });
	}
	Ok(())
}

fn host_to_value(host: HostValue, depth: u32, options: &ConvertOptions) -> Result<Value> {
	check_depth(matches!(host, HostValue::List(_) | HostValue::Tuple(_) | HostValue::Map(_)), depth, options)?;

	let data = match host {
		HostValue::None => Data::Undefined,
		HostValue::Bool(v) => Data::Bool(v),
		HostValue::Int(v) => Data::Int(v),
		HostValue::Float(v) => Data::Float(v),
		HostValue::Text(text) => Data::String {
			text: text.into_boxed_str(),
			unit: ValueUnit::Plain,
		},
		HostValue::Bytes(bytes) => Data::Bytes(bytes),
		HostValue::List(items) | HostValue::Tuple(items) => Data::Array(
			items
				.into_iter()
				.map(|item| host_to_value(item, depth + 1, options))
				.collect::<Result<Vec<_>>>()?,
		),
		HostValue::Map(entries) => {
			let mut out = Vec::with_capacity(entries.len());
			for (key, value) in entries {
				let key = host_to_value(key, depth + 1, options)?;
				let value = host_to_value(value, depth + 1, options)?;
				upsert_entry(&mut out, key, value);
			}
			Data::Map(out)
		}
		HostValue::Function(func) => Data::Function(Callable::from_host(func)),
		HostValue::Error(err) => Data::String {
			text: err.message.into_boxed_str(),
			unit: ValueUnit::Error,
		},
		unsupported @ (HostValue::Set(_) | HostValue::Opaque(_)) => {
			debug!("rejecting host value of type {}", unsupported.type_name());
			return Err(BridgeError::UnsupportedType {
				type_name: unsupported.type_name().to_owned(),
			});
		}
	};

	Ok(Value::from_data(data))
}

fn value_to_host(value: &Value, depth: u32, options: &ConvertOptions) -> Result<HostValue> {
	check_depth(value.is_container(), depth, options)?;

	Ok(match &value.data {
		Data::Undefined | Data::Null => HostValue::None,
		Data::Bool(v) => HostValue::Bool(*v),
		Data::Int(v) | Data::Date(v) | Data::Currency(v) => HostValue::Int(*v),
		Data::Float(v) | Data::Duration(v) | Data::Angle(v) => HostValue::Float(*v),
		Data::Color(v) => HostValue::Int(i64::from(*v)),
		Data::String { text, .. } => HostValue::Text(text.to_string()),
		Data::Bytes(bytes) => HostValue::Bytes(bytes.clone()),
		Data::Array(items) => HostValue::List(
			items
				.iter()
				.map(|item| value_to_host(item, depth + 1, options))
				.collect::<Result<Vec<_>>>()?,
		),
		Data::Map(entries) => HostValue::Map(
			entries
				.iter()
				.map(|(key, value)| -> Result<(HostValue, HostValue)> {
					let key = value_to_host(key, depth + 1, options)?;
					let value = value_to_host(value, depth + 1, options)?;
					Ok((key, value))
				})
				.collect::<Result<Vec<_>>>()?,
		),
		Data::Function(callable) => HostValue::Function(HostFunction::from_callable(callable.clone())),
		Data::Opaque { .. } => {
			debug!("no host mapping for {}", value.type_name());
			return Err(BridgeError::UnsupportedType {
				type_name: value.type_name().to_owned(),
			});
		}
	})
}

impl TryFrom<HostValue> for Value {
	type Error = BridgeError;

	fn try_from(host: HostValue) -> Result<Self> {
		Value::from_host(host)
	}
}

impl TryFrom<&Value> for HostValue {
	type Error = BridgeError;

	fn try_from(value: &Value) -> Result<Self> {
		value.to_host()
	}
}

impl From<()> for HostValue {
	fn from(_: ()) -> Self {
		Self::None
	}
}

impl From<bool> for HostValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! host_int_from {
	($($ty:ty),*) => {
		$(impl From<$ty> for HostValue {
			fn from(value: $ty) -> Self {
				Self::Int(i64::from(value))
			}
		})*
	};
}

host_int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for HostValue {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl From<f64> for HostValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for HostValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for HostValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&[u8]> for HostValue {
	fn from(value: &[u8]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for HostValue {
	fn from(value: &[u8; N]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

impl From<HostFunction> for HostValue {
	fn from(func: HostFunction) -> Self {
		Self::Function(func)
	}
}

impl From<HostError> for HostValue {
	fn from(err: HostError) -> Self {
		Self::Error(err)
	}
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::None, Into::into)
	}
}

impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

impl<A: Into<HostValue>, B: Into<HostValue>> From<(A, B)> for HostValue {
	fn from((a, b): (A, B)) -> Self {
		Self::Tuple(vec![a.into(), b.into()])
	}
}

impl<A: Into<HostValue>, B: Into<HostValue>, C: Into<HostValue>> From<(A, B, C)> for HostValue {
	fn from((a, b, c): (A, B, C)) -> Self {
		Self::Tuple(vec![a.into(), b.into(), c.into()])
	}
}

impl<K: Into<HostValue>, V: Into<HostValue>, S> From<HashMap<K, V, S>> for HostValue {
	fn from(map: HashMap<K, V, S>) -> Self {
		Self::Map(map.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

impl<K: Into<HostValue>, V: Into<HostValue>> From<BTreeMap<K, V>> for HostValue {
	fn from(map: BTreeMap<K, V>) -> Self {
		Self::Map(map.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

impl<T: Into<HostValue>, S> From<HashSet<T, S>> for HostValue {
	fn from(set: HashSet<T, S>) -> Self {
		Self::Set(set.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<HostValue>> From<BTreeSet<T>> for HostValue {
	fn from(set: BTreeSet<T>) -> Self {
		Self::Set(set.into_iter().map(Into::into).collect())
	}
}
