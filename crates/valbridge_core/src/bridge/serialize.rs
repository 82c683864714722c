use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::bridge::value::Data;
use crate::bridge::{Value, ValueUnit};

/// Placeholder emitted in place of secure string text.
pub(crate) const REDACTED: &str = "<redacted>";

/// Serializes the literal shape: absent values as unit, subtypes as their raw
/// payload, functions as their rendered signature.
///
/// Secure strings serialize as `"<redacted>"`; read their text with
/// [`Value::as_str`].
impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match &self.data {
			Data::Undefined | Data::Null => serializer.serialize_unit(),
			Data::Bool(v) => serializer.serialize_bool(*v),
			Data::Int(v) | Data::Date(v) | Data::Currency(v) => serializer.serialize_i64(*v),
			Data::Float(v) | Data::Duration(v) | Data::Angle(v) => serializer.serialize_f64(*v),
			Data::Color(v) => serializer.serialize_u32(*v),
			Data::String { unit: ValueUnit::Secure, .. } => serializer.serialize_str(REDACTED),
			Data::String { text, .. } => serializer.serialize_str(text),
			Data::Bytes(v) => serializer.serialize_bytes(v),
			Data::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Data::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Data::Function(callable) => serializer.collect_str(callable),
			Data::Opaque { id, .. } => serializer.serialize_u64(*id),
		}
	}
}
