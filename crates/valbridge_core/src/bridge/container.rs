use std::iter::Enumerate;
use std::slice;

use log::debug;

use crate::bridge::value::Data;
use crate::bridge::{BridgeError, Result, Value};

/// Ordered `(key, value)` pairs of an array or map.
///
/// Arrays yield `(index, element)`; maps yield entries in insertion order.
pub struct Items<'a> {
	inner: ItemsInner<'a>,
}

enum ItemsInner<'a> {
	Array(Enumerate<slice::Iter<'a, Value>>),
	Map(slice::Iter<'a, (Value, Value)>),
}

impl<'a> Iterator for Items<'a> {
	type Item = (Value, &'a Value);

	fn next(&mut self) -> Option<Self::Item> {
		match &mut self.inner {
			ItemsInner::Array(iter) => iter.next().map(|(idx, item)| (Value::from(index_value(idx)), item)),
			ItemsInner::Map(iter) => iter.next().map(|(key, value)| (key.clone(), value)),
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match &self.inner {
			ItemsInner::Array(iter) => iter.size_hint(),
			ItemsInner::Map(iter) => iter.size_hint(),
		}
	}
}

impl ExactSizeIterator for Items<'_> {}

fn index_value(idx: usize) -> i64 {
	i64::try_from(idx).unwrap_or(i64::MAX)
}

/// Largest index that may promote `undefined` to a padded array.
pub(crate) const MAX_PROMOTED_INDEX: usize = 1 << 16;

/// Map `index` into `[0, len)`, counting negative indexes from the end.
fn resolve_index(index: i64, len: usize) -> Result<usize> {
	let signed_len = index_value(len);
	let slot = if index < 0 { index + signed_len } else { index };
	if slot < 0 || slot >= signed_len {
		return Err(BridgeError::IndexOutOfRange { index, len });
	}
	usize::try_from(slot).map_err(|_| BridgeError::IndexOutOfRange { index, len })
}

/// Insert-or-update keeping the original position of existing keys.
pub(crate) fn upsert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
	match entries.iter_mut().find(|(existing, _)| *existing == key) {
		Some((_, slot)) => *slot = value,
		None => entries.push((key, value)),
	}
}

impl Value {
	fn not_a_container(&self) -> BridgeError {
		BridgeError::NotAContainer { got: self.type_name() }
	}

	fn array_index(key: &Value) -> Result<i64> {
		match key.data {
			Data::Int(index) => Ok(index),
			_ => Err(BridgeError::TypeMismatch {
				expected: "int index",
				got: key.type_name(),
			}),
		}
	}

	/// Element count of an array or entry count of a map.
	pub fn len(&self) -> Result<usize> {
		match &self.data {
			Data::Array(items) => Ok(items.len()),
			Data::Map(entries) => Ok(entries.len()),
			_ => Err(self.not_a_container()),
		}
	}

	/// True when the container holds no elements.
	pub fn is_empty(&self) -> Result<bool> {
		self.len().map(|len| len == 0)
	}

	/// Read an array element by (possibly negative) index, or a map entry by key.
	pub fn get_item(&self, key: impl Into<Value>) -> Result<&Value> {
		let key = key.into();
		match &self.data {
			Data::Array(items) => {
				let slot = resolve_index(Self::array_index(&key)?, items.len())?;
				Ok(&items[slot])
			}
			Data::Map(entries) => entries
				.iter()
				.find(|(existing, _)| *existing == key)
				.map(|(_, value)| value)
				.ok_or_else(|| BridgeError::KeyNotFound { key: key.to_string() }),
			_ => Err(self.not_a_container()),
		}
	}

	/// Mutable variant of [`Value::get_item`].
	pub fn get_item_mut(&mut self, key: impl Into<Value>) -> Result<&mut Value> {
		let key = key.into();
		let got = self.type_name();
		match &mut self.data {
			Data::Array(items) => {
				let slot = resolve_index(Self::array_index(&key)?, items.len())?;
				Ok(&mut items[slot])
			}
			Data::Map(entries) => entries
				.iter_mut()
				.find(|(existing, _)| *existing == key)
				.map(|(_, value)| value)
				.ok_or_else(|| BridgeError::KeyNotFound { key: key.to_string() }),
			_ => Err(BridgeError::NotAContainer { got }),
		}
	}

	/// Write an array element or upsert a map entry.
	///
	/// An `undefined` value is promoted in place: int keys make it an array
	/// (missing slots become `undefined`), any other key makes it a map.
	/// Promotion indexes above 65536 are rejected as out of range.
	/// Arrays never grow through this call.
	pub fn set_item(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
		let key = key.into();
		let value = value.into();

		if self.is_undefined() {
			return self.promote_with(key, value);
		}

		let got = self.type_name();
		match &mut self.data {
			Data::Array(items) => {
				let Data::Int(index) = key.data else {
					return Err(BridgeError::InvalidKey {
						key: key.to_string(),
						container: "array",
					});
				};
				let slot = resolve_index(index, items.len())?;
				items[slot] = value;
				Ok(())
			}
			Data::Map(entries) => {
				upsert_entry(entries, key, value);
				Ok(())
			}
			_ => Err(BridgeError::NotAContainer { got }),
		}
	}

	fn promote_with(&mut self, key: Value, value: Value) -> Result<()> {
		if let Data::Int(index) = key.data {
			let out_of_range = || BridgeError::IndexOutOfRange { index, len: 0 };
			let slot = usize::try_from(index)
				.ok()
				.filter(|slot| *slot <= MAX_PROMOTED_INDEX)
				.ok_or_else(out_of_range)?;
			debug!("promoting undefined to array for index {index}");
			let mut items = Vec::new();
			items.try_reserve_exact(slot + 1).map_err(|_| out_of_range())?;
			items.resize(slot, Value::new());
			items.push(value);
			self.data = Data::Array(items);
		} else {
			debug!("promoting undefined to map for key {key}");
			self.data = Data::Map(vec![(key, value)]);
		}
		Ok(())
	}

	/// Append to an array, promoting `undefined` to an empty array first.
	pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
		if self.is_undefined() {
			self.data = Data::Array(Vec::new());
		}
		let got = self.type_name();
		match &mut self.data {
			Data::Array(items) => {
				items.push(value.into());
				Ok(())
			}
			Data::Map(_) => Err(BridgeError::TypeMismatch { expected: "array", got }),
			_ => Err(BridgeError::NotAContainer { got }),
		}
	}

	/// Key presence for maps, element presence for arrays.
	pub fn contains(&self, key: impl Into<Value>) -> Result<bool> {
		let key = key.into();
		match &self.data {
			Data::Array(items) => Ok(items.contains(&key)),
			Data::Map(entries) => Ok(entries.iter().any(|(existing, _)| *existing == key)),
			_ => Err(self.not_a_container()),
		}
	}

	/// Iterate `(key, value)` pairs in order.
	pub fn items(&self) -> Result<Items<'_>> {
		let inner = match &self.data {
			Data::Array(items) => ItemsInner::Array(items.iter().enumerate()),
			Data::Map(entries) => ItemsInner::Map(entries.iter()),
			_ => return Err(self.not_a_container()),
		};
		Ok(Items { inner })
	}
}
