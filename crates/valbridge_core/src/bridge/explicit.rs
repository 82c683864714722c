use crate::bridge::value::Data;
use crate::bridge::{OpaqueKind, Value, ValueUnit};

impl Value {
	fn string_with_unit(text: &str, unit: ValueUnit) -> Self {
		Self::from_data(Data::String { text: text.into(), unit })
	}

	/// Explicit `null`, distinct from the implicit `undefined`.
	pub fn null() -> Self {
		Self::from_data(Data::Null)
	}

	/// Symbol; classified both as symbol and as string.
	pub fn symbol(text: &str) -> Self {
		Self::string_with_unit(text, ValueUnit::Symbol)
	}

	/// String flagged for sensitive handling.
	pub fn secure_string(text: &str) -> Self {
		Self::string_with_unit(text, ValueUnit::Secure)
	}

	/// URL string.
	pub fn url(text: &str) -> Self {
		Self::string_with_unit(text, ValueUnit::Url)
	}

	/// Error string carrying the error's message. Never fails.
	pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
		Self::string_with_unit(&err.to_string(), ValueUnit::Error)
	}

	/// Color packed as `0xAABBGGRR`.
	pub fn color(rgba: u32) -> Self {
		Self::from_data(Data::Color(rgba))
	}

	/// Duration in seconds.
	pub fn duration(seconds: f64) -> Self {
		Self::from_data(Data::Duration(seconds))
	}

	/// Angle in radians.
	pub fn angle(radians: f64) -> Self {
		Self::from_data(Data::Angle(radians))
	}

	/// Date as engine ticks.
	pub fn date(ticks: i64) -> Self {
		Self::from_data(Data::Date(ticks))
	}

	/// Currency in 1/10000 units.
	pub fn currency(units: i64) -> Self {
		Self::from_data(Data::Currency(units))
	}

	/// Opaque engine handle.
	pub fn opaque(kind: OpaqueKind, id: u64) -> Self {
		Self::from_data(Data::Opaque { kind, id })
	}
}

#[cfg(test)]
mod tests;
