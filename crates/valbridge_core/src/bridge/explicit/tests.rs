mod strings {
	use crate::bridge::{Value, ValueType, ValueUnit};

	#[test]
	fn symbol_is_symbol_and_string() {
		let value = Value::symbol("hello");
		assert!(value.is_symbol());
		assert!(value.is_string());
		assert_eq!(value.as_str().expect("symbol text"), "hello");
	}

	#[test]
	fn secure_string_reports_unit_code_two() {
		let value = Value::secure_string("secret");
		assert!(value.is_secure_string());
		assert!(value.is_string());
		let (tag, unit) = value.get_type_with_unit();
		assert_eq!(tag, ValueType::String);
		assert_eq!(unit.code(), 2);
	}

	#[test]
	fn url_is_a_string() {
		let value = Value::url("https://example.org");
		assert!(value.is_url());
		assert_eq!(value.get_type_with_unit().1, ValueUnit::Url);
	}

	#[test]
	fn from_error_carries_message() {
		let err = std::io::Error::other("boom");
		let value = Value::from_error(&err);
		assert!(value.is_error_string());
		assert_eq!(value.as_str().expect("error text"), "boom");
	}

	#[test]
	fn from_error_accepts_trait_objects() {
		let err: Box<dyn std::error::Error> = "plain message".into();
		let value = Value::from_error(err.as_ref());
		assert_eq!(value.as_str().expect("error text"), "plain message");
	}

	#[test]
	fn null_is_explicit() {
		let value = Value::null();
		assert!(value.is_null());
		assert!(!value.is_undefined());
	}
}

mod numeric_units {
	use crate::bridge::{EngineCaps, OpaqueKind, Value, ValueType};

	#[test]
	fn color_duration_angle_when_supported() {
		if !EngineCaps::builtin().supports_numeric_units() {
			return;
		}

		let color = Value::color(0xff00_80ff);
		assert!(color.is_color());
		assert_eq!(color.as_color().expect("color payload"), 0xff00_80ff);

		let duration = Value::duration(12.5);
		assert!(duration.is_duration());
		assert_eq!(duration.to_string(), "12.5s");

		let angle = Value::angle(1.0);
		assert!(angle.is_angle());
		assert_eq!(angle.to_string(), "1.0rad");
	}

	#[test]
	fn date_and_currency() {
		assert!(Value::date(1_000).is_date());
		assert!(Value::currency(25_000).is_currency());
		assert_ne!(Value::date(5), Value::currency(5));
	}

	#[test]
	fn opaque_handles_carry_their_kind() {
		assert_eq!(Value::opaque(OpaqueKind::Object, 1).get_type(), ValueType::Object);
		assert!(Value::opaque(OpaqueKind::Resource, 1).is_resource());
		assert!(Value::opaque(OpaqueKind::TextAsync, 1).is_text_async());
		assert_ne!(Value::opaque(OpaqueKind::Object, 1), Value::opaque(OpaqueKind::Object, 2));
	}
}
