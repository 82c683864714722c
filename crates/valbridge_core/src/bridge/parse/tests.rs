mod literals {
	use crate::bridge::{Value, ValueType, parse};

	#[test]
	fn empty_input_is_undefined() {
		assert!(parse("").expect("empty parses").is_undefined());
		assert!(parse("  \n\t").expect("blank parses").is_undefined());
		assert!(parse("// only a comment").expect("comment parses").is_undefined());
	}

	#[test]
	fn keywords() {
		assert!(parse("null").expect("null parses").is_null());
		assert!(parse("undefined").expect("undefined parses").is_undefined());
		assert_eq!(parse("true").expect("true parses"), Value::from(true));
		assert_eq!(parse(" false ").expect("false parses"), Value::from(false));
	}

	#[test]
	fn numbers_prefer_int() {
		assert_eq!(parse("42").expect("int").get_type(), ValueType::Int);
		assert_eq!(parse("-7").expect("negative int"), Value::from(-7));
		assert_eq!(parse("1.25").expect("float"), Value::from(1.25));
		assert_eq!(parse("1e3").expect("exponent"), Value::from(1000.0));
		assert_eq!(parse("9223372036854775808").expect("overflowing int").get_type(), ValueType::Float);
	}

	#[test]
	fn array_and_object() {
		let array = parse("[3, 4]").expect("array parses");
		assert_eq!(array, Value::from(vec![Value::from(3), Value::from(4)]));

		let object = parse(r#"{"five":5,"seven":7}"#).expect("object parses");
		assert_eq!(object.len().expect("map length"), 2);
		assert_eq!(object.get_item("five").expect("five"), &Value::from(5));
		assert_eq!(object.get_item("seven").expect("seven"), &Value::from(7));
	}

	#[test]
	fn empty_containers() {
		assert!(parse("[]").expect("empty array").is_array());
		assert!(parse("{ }").expect("empty object").is_map());
	}

	#[test]
	fn duplicate_keys_keep_last_value() {
		let object = parse("{a: 1, b: 2, a: 3}").expect("object parses");
		assert_eq!(object.len().expect("map length"), 2);
		assert_eq!(object.get_item("a").expect("a"), &Value::from(3));
	}

	#[test]
	fn string_escapes() {
		assert_eq!(parse(r#""tab\tquote\"""#).expect("escapes"), Value::from("tab\tquote\""));
		assert_eq!(parse(r#""\u00e9\ud83d\ude00""#).expect("unicode escapes"), Value::from("\u{e9}\u{1f600}"));
		assert_eq!(parse("\"snow \u{2603}\"").expect("raw unicode"), Value::from("snow \u{2603}"));
	}

	#[test]
	fn from_str_and_value_parse_agree() {
		let a: Value = "[1, {x: 2}]".parse().expect("from_str parses");
		let b = Value::parse("[1, {x: 2}]").expect("Value::parse parses");
		assert_eq!(a, b);
	}
}

mod extensions {
	use crate::bridge::{ErrorKind, ParseOptions, Value, parse, parse_with};

	#[test]
	fn relaxed_grammar_by_default() {
		let value = parse(
			"{
				// line comment
				bare_key: 'single', /* block */
				$dollar-key: [1, 2,],
			}",
		)
		.expect("relaxed literal parses");
		assert_eq!(value.get_item("bare_key").expect("bare key"), &Value::from("single"));
		assert_eq!(value.get_item("$dollar-key").expect("dollar key").len().expect("array length"), 2);
	}

	#[test]
	fn strict_json_rejects_every_extension() {
		let strict = ParseOptions::strict_json();
		for text in ["{a: 1}", "'x'", "[1,]", "// c\n1", "{\"a\": 1,}"] {
			let err = parse_with(text, &strict).expect_err("extension rejected");
			assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
		}
		assert!(parse_with(r#"{"a": [1, 2.5, "x"]}"#, &strict).is_ok());
	}

	#[test]
	fn depth_limit() {
		let options = ParseOptions {
			max_depth: 3,
			..ParseOptions::default()
		};
		assert!(parse_with("[[[1]]]", &options).is_ok());
		let err = parse_with("[[[[[1]]]]]", &options).expect_err("too deep");
		assert_eq!(err.kind(), ErrorKind::Limit);
	}

	#[test]
	fn depth_limit_counts_containers_exactly() {
		let options = ParseOptions {
			max_depth: 2,
			..ParseOptions::default()
		};
		assert!(parse_with("{a: [1, 2]}", &options).is_ok());
		assert!(parse_with("[[\"scalar leaves are free\"]]", &options).is_ok());
		assert_eq!(parse_with("[[[]]]", &options).expect_err("three levels").kind(), ErrorKind::Limit);
		assert_eq!(parse_with("{a: {b: {}}}", &options).expect_err("three levels").kind(), ErrorKind::Limit);

		let flat = ParseOptions {
			max_depth: 0,
			..ParseOptions::default()
		};
		assert!(parse_with("42", &flat).is_ok());
		assert!(parse_with("[]", &flat).is_err());
	}
}

mod errors {
	use crate::bridge::{BridgeError, ErrorKind, parse};

	fn offset_of(text: &str) -> usize {
		match parse(text) {
			Err(BridgeError::Parse { offset, .. }) => offset,
			other => panic!("expected parse error for {text:?}, got {other:?}"),
		}
	}

	#[test]
	fn incomplete_object_fails() {
		let err = parse("{item: ").expect_err("incomplete object");
		assert_eq!(err.kind(), ErrorKind::Parse);
		assert!(err.to_string().contains("unexpected end of input"), "{err}");
	}

	#[test]
	fn malformed_inputs_fail_with_offsets() {
		assert_eq!(offset_of("[1 2]"), 3);
		assert_eq!(offset_of("nul"), 0);
		assert_eq!(offset_of("01"), 0);
		assert_eq!(offset_of("1 2"), 2);
		assert_eq!(offset_of("\"open"), 5);
		assert_eq!(offset_of("\"bad \\q\""), 6);
		assert_eq!(offset_of("/* open"), 0);
		assert_eq!(offset_of("{\"a\" 1}"), 5);
	}

	#[test]
	fn unicode_escape_requires_four_hex_digits() {
		for text in [r#""\u+041""#, r#""\u-041""#, r#""\u 041""#, r#""\u00g1""#, r#""\u12""#] {
			let err = parse(text).expect_err("malformed unicode escape");
			assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
		}
		assert_eq!(offset_of(r#""\u+041""#), 3);
	}

	#[test]
	fn lone_surrogate_fails() {
		let err = parse(r#""\ud83d""#).expect_err("unpaired surrogate");
		assert_eq!(err.kind(), ErrorKind::Parse);
	}
}

mod files {
	use valbridge_testkit::fixture_path;

	use crate::bridge::{ErrorKind, ParseOptions, Value, parse_file, parse_with};

	#[test]
	fn settings_fixture_parses() {
		let value = parse_file(fixture_path("settings.lit")).expect("fixture parses");
		assert_eq!(value.get_item("name").expect("name"), &Value::from("main window"));
		assert_eq!(value.get_item("size").expect("size").get_item(1).expect("height"), &Value::from(600));
		assert!(value.get_item("title").expect("title").is_null());
		assert_eq!(value.get_item("tags").expect("tags").len().expect("tag count"), 2);
	}

	#[test]
	fn strict_fixture_is_plain_json() {
		let text = valbridge_testkit::read_fixture("strict.json");
		let value = parse_with(&text, &ParseOptions::strict_json()).expect("strict fixture parses");
		assert_eq!(value.get_item("seven").expect("seven"), &Value::from(7));
	}

	#[test]
	fn broken_fixture_fails() {
		let err = parse_file(fixture_path("broken.lit")).expect_err("broken fixture");
		assert_eq!(err.kind(), ErrorKind::Parse);
	}

	#[test]
	fn missing_file_is_io_error() {
		let err = parse_file(fixture_path("does-not-exist.lit")).expect_err("missing file");
		assert_eq!(err.kind(), ErrorKind::Io);
	}
}
