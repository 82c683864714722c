mod host_functions {
	use crate::bridge::{BridgeError, ErrorKind, HostFunction, HostValue, Value};

	fn adder() -> HostFunction {
		HostFunction::new(2, |args| match args {
			[HostValue::Int(a), HostValue::Int(b)] => Ok(HostValue::Int(a + b)),
			_ => Err(BridgeError::TypeMismatch { expected: "int", got: "other" }),
		})
		.named("adder")
	}

	#[test]
	fn zero_argument_function_returns_its_value() {
		let func = HostFunction::new(0, |_| Ok(HostValue::Int(17)));
		let value = Value::from_host(func).expect("function converts");
		assert!(value.is_function());
		assert_eq!(value.call(&[]).expect("call succeeds"), HostValue::Int(17));
	}

	#[test]
	fn arguments_cross_the_boundary() {
		let value = Value::from_host(adder()).expect("function converts");
		assert_eq!(value.call(&[HostValue::from(42), HostValue::from(1)]).expect("call succeeds"), HostValue::Int(43));
		assert_eq!(value.invoke(&[Value::from(40), Value::from(2)]).expect("invoke succeeds"), Value::from(42));
	}

	#[test]
	fn wrong_argument_count_is_rejected() {
		let value = Value::from_host(adder()).expect("function converts");
		let err = value.call(&[HostValue::from(1)]).expect_err("too few arguments");
		assert!(matches!(err, BridgeError::ArityMismatch { expected: 2, got: 1 }));
		assert!(err.kind().is_type_error());
	}

	#[test]
	fn variadic_accepts_any_count() {
		let count = HostFunction::variadic(|args| Ok(HostValue::from(args.len() as i64)));
		let value = Value::from_host(count).expect("function converts");
		assert_eq!(value.call(&[]).expect("no args"), HostValue::Int(0));
		assert_eq!(value.call(&[HostValue::None, HostValue::None]).expect("two args"), HostValue::Int(2));
	}

	#[derive(Debug, thiserror::Error)]
	#[error("host exploded: {code}")]
	struct Exploded {
		code: u32,
	}

	#[test]
	fn host_failure_propagates_unchanged() {
		let func = HostFunction::new(0, |_| Err(BridgeError::host(Exploded { code: 7 })));
		let value = Value::from_host(func).expect("function converts");

		let err = value.call(&[]).expect_err("host raises");
		assert_eq!(err.kind(), ErrorKind::Host);
		assert_eq!(err.to_string(), "host exploded: 7");
		let BridgeError::Host(inner) = err else {
			panic!("expected host error");
		};
		let original = inner.downcast_ref::<Exploded>().expect("original error type survives");
		assert_eq!(original.code, 7);
	}

	#[test]
	fn unconvertible_return_fails_the_call() {
		let func = HostFunction::new(0, |_| Ok(HostValue::opaque(5_u8)));
		let value = Value::from_host(func).expect("function converts");
		let err = value.invoke(&[]).expect_err("opaque return");
		assert_eq!(err.kind(), ErrorKind::UnsupportedType);
	}

	#[test]
	fn non_function_is_not_callable() {
		let err = Value::from(3).call(&[]).expect_err("int is not callable");
		assert!(matches!(err, BridgeError::NotCallable { got: "int" }));
		assert!(err.kind().is_type_error());
	}
}

mod identity {
	use crate::bridge::{Callable, HostFunction, HostValue, Value};

	#[test]
	fn host_function_round_trips_to_itself() {
		let func = HostFunction::new(0, |_| Ok(HostValue::None));
		let value = Value::from_host(func.clone()).expect("function converts");
		let HostValue::Function(back) = value.to_host().expect("function converts back") else {
			panic!("expected host function");
		};
		assert!(back.ptr_eq(&func));
	}

	#[test]
	fn engine_callable_round_trips_to_itself() {
		let callable = Callable::native(Some(1), |args| Ok(args[0].clone()));
		let host = HostFunction::from_callable(callable.clone());
		assert!(Callable::from_host(host.clone()).ptr_eq(&callable));
		assert_eq!(host.call(&[HostValue::from("echo")]).expect("engine call"), HostValue::from("echo"));
	}

	#[test]
	fn clones_share_the_target() {
		let value = Value::from(Callable::native(None, |_| Ok(Value::null())));
		let copy = value.clone();
		assert!(value.as_callable().expect("function").ptr_eq(copy.as_callable().expect("function")));
	}

	#[test]
	fn shared_handles_keep_their_name() {
		let callable = Callable::native(Some(0), |_| Ok(Value::new())).named("first");
		let shared = callable.clone();
		let renamed = callable.named("second");
		assert_eq!(renamed.name(), Some("first"));
		assert!(renamed.ptr_eq(&shared));

		let func = HostFunction::variadic(|_| Ok(HostValue::None));
		let held = func.clone();
		let renamed = func.named("late");
		assert_eq!(renamed.name(), None);
		assert!(renamed.ptr_eq(&held));
	}

	#[test]
	fn names_and_arity_are_kept() {
		let func = HostFunction::new(3, |_| Ok(HostValue::None)).named("triple");
		let callable = Callable::from_host(func);
		assert_eq!(callable.name(), Some("triple"));
		assert_eq!(callable.arity(), Some(3));
		assert_eq!(callable.to_string(), "<function triple/3>");
	}
}

mod engine_side {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use crate::bridge::{Callable, Value};

	#[test]
	fn native_callable_can_call_back_into_itself() {
		let depth = Callable::native(Some(1), |args| {
			let n = args[0].as_int()?;
			Ok(Value::from(n * 2))
		});
		let outer = {
			let depth = depth.clone();
			Callable::native(Some(1), move |args| depth.invoke(args))
		};
		assert_eq!(outer.invoke(&[Value::from(21)]).expect("nested call"), Value::from(42));
	}

	#[test]
	fn callables_can_be_invoked_from_other_threads() {
		let hits = Arc::new(AtomicUsize::new(0));
		let counter = {
			let hits = Arc::clone(&hits);
			Callable::native(Some(0), move |_| {
				let seen = hits.fetch_add(1, Ordering::SeqCst) + 1;
				Ok(Value::from(seen as i64))
			})
		};

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let counter = counter.clone();
				std::thread::spawn(move || counter.invoke(&[]).expect("threaded call"))
			})
			.collect();
		for handle in handles {
			handle.join().expect("thread joins");
		}
		assert_eq!(hits.load(Ordering::SeqCst), 4);
	}

	#[test]
	fn debug_shows_origin() {
		let callable = Callable::native(Some(0), |_| Ok(Value::new())).named("tick");
		let rendered = format!("{callable:?}");
		assert!(rendered.contains("native"), "{rendered}");
		assert!(rendered.contains("tick"), "{rendered}");
	}
}
