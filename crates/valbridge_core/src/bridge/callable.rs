use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::bridge::value::Data;
use crate::bridge::{BridgeError, HostValue, Result, Value};

type NativeFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;
type HostFn = dyn Fn(&[HostValue]) -> Result<HostValue> + Send + Sync;

/// Engine-side callable handle stored in function-tagged values.
///
/// Clones share one handle; the target is released when the last clone drops.
/// Targets are `Send + Sync`, so the engine may invoke them reentrantly and
/// from any thread.
#[derive(Clone)]
pub struct Callable {
	inner: Arc<CallableInner>,
}

struct CallableInner {
	name: Option<Box<str>>,
	arity: Option<usize>,
	target: CallableTarget,
}

enum CallableTarget {
	Native(Box<NativeFn>),
	Host(HostFunction),
}

/// Host-side function that can cross into the engine.
#[derive(Clone)]
pub struct HostFunction {
	inner: Arc<HostInner>,
}

struct HostInner {
	name: Option<Box<str>>,
	arity: Option<usize>,
	target: HostTarget,
}

enum HostTarget {
	Rust(Box<HostFn>),
	Engine(Callable),
}

impl Callable {
	/// Engine-native function operating directly on values.
	///
	/// `arity` of `None` accepts any argument count.
	pub fn native<F>(arity: Option<usize>, func: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
	{
		Self {
			inner: Arc::new(CallableInner {
				name: None,
				arity,
				target: CallableTarget::Native(Box::new(func)),
			}),
		}
	}

	/// Attach a display name.
	///
	/// A handle that is already shared keeps its current name, so every clone
	/// keeps rendering the same signature.
	pub fn named(self, name: &str) -> Self {
		match Arc::try_unwrap(self.inner) {
			Ok(mut inner) => {
				inner.name = Some(name.into());
				Self { inner: Arc::new(inner) }
			}
			Err(inner) => {
				debug!("ignoring rename of shared callable to {name}");
				Self { inner }
			}
		}
	}

	/// Host→engine trampoline: expose a host function as an engine callable.
	///
	/// A host function that itself wraps an engine callable unwraps back to it.
	pub fn from_host(func: HostFunction) -> Self {
		if let HostTarget::Engine(callable) = &func.inner.target {
			return callable.clone();
		}
		Self {
			inner: Arc::new(CallableInner {
				name: func.inner.name.clone(),
				arity: func.inner.arity,
				target: CallableTarget::Host(func),
			}),
		}
	}

	/// Display name, if any.
	pub fn name(&self) -> Option<&str> {
		self.inner.name.as_deref()
	}

	/// Declared parameter count; `None` for variadic.
	pub fn arity(&self) -> Option<usize> {
		self.inner.arity
	}

	/// True when both handles refer to the same target.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Invoke with engine arguments.
	pub fn invoke(&self, args: &[Value]) -> Result<Value> {
		check_arity(self.inner.arity, args.len())?;
		trace!("invoke {self} with {} args", args.len());
		match &self.inner.target {
			CallableTarget::Native(func) => func(args),
			CallableTarget::Host(func) => {
				let host_args = args.iter().map(Value::to_host).collect::<Result<Vec<_>>>()?;
				let ret = func.call(&host_args)?;
				Value::from_host(ret)
			}
		}
	}
}

impl HostFunction {
	/// Host function taking exactly `arity` arguments.
	pub fn new<F>(arity: usize, func: F) -> Self
	where
		F: Fn(&[HostValue]) -> Result<HostValue> + Send + Sync + 'static,
	{
		Self::build(Some(arity), func)
	}

	/// Host function accepting any argument count.
	pub fn variadic<F>(func: F) -> Self
	where
		F: Fn(&[HostValue]) -> Result<HostValue> + Send + Sync + 'static,
	{
		Self::build(None, func)
	}

	fn build<F>(arity: Option<usize>, func: F) -> Self
	where
		F: Fn(&[HostValue]) -> Result<HostValue> + Send + Sync + 'static,
	{
		Self {
			inner: Arc::new(HostInner {
				name: None,
				arity,
				target: HostTarget::Rust(Box::new(func)),
			}),
		}
	}

	/// Attach a display name.
	///
	/// A handle that is already shared keeps its current name, so every clone
	/// keeps rendering the same signature.
	pub fn named(self, name: &str) -> Self {
		match Arc::try_unwrap(self.inner) {
			Ok(mut inner) => {
				inner.name = Some(name.into());
				Self { inner: Arc::new(inner) }
			}
			Err(inner) => {
				debug!("ignoring rename of shared host function to {name}");
				Self { inner }
			}
		}
	}

	/// Engine→host trampoline: expose an engine callable as a host function.
	///
	/// An engine callable that itself wraps a host function unwraps back to it.
	pub fn from_callable(callable: Callable) -> Self {
		if let CallableTarget::Host(func) = &callable.inner.target {
			return func.clone();
		}
		Self {
			inner: Arc::new(HostInner {
				name: callable.inner.name.clone(),
				arity: callable.inner.arity,
				target: HostTarget::Engine(callable),
			}),
		}
	}

	/// Display name, if any.
	pub fn name(&self) -> Option<&str> {
		self.inner.name.as_deref()
	}

	/// Declared parameter count; `None` for variadic.
	pub fn arity(&self) -> Option<usize> {
		self.inner.arity
	}

	/// True when both handles refer to the same function.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Call with host arguments. Failures raised by the function come back unchanged.
	pub fn call(&self, args: &[HostValue]) -> Result<HostValue> {
		check_arity(self.inner.arity, args.len())?;
		match &self.inner.target {
			HostTarget::Rust(func) => func(args),
			HostTarget::Engine(callable) => call_engine(callable, args),
		}
	}
}

fn check_arity(expected: Option<usize>, got: usize) -> Result<()> {
	match expected {
		Some(expected) if expected != got => Err(BridgeError::ArityMismatch { expected, got }),
		_ => Ok(()),
	}
}

fn call_engine(callable: &Callable, args: &[HostValue]) -> Result<HostValue> {
	let values = args.iter().cloned().map(Value::from_host).collect::<Result<Vec<_>>>()?;
	trace!("host call into {callable}");
	callable.invoke(&values)?.to_host()
}

impl Value {
	/// Call a function value with host arguments and convert the result back.
	pub fn call(&self, args: &[HostValue]) -> Result<HostValue> {
		match &self.data {
			Data::Function(callable) => call_engine(callable, args),
			_ => Err(BridgeError::NotCallable { got: self.type_name() }),
		}
	}

	/// Engine-level invocation: values in, value out.
	pub fn invoke(&self, args: &[Value]) -> Result<Value> {
		match &self.data {
			Data::Function(callable) => callable.invoke(args),
			_ => Err(BridgeError::NotCallable { got: self.type_name() }),
		}
	}
}

fn fmt_signature(f: &mut fmt::Formatter<'_>, name: Option<&str>, arity: Option<usize>) -> fmt::Result {
	f.write_str("<function")?;
	if let Some(name) = name {
		write!(f, " {name}")?;
	}
	if let Some(arity) = arity {
		write!(f, "/{arity}")?;
	}
	f.write_str(">")
}

impl fmt::Display for Callable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt_signature(f, self.name(), self.arity())
	}
}

impl fmt::Debug for Callable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let origin = match self.inner.target {
			CallableTarget::Native(_) => "native",
			CallableTarget::Host(_) => "host",
		};
		f.debug_struct("Callable")
			.field("name", &self.name())
			.field("arity", &self.arity())
			.field("origin", &origin)
			.finish()
	}
}

impl fmt::Display for HostFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt_signature(f, self.name(), self.arity())
	}
}

impl fmt::Debug for HostFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let origin = match self.inner.target {
			HostTarget::Rust(_) => "host",
			HostTarget::Engine(_) => "engine",
		};
		f.debug_struct("HostFunction")
			.field("name", &self.name())
			.field("arity", &self.arity())
			.field("origin", &origin)
			.finish()
	}
}

impl PartialEq for HostFunction {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

#[cfg(test)]
mod tests;
