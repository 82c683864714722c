use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors produced while converting, parsing, indexing, and calling values.
#[derive(Debug, Error)]
pub enum BridgeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Host value has no mapping onto the engine representation (or back).
	#[error("unsupported type: {type_name}")]
	UnsupportedType {
		/// Name of the offending host or value type.
		type_name: String,
	},
	/// Literal text could not be parsed.
	#[error("parse error at offset {offset}: {message}")]
	Parse {
		/// Byte offset where parsing failed.
		offset: usize,
		/// What the parser expected or found.
		message: String,
	},
	/// Recursive conversion or parse exceeded configured nesting limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Array index fell outside `[-len, len)`.
	#[error("index {index} out of range for length {len}")]
	IndexOutOfRange {
		/// Requested index, possibly negative.
		index: i64,
		/// Container length at the time of the access.
		len: usize,
	},
	/// Map read with a key that is not present.
	#[error("key not found: {key}")]
	KeyNotFound {
		/// Rendered form of the missing key.
		key: String,
	},
	/// Key kind is not accepted by the container for this mutation.
	#[error("invalid key {key} for {container}")]
	InvalidKey {
		/// Rendered form of the rejected key.
		key: String,
		/// Container type name.
		container: &'static str,
	},
	/// Operation or accessor does not apply to the value's type.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual value type name.
		got: &'static str,
	},
	/// Call attempted on a value that is not a function.
	#[error("{got} is not callable")]
	NotCallable {
		/// Actual value type name.
		got: &'static str,
	},
	/// Callable invoked with the wrong number of arguments.
	#[error("arity mismatch: expected {expected} arguments, got {got}")]
	ArityMismatch {
		/// Declared parameter count.
		expected: usize,
		/// Supplied argument count.
		got: usize,
	},
	/// Container protocol used on a scalar value.
	#[error("{got} is not a container")]
	NotAContainer {
		/// Actual value type name.
		got: &'static str,
	},
	/// Item path expression syntax is invalid.
	#[error("invalid item path: {path}")]
	InvalidItemPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Failure raised by host code inside a callback, passed through as-is.
	#[error(transparent)]
	Host(Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse error classification, mirroring the dynamic host's exception families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// IO failure.
	Io,
	/// No conversion mapping exists.
	UnsupportedType,
	/// Malformed literal or path text.
	Parse,
	/// Configured limit exceeded.
	Limit,
	/// Index out of range.
	Index,
	/// Missing or rejected key.
	Key,
	/// Wrong operation for the value's type.
	Type,
	/// Container protocol on a scalar.
	NotAContainer,
	/// Host callback failure.
	Host,
}

impl ErrorKind {
	/// True for failures a dynamic host would report as a type error.
	///
	/// Container misuse is a specialization of the type error family.
	pub fn is_type_error(self) -> bool {
		matches!(self, Self::Type | Self::NotAContainer)
	}
}

impl BridgeError {
	/// Wrap a host-side failure so it can cross the callable boundary unchanged.
	pub fn host<E>(err: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::Host(Box::new(err))
	}

	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
			Self::Parse { .. } | Self::InvalidItemPath { .. } => ErrorKind::Parse,
			Self::DepthExceeded { .. } => ErrorKind::Limit,
			Self::IndexOutOfRange { .. } => ErrorKind::Index,
			Self::KeyNotFound { .. } | Self::InvalidKey { .. } => ErrorKind::Key,
			Self::TypeMismatch { .. } | Self::NotCallable { .. } | Self::ArityMismatch { .. } => ErrorKind::Type,
			Self::NotAContainer { .. } => ErrorKind::NotAContainer,
			Self::Host(_) => ErrorKind::Host,
		}
	}
}
