mod callable;
mod container;
mod convert;
mod engine;
mod error;
mod explicit;
mod parse;
mod path;
mod serialize;
mod types;
mod value;

/// Engine-side and host-side callable handles.
pub use callable::{Callable, HostFunction};
/// Ordered container iteration.
pub use container::Items;
/// Host-side datum and conversion limits.
pub use convert::{ConvertOptions, HostError, HostValue, OpaqueHost};
/// Engine capability query.
pub use engine::{BUILTIN_ENGINE_VERSION, EngineCaps};
/// Error and result aliases.
pub use error::{BridgeError, ErrorKind, Result};
/// Literal parser entry points and options.
pub use parse::{ParseOptions, parse, parse_file, parse_with};
/// Item path parser types.
pub use path::{ItemPath, PathStep};
/// Tag vocabulary and classification.
pub use types::{TypeInfo, ValueType, ValueUnit};
/// Dynamic value type.
pub use value::{OpaqueKind, Value};
