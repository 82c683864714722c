//! Dynamic value bridge between host code and an embedded scripting engine.

/// Tagged values, host conversion, literal parsing, containers, and callables.
pub mod bridge;
