//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a literal fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a literal fixture as text, panicking with the path on failure.
pub fn read_fixture(name: &str) -> String {
	let path = fixture_path(name);
	std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read fixture {}: {err}", path.display()))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Parse captured command stdout as a JSON document.
pub fn json_from_stdout(stdout: &[u8]) -> serde_json::Value {
	serde_json::from_slice(stdout).unwrap_or_else(|err| panic!("stdout is not valid JSON ({err}): {}", String::from_utf8_lossy(stdout)))
}
