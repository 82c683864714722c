use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use valbridge_testkit::{fixture_path, json_from_stdout, target_dir};

const BIN_NAME: &str = if cfg!(windows) { "valbridge.exe" } else { "valbridge" };

static VALBRIDGE_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Fixture path rendered as a command-line argument.
pub(crate) fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_valbridge(args: &[&str]) -> Output {
	let bin = VALBRIDGE_BIN.get_or_init(locate_bin);
	Command::new(bin).args(args).output().expect("valbridge command executes")
}

/// Run a command that must succeed and decode its stdout as JSON.
pub(crate) fn run_valbridge_json(args: &[&str]) -> serde_json::Value {
	let output = run_valbridge(args);
	assert!(
		output.status.success(),
		"valbridge {} exited with {}: {}",
		args.join(" "),
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	json_from_stdout(&output.stdout)
}

/// Unit tests run from `<target>/<profile>/deps`; the binary sits one level up.
fn locate_bin() -> PathBuf {
	if let Some(path) = std::env::var_os("CARGO_BIN_EXE_valbridge") {
		return PathBuf::from(path);
	}

	let beside_tests = std::env::current_exe()
		.ok()
		.and_then(|exe| exe.parent().and_then(Path::parent).map(|profile_dir| profile_dir.join(BIN_NAME)));
	if let Some(bin) = beside_tests.filter(|bin| bin.is_file()) {
		return bin;
	}

	build_bin()
}

fn build_bin() -> PathBuf {
	let status = Command::new(std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into()))
		.current_dir(env!("CARGO_MANIFEST_DIR"))
		.args(["build", "--quiet", "--bin", "valbridge"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "building the valbridge binary failed");

	let bin = target_dir().join("debug").join(BIN_NAME);
	assert!(bin.is_file(), "valbridge binary missing at {}", bin.display());
	bin
}
