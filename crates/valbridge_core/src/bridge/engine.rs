/// Version number of the in-process engine representation, `0xMMmmPPBB`.
pub const BUILTIN_ENGINE_VERSION: u32 = 0x0500_0000;

/// Last engine version without color, duration, and angle values.
const NUMERIC_UNITS_AFTER: u32 = 0x0400_0100;

/// Capabilities of a particular engine build, queried explicitly by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCaps {
	/// Packed `major.minor.patch.build` version.
	pub version: u32,
}

impl EngineCaps {
	/// Capabilities for a given packed version.
	pub fn new(version: u32) -> Self {
		Self { version }
	}

	/// Capabilities of the in-process representation.
	pub fn builtin() -> Self {
		Self::new(BUILTIN_ENGINE_VERSION)
	}

	/// Whether color, duration, and angle values are available.
	pub fn supports_numeric_units(self) -> bool {
		self.version > NUMERIC_UNITS_AFTER
	}

	/// Version as `[major, minor, patch, build]`.
	pub fn version_parts(self) -> [u8; 4] {
		self.version.to_be_bytes()
	}

	/// Dotted version label.
	pub fn version_label(self) -> String {
		let [major, minor, patch, build] = self.version_parts();
		format!("{major}.{minor}.{patch}.{build}")
	}
}
