//! Replacement confirmation
//!
//! This module contains the `ReplaceConfirmation` trait, asked once
//! before an existing output directory is deleted.

use std::io;
use std::path::Path;

/// Trait for deciding whether an existing output directory may be replaced
pub trait ReplaceConfirmation {
	/// Return true to delete `dir` and regenerate it from scratch
	///
	/// An error means no answer could be obtained, which is not the same
	/// as the user declining.
	fn confirm_replace(&self, dir: &Path) -> io::Result<bool>;

	/// Get the name of the confirmation strategy
	///
	/// This is used for debugging and logging purposes.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Confirmation that always replaces
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReplace;

impl AlwaysReplace {
	/// Create a new `AlwaysReplace`
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl ReplaceConfirmation for AlwaysReplace {
	fn confirm_replace(&self, _dir: &Path) -> io::Result<bool> {
		Ok(true)
	}

	fn name(&self) -> &'static str {
		"AlwaysReplace"
	}
}

/// Confirmation that never replaces
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverReplace;

impl NeverReplace {
	/// Create a new `NeverReplace`
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl ReplaceConfirmation for NeverReplace {
	fn confirm_replace(&self, _dir: &Path) -> io::Result<bool> {
		Ok(false)
	}

	fn name(&self) -> &'static str {
		"NeverReplace"
	}
}

impl<F> ReplaceConfirmation for F
where
	F: Fn(&Path) -> bool,
{
	fn confirm_replace(&self, dir: &Path) -> io::Result<bool> {
		Ok(self(dir))
	}
}
