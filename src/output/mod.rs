//! Output directory handling
//!
//! The output directory is always rebuilt from scratch so stale shims
//! from an earlier run never sit next to fresh ones.

mod confirm;
mod error;

pub use confirm::{AlwaysReplace, NeverReplace, ReplaceConfirmation};
pub use error::{OutputError, Result};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::generator::GeneratedOutput;

/// Make `dir` an empty directory
///
/// If it already exists, `confirm` decides whether it may be removed.
pub fn prepare_dir(dir: &Path, confirm: &dyn ReplaceConfirmation) -> Result<()> {
	if dir.exists() {
		if !dir.is_dir() {
			return Err(OutputError::NotADirectory(dir.to_path_buf()));
		}
		debug!("Asking {} whether to replace {}", confirm.name(), dir.display());
		let replace = confirm
			.confirm_replace(dir)
			.map_err(OutputError::io("confirm replacing", dir))?;
		if !replace {
			warn!("Not replacing existing output directory {}", dir.display());
			return Err(OutputError::Declined(dir.to_path_buf()));
		}
		info!("Removing existing output directory {}", dir.display());
		fs::remove_dir_all(dir).map_err(OutputError::io("remove", dir))?;
	}

	fs::create_dir_all(dir).map_err(OutputError::io("create", dir))
}

/// Replace `dir` with the generated files
///
/// Returns the paths written, shims first and the Makefile last.
pub fn write_output(dir: &Path, output: &GeneratedOutput, confirm: &dyn ReplaceConfirmation) -> Result<Vec<PathBuf>> {
	prepare_dir(dir, confirm)?;

	let mut written = Vec::new();
	for file in output.files() {
		let path = dir.join(&file.file_name);
		fs::write(&path, &file.contents).map_err(OutputError::io("write", &path))?;
		debug!("Wrote {} ({} bytes)", path.display(), file.contents.len());
		written.push(path);
	}

	Ok(written)
}
