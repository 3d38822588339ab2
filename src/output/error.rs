//! Error types for writing generated files

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for output operations
pub type Result<T> = std::result::Result<T, OutputError>;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
	/// The user declined to replace an existing directory
	#[error("Output directory {0} exists and was not replaced")]
	Declined(PathBuf),

	/// The output path exists but is not a directory
	#[error("Output path {0} exists and is not a directory")]
	NotADirectory(PathBuf),

	/// A filesystem operation failed
	#[error("Failed to {action} {path}: {source}")]
	Io {
		action: &'static str,
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl OutputError {
	pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { action, path, source }
	}
}
