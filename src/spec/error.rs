//! Error types for hook file loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for spec loading
pub type Result<T> = std::result::Result<T, SpecError>;

/// Error type for spec loading and validation
#[derive(Debug, Error)]
pub enum SpecError {
	/// The hook file could not be read
	#[error("Failed to read hook file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The hook file is not valid JSON or does not match the schema
	#[error("Malformed hook file: {0}")]
	Json(#[from] serde_json::Error),

	/// A library entry has an empty `library` path
	#[error("Library entry #{index} has an empty library path")]
	EmptyLibraryPath { index: usize },

	/// A library path escapes to something unusable as an identifier or make target
	#[error("Library '{library}' maps to output name '{escaped}', which may only contain letters, digits and '_'")]
	InvalidLibraryName { library: String, escaped: String },

	/// A hook's return type is empty
	#[error("Function '{function}' in library '{library}' has an empty return type")]
	EmptyReturnType { library: String, function: String },

	/// A hook is missing one of its required keys
	#[error("Hook #{hook} of library '{library}' is missing required field '{field}'")]
	MissingField {
		library: String,
		hook: usize,
		field: &'static str,
	},

	/// A hook's function name cannot be used as a C identifier
	#[error("Hook #{hook} of library '{library}' has invalid or reserved function name '{function}'")]
	InvalidFunctionName {
		library: String,
		hook: usize,
		function: String,
	},

	/// An argument entry is not a single `type: name` pair
	#[error("Argument #{arg} of '{function}' in library '{library}': {reason}")]
	InvalidArgument {
		library: String,
		function: String,
		arg: usize,
		reason: String,
	},

	/// The same function is hooked twice in one library
	#[error("Function '{function}' is hooked more than once in library '{library}'")]
	DuplicateHook { library: String, function: String },

	/// Two library paths escape to the same identifier
	#[error("Libraries '{first}' and '{second}' both map to output name '{escaped}'")]
	NameCollision {
		first: String,
		second: String,
		escaped: String,
	},
}
