//! Error types for the generator
//!
//! Generation itself is pure text assembly; these errors come from
//! configuring a generator with an unusable architecture list.

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Error type for generator configuration
#[derive(Debug, Error)]
pub enum GeneratorError {
	/// No architectures to build for
	#[error("At least one architecture is required")]
	NoArchitectures,

	/// An architecture name appears twice
	#[error("Architecture '{0}' is listed more than once")]
	DuplicateArchitecture(String),

	/// An architecture name cannot be used in a make target
	#[error("Invalid architecture name '{0}'")]
	InvalidArchitecture(String),
}
