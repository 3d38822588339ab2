//! Crate-level error type

use thiserror::Error;

use crate::generator::GeneratorError;
use crate::output::OutputError;
use crate::spec::SpecError;

/// Result type for hookster operations
pub type Result<T> = std::result::Result<T, HooksterError>;

/// Error type covering every stage of a run
#[derive(Debug, Error)]
pub enum HooksterError {
	/// The hook file could not be loaded or failed validation
	#[error(transparent)]
	Spec(#[from] SpecError),

	/// The generator configuration is unusable
	#[error(transparent)]
	Generator(#[from] GeneratorError),

	/// Generated files could not be written
	#[error(transparent)]
	Output(#[from] OutputError),
}
