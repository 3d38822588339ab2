//! Shim and manifest generation
//!
//! This module turns validated library specs into C shim sources and
//! a Makefile that builds them for every configured architecture.

mod builder;
mod error;
mod headers;
mod manifest;
mod shim;

pub use builder::{GeneratorBuilder, GeneratorConfig};
pub use error::{GeneratorError, Result};
pub use headers::{DEFAULT_HEADERS, collect_headers, render_includes};
pub use manifest::{COMPILE_FLAGS, Manifest, render_manifest, target_name};
pub use shim::{INIT_ROUTINE, ShimSource, render_shim};

use tracing::debug;

use crate::spec::{Architecture, LibrarySpec};

/// File name of the generated build manifest
pub const MANIFEST_FILE_NAME: &str = "Makefile";

/// A generated file, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
	/// File name relative to the output directory
	pub file_name: String,
	/// File contents
	pub contents: String,
}

/// Everything produced for one hook file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
	/// One shim source per library, in hook file order
	pub shims: Vec<GeneratedFile>,
	/// The Makefile
	pub manifest: GeneratedFile,
}

impl GeneratedOutput {
	/// All files in write order: shims first, then the manifest
	pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
		self.shims.iter().chain(std::iter::once(&self.manifest))
	}
}

/// Shim and manifest generator
///
/// Created through `GeneratorBuilder`. Generation is pure: the same
/// specs always produce the same text.
#[derive(Debug, Clone)]
pub struct Generator {
	config: GeneratorConfig,
}

impl Default for Generator {
	fn default() -> Self {
		Self::new(GeneratorConfig::default())
	}
}

impl Generator {
	pub(crate) const fn new(config: GeneratorConfig) -> Self {
		Self { config }
	}

	/// Create a new generator builder
	#[must_use]
	pub fn builder() -> GeneratorBuilder {
		GeneratorBuilder::new()
	}

	/// The generator configuration
	#[must_use]
	pub const fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// The architectures targets are generated for
	#[must_use]
	pub fn architectures(&self) -> &[Architecture] {
		&self.config.architectures
	}

	/// Generate the shim source for one library
	#[must_use]
	pub fn shim(&self, library: &LibrarySpec) -> GeneratedFile {
		debug!(
			"Generating shim for {} ({} hooks)",
			library.library_path,
			library.hooks.len()
		);
		GeneratedFile {
			file_name: library.source_file_name(),
			contents: render_shim(library, self.config.harden),
		}
	}

	/// Generate the Makefile for all libraries
	#[must_use]
	pub fn manifest(&self, libraries: &[LibrarySpec]) -> GeneratedFile {
		debug!(
			"Generating manifest for {} libraries x {} architectures",
			libraries.len(),
			self.config.architectures.len()
		);
		GeneratedFile {
			file_name: MANIFEST_FILE_NAME.to_string(),
			contents: render_manifest(libraries, &self.config.architectures),
		}
	}

	/// Generate every output file for `libraries`
	#[must_use]
	pub fn generate(&self, libraries: &[LibrarySpec]) -> GeneratedOutput {
		GeneratedOutput {
			shims: libraries.iter().map(|library| self.shim(library)).collect(),
			manifest: self.manifest(libraries),
		}
	}
}
