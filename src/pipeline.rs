//! Hook file to output directory pipeline
//!
//! Load, generate and write run strictly in that order. Nothing touches
//! the filesystem until every file has been generated in memory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::generator::{GeneratedOutput, Generator};
use crate::output::{ReplaceConfirmation, write_output};
use crate::spec::load_hooks_file;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
	/// Number of libraries in the hook file
	pub libraries: usize,
	/// Number of hooks across all libraries
	pub hooks: usize,
	/// Files written, in write order
	pub files: Vec<PathBuf>,
}

/// Runs a generator over a hook file and persists the result
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
	generator: Generator,
}

impl Pipeline {
	/// Create a pipeline around `generator`
	#[must_use]
	pub const fn new(generator: Generator) -> Self {
		Self { generator }
	}

	/// The generator used by this pipeline
	#[must_use]
	pub const fn generator(&self) -> &Generator {
		&self.generator
	}

	/// Load `hooks_path` and generate every file in memory
	pub fn generate(&self, hooks_path: &Path) -> Result<(GeneratedOutput, RunSummary)> {
		info!("Loading hooks from {}", hooks_path.display());
		let libraries = load_hooks_file(hooks_path)?;
		let hooks: usize = libraries.iter().map(|library| library.hooks.len()).sum();
		info!("Loaded {} libraries with {} hooks", libraries.len(), hooks);

		let output = self.generator.generate(&libraries);
		let summary = RunSummary {
			libraries: libraries.len(),
			hooks,
			files: Vec::new(),
		};
		Ok((output, summary))
	}

	/// Generate from `hooks_path` and replace `outdir` with the result
	pub fn run(&self, hooks_path: &Path, outdir: &Path, confirm: &dyn ReplaceConfirmation) -> Result<RunSummary> {
		let (output, mut summary) = self.generate(hooks_path)?;

		info!("Writing {} files to {}", output.shims.len() + 1, outdir.display());
		summary.files = write_output(outdir, &output, confirm)?;

		info!("Generated {} shims and {}", output.shims.len(), output.manifest.file_name);
		Ok(summary)
	}
}
