//! Builder for creating generators
//!
//! This module contains the `GeneratorBuilder` struct and the
//! configuration it produces.

use std::collections::HashSet;

use crate::generator::{Generator, GeneratorError, Result};
use crate::spec::Architecture;

/// Configuration for a generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
	/// Architectures every library is built for, in manifest order
	pub architectures: Vec<Architecture>,
	/// Whether the generated init routine runs once and checks `dlsym`
	pub harden: bool,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			architectures: Architecture::defaults(),
			harden: false,
		}
	}
}

/// Builder for creating generators
#[derive(Debug, Default)]
pub struct GeneratorBuilder {
	config: GeneratorConfig,
}

impl GeneratorBuilder {
	/// Create a new generator builder with default settings
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the architecture list
	#[must_use]
	pub fn architectures(mut self, architectures: impl IntoIterator<Item = Architecture>) -> Self {
		self.config.architectures = architectures.into_iter().collect();
		self
	}

	/// Append one architecture
	#[must_use]
	pub fn architecture(mut self, architecture: Architecture) -> Self {
		self.config.architectures.push(architecture);
		self
	}

	/// Enable or disable the hardened init routine
	#[must_use]
	pub const fn harden(mut self, harden: bool) -> Self {
		self.config.harden = harden;
		self
	}

	/// Build the generator
	pub fn build(self) -> Result<Generator> {
		let architectures = &self.config.architectures;
		if architectures.is_empty() {
			return Err(GeneratorError::NoArchitectures);
		}

		let mut seen = HashSet::new();
		for arch in architectures {
			if arch.name.is_empty() || arch.name.chars().any(|c| c.is_whitespace() || c == ':' || c == '/') {
				return Err(GeneratorError::InvalidArchitecture(arch.name.clone()));
			}
			if !seen.insert(arch.name.as_str()) {
				return Err(GeneratorError::DuplicateArchitecture(arch.name.clone()));
			}
		}

		Ok(Generator::new(self.config))
	}
}
