//! Makefile generation
//!
//! Every library is built once per architecture. Targets are enumerated
//! library-major, architecture-minor so the output is reproducible.

use std::fmt::{self, Display, Formatter};

use crate::spec::{Architecture, LibrarySpec};

/// Warning and code generation flags used by every compile step
pub const COMPILE_FLAGS: &str = "-Wall -Werror -fpic";

/// Target stem for a library built for one architecture
#[must_use]
pub fn target_name(library: &LibrarySpec, arch: &Architecture) -> String {
	format!("{}_{}", library.escaped_name, arch.name)
}

/// Makefile covering every (library, architecture) pair
#[derive(Debug, Clone, Copy)]
pub struct Manifest<'a> {
	libraries: &'a [LibrarySpec],
	architectures: &'a [Architecture],
}

impl<'a> Manifest<'a> {
	/// Create a manifest renderer
	#[must_use]
	pub const fn new(libraries: &'a [LibrarySpec], architectures: &'a [Architecture]) -> Self {
		Self {
			libraries,
			architectures,
		}
	}

	/// Iterate over all (library, architecture) pairs in manifest order
	pub fn pairs(&self) -> impl Iterator<Item = (&'a LibrarySpec, &'a Architecture)> {
		let architectures = self.architectures;
		self.libraries
			.iter()
			.flat_map(move |library| architectures.iter().map(move |arch| (library, arch)))
	}

	/// Shared objects produced by the `all` target
	#[must_use]
	pub fn artifacts(&self) -> Vec<String> {
		self.pairs()
			.map(|(library, arch)| format!("{}.so", target_name(library, arch)))
			.collect()
	}

	fn write_target(library: &LibrarySpec, arch: &Architecture, f: &mut Formatter<'_>) -> fmt::Result {
		let target = target_name(library, arch);
		let source = library.source_file_name();
		let flags = &arch.compile_flags;

		writeln!(f, "{target}.so: {source}")?;
		writeln!(f, "\t$(CC) -c {COMPILE_FLAGS} -o {target}.o {flags} {source}")?;
		writeln!(f, "\t$(CC) -shared -o {target}.so {flags} {target}.o")?;
		writeln!(f)
	}
}

impl Display for Manifest<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		writeln!(f, "all: {}", self.artifacts().join(" "))?;
		writeln!(f)?;
		for (library, arch) in self.pairs() {
			Self::write_target(library, arch, f)?;
		}
		writeln!(f, ".PHONY: all clean")?;
		writeln!(f, "clean:")?;
		writeln!(f, "\trm -f *.o *.so")
	}
}

/// Render the Makefile for `libraries` across `architectures`
#[must_use]
pub fn render_manifest(libraries: &[LibrarySpec], architectures: &[Architecture]) -> String {
	Manifest::new(libraries, architectures).to_string()
}
