//! hookster-rs - Generates library interposition shims
//!
//! Given a hook file describing functions to intercept, this crate emits
//! one C source file per target library and a Makefile that builds each
//! of them as a shared object for every configured architecture. The
//! resulting objects are meant to be loaded with `LD_PRELOAD`: each
//! wrapper lazily resolves the real function with `dlsym`, prints the
//! call through a per-function toggle and forwards the return value.
//!
//! # Getting Started
//!
//! ```rust
//! use hookster_rs::spec::parse_hooks;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let libraries = parse_hooks(r#"[{
//!         "library": "libc.so.6",
//!         "hooks": [{
//!             "function": "puts",
//!             "returns": "int",
//!             "args": [{"const char*": "s"}],
//!             "printformat": "puts(%s)\\n",
//!             "printfargs": "s"
//!         }]
//!     }]"#)?;
//!
//!     let output = hookster_rs::new().build()?.generate(&libraries);
//!     assert_eq!(output.shims[0].file_name, "libc_so_6.c");
//!     assert!(output.manifest.contents.contains("libc_so_6_amd64.so"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod generator;
pub mod output;
pub mod pipeline;
pub mod spec;
pub mod util;

pub use error::{HooksterError, Result};
pub use generator::{GeneratedFile, GeneratedOutput, Generator, GeneratorBuilder, GeneratorConfig};
pub use output::{AlwaysReplace, NeverReplace, ReplaceConfirmation};
pub use pipeline::{Pipeline, RunSummary};
pub use spec::{ArgSpec, Architecture, HookSpec, LibrarySpec};

/// Create a new generator builder
#[must_use]
pub fn new() -> GeneratorBuilder {
	GeneratorBuilder::new()
}

/// Generate into `outdir` from `hooks_path` with default settings
///
/// This is equivalent to `Pipeline::new(new().build()?).run(..)`.
pub fn generate(
	hooks_path: impl AsRef<std::path::Path>,
	outdir: impl AsRef<std::path::Path>,
	confirm: &dyn ReplaceConfirmation,
) -> Result<RunSummary> {
	let generator = new().build()?;
	Pipeline::new(generator).run(hooks_path.as_ref(), outdir.as_ref(), confirm)
}
