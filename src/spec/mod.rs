//! Hook specification model
//!
//! This module contains the in-memory representation of a hook file
//! and the code that loads and validates one.

mod error;
mod load;
mod types;

pub use error::{Result, SpecError};
pub use load::{load_hooks_file, parse_hooks};
pub use types::{
	ArgSpec, Architecture, HookSpec, LibrarySpec, RESERVED_NAMES, escape_library_name, is_c_identifier,
	is_c_identifier_fragment, is_reserved_name,
};
