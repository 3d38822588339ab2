//! Hook file loading
//!
//! The hook file is deserialized into loosely typed entries first so that a
//! missing key can be reported with the library and hook it belongs to.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{Result, SpecError};
use super::types::{ArgSpec, HookSpec, LibrarySpec, is_c_identifier, is_c_identifier_fragment, is_reserved_name};

#[derive(Debug, Deserialize)]
struct LibraryEntry {
	library: String,
	hooks: Vec<HookEntry>,
}

#[derive(Debug, Deserialize)]
struct HookEntry {
	function: Option<String>,
	returns: Option<String>,
	args: Option<Vec<Map<String, Value>>>,
	header: Option<String>,
	printformat: Option<String>,
	printfargs: Option<String>,
}

/// Read and validate a hook file
pub fn load_hooks_file(path: impl AsRef<Path>) -> Result<Vec<LibrarySpec>> {
	let path = path.as_ref();
	let text = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	debug!("Read hook file {} ({} bytes)", path.display(), text.len());
	parse_hooks(&text)
}

/// Parse and validate hook file contents
///
/// Fails on the first schema violation; no partial result is returned.
pub fn parse_hooks(text: &str) -> Result<Vec<LibrarySpec>> {
	let entries: Vec<LibraryEntry> = serde_json::from_str(text)?;

	let mut libraries = Vec::with_capacity(entries.len());
	// escaped name -> library path that claimed it
	let mut claimed: HashMap<String, String> = HashMap::new();

	for (index, entry) in entries.into_iter().enumerate() {
		if entry.library.is_empty() {
			return Err(SpecError::EmptyLibraryPath { index });
		}

		let hooks = entry
			.hooks
			.into_iter()
			.enumerate()
			.map(|(hook, raw)| validate_hook(&entry.library, hook, raw))
			.collect::<Result<Vec<_>>>()?;

		let mut seen = HashSet::new();
		for hook in &hooks {
			if !seen.insert(hook.function.as_str()) {
				return Err(SpecError::DuplicateHook {
					library: entry.library.clone(),
					function: hook.function.clone(),
				});
			}
		}

		let library = LibrarySpec::new(entry.library, hooks);
		if !is_c_identifier_fragment(&library.escaped_name) {
			return Err(SpecError::InvalidLibraryName {
				library: library.library_path,
				escaped: library.escaped_name,
			});
		}
		if let Some(first) = claimed.get(&library.escaped_name) {
			return Err(SpecError::NameCollision {
				first: first.clone(),
				second: library.library_path,
				escaped: library.escaped_name,
			});
		}
		claimed.insert(library.escaped_name.clone(), library.library_path.clone());

		debug!(
			"Loaded library {} as {} with {} hooks",
			library.library_path,
			library.escaped_name,
			library.hooks.len()
		);
		libraries.push(library);
	}

	Ok(libraries)
}

fn validate_hook(library: &str, hook: usize, raw: HookEntry) -> Result<HookSpec> {
	let missing = |field| SpecError::MissingField {
		library: library.to_string(),
		hook,
		field,
	};

	let function = raw.function.ok_or_else(|| missing("function"))?;
	let returns = raw.returns.ok_or_else(|| missing("returns"))?;
	let args = raw.args.ok_or_else(|| missing("args"))?;
	let print_format = raw.printformat.ok_or_else(|| missing("printformat"))?;

	if returns.trim().is_empty() {
		return Err(SpecError::EmptyReturnType {
			library: library.to_string(),
			function,
		});
	}

	if !is_c_identifier(&function) || is_reserved_name(&function) {
		return Err(SpecError::InvalidFunctionName {
			library: library.to_string(),
			hook,
			function,
		});
	}

	let args = args
		.into_iter()
		.enumerate()
		.map(|(arg, mapping)| {
			validate_arg(mapping).map_err(|reason| SpecError::InvalidArgument {
				library: library.to_string(),
				function: function.clone(),
				arg,
				reason,
			})
		})
		.collect::<Result<Vec<_>>>()?;

	Ok(HookSpec {
		function,
		returns,
		args,
		header: raw.header.filter(|h| !h.is_empty()),
		print_format,
		printf_args: raw.printfargs.filter(|a| !a.is_empty()),
	})
}

fn validate_arg(mapping: Map<String, Value>) -> std::result::Result<ArgSpec, String> {
	if mapping.len() != 1 {
		return Err(format!("expected exactly one `type: name` pair, found {}", mapping.len()));
	}
	let Some((type_name, value)) = mapping.into_iter().next() else {
		return Err("empty argument entry".to_string());
	};
	if type_name.trim().is_empty() {
		return Err("parameter has an empty type".to_string());
	}
	match value {
		Value::String(param_name) if !param_name.is_empty() => Ok(ArgSpec::new(type_name, param_name)),
		Value::String(_) => Err(format!("parameter of type '{type_name}' has an empty name")),
		other => Err(format!("parameter name for type '{type_name}' must be a string, got {other}")),
	}
}
