//! Include collection for shim sources

use std::collections::BTreeSet;

use crate::spec::HookSpec;

/// Headers every shim needs: `dlopen`, `write`, `printf` and `exit`
pub const DEFAULT_HEADERS: [&str; 4] = ["dlfcn.h", "unistd.h", "stdio.h", "stdlib.h"];

/// Collect the sorted, deduplicated header set for a library's hooks
#[must_use]
pub fn collect_headers(hooks: &[HookSpec]) -> Vec<String> {
	let mut headers: BTreeSet<&str> = DEFAULT_HEADERS.into_iter().collect();
	headers.extend(
		hooks
			.iter()
			.filter_map(|hook| hook.header.as_deref())
			.filter(|header| !header.is_empty()),
	);
	headers.into_iter().map(str::to_string).collect()
}

/// Render the header set as `#include` lines
#[must_use]
pub fn render_includes(hooks: &[HookSpec]) -> String {
	collect_headers(hooks)
		.iter()
		.map(|header| format!("#include <{header}>\n"))
		.collect()
}
