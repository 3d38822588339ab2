//! Shim source generation
//!
//! A shim file is laid out so that everything is declared before use:
//! includes, original-function pointers, print toggles, the lazy init
//! routine and finally one wrapper per hook.

use std::fmt::{self, Display, Formatter};

use crate::generator::headers::render_includes;
use crate::spec::{HookSpec, LibrarySpec};

/// Name of the lazy init routine emitted into every shim
pub const INIT_ROUTINE: &str = "___check_init";

/// C source for one library's shim
///
/// Rendered through `Display`; call `to_string()` to get the file contents.
#[derive(Debug, Clone, Copy)]
pub struct ShimSource<'a> {
	library: &'a LibrarySpec,
	harden: bool,
}

impl<'a> ShimSource<'a> {
	/// Create a shim renderer for `library`
	#[must_use]
	pub const fn new(library: &'a LibrarySpec, harden: bool) -> Self {
		Self { library, harden }
	}

	fn write_pointers(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for hook in &self.library.hooks {
			writeln!(
				f,
				"{} (*{})({});",
				hook.returns,
				hook.original_symbol(),
				hook.parameter_list()
			)?;
		}
		writeln!(f)
	}

	fn write_print_flags(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for hook in &self.library.hooks {
			writeln!(f, "int {} = 1;", hook.print_flag_symbol())?;
		}
		writeln!(f)
	}

	fn write_init(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let handle = self.library.handle_symbol();

		writeln!(f, "static int initialized;")?;
		writeln!(f, "static void *{handle};")?;
		writeln!(f)?;
		writeln!(f, "static void {INIT_ROUTINE}(void) {{")?;
		writeln!(f, "    if (initialized) return;")?;
		writeln!(f)?;
		writeln!(
			f,
			"    {handle} = dlopen(\"{}\", RTLD_LAZY);",
			c_string_contents(&self.library.library_path)
		)?;
		writeln!(f, "    if (!{handle}) {{")?;
		write_fatal_dlerror(f)?;
		writeln!(f, "    }}")?;
		writeln!(f)?;
		writeln!(f, "    dlerror();")?;

		if !self.library.hooks.is_empty() {
			writeln!(f)?;
		}
		for hook in &self.library.hooks {
			let original = hook.original_symbol();
			writeln!(f, "    {original} = dlsym({handle}, \"{}\");", hook.function)?;
			if self.harden {
				writeln!(f, "    if (!{original}) {{")?;
				write_fatal_dlerror(f)?;
				writeln!(f, "    }}")?;
			}
		}

		if self.harden {
			writeln!(f)?;
			writeln!(f, "    initialized = 1;")?;
		}
		writeln!(f, "}}")
	}

	fn write_wrapper(hook: &HookSpec, f: &mut Formatter<'_>) -> fmt::Result {
		let original = hook.original_symbol();
		let forwarded = hook.forwarded_arguments();

		writeln!(f)?;
		writeln!(f, "{} {}({}) {{", hook.returns, hook.function, hook.parameter_list())?;
		writeln!(f, "    {INIT_ROUTINE}();")?;
		if hook.returns_void() {
			writeln!(f, "    {original}({forwarded});")?;
		} else {
			writeln!(f, "    {} ret = {original}({forwarded});", hook.returns)?;
		}
		writeln!(f, "    if ({}) {{", hook.print_flag_symbol())?;
		match hook.printf_args.as_deref() {
			Some(extra) => writeln!(f, "        printf(\"{}\", {extra});", hook.print_format)?,
			None => writeln!(f, "        printf(\"{}\");", hook.print_format)?,
		}
		writeln!(f, "    }}")?;
		if !hook.returns_void() {
			writeln!(f, "    return ret;")?;
		}
		writeln!(f, "}}")
	}
}

impl Display for ShimSource<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&render_includes(&self.library.hooks))?;
		writeln!(f)?;
		self.write_pointers(f)?;
		self.write_print_flags(f)?;
		self.write_init(f)?;
		for hook in &self.library.hooks {
			Self::write_wrapper(hook, f)?;
		}
		Ok(())
	}
}

fn write_fatal_dlerror(f: &mut Formatter<'_>) -> fmt::Result {
	writeln!(f, "        fprintf(stderr, \"%s\\n\", dlerror());")?;
	writeln!(f, "        exit(EXIT_FAILURE);")
}

/// Escape a string for use between double quotes in C source
fn c_string_contents(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'\\' => out.push_str("\\\\"),
			'"' => out.push_str("\\\""),
			c => out.push(c),
		}
	}
	out
}

/// Render the complete shim source for `library`
#[must_use]
pub fn render_shim(library: &LibrarySpec, harden: bool) -> String {
	ShimSource::new(library, harden).to_string()
}
