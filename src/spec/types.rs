//! Spec model types
//!
//! Everything here is built once from a loaded hook file and stays
//! read-only for the rest of the run.

/// Replace every path or extension separator in `path` with `_`
///
/// The result is used both as a C identifier fragment and as a file stem.
/// Already escaped names pass through unchanged.
#[must_use]
pub fn escape_library_name(path: &str) -> String {
	path.chars()
		.map(|c| match c {
			'.' | '/' | '\\' => '_',
			c => c,
		})
		.collect()
}

/// Check whether `name` is usable as a C identifier
#[must_use]
pub fn is_c_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {},
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check whether `fragment` only uses identifier characters
///
/// Escaped library names are spliced into C identifiers and make
/// targets, so a leading digit is fine but `-`, spaces and `:` are not.
#[must_use]
pub fn is_c_identifier_fragment(fragment: &str) -> bool {
	!fragment.is_empty() && fragment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Names a hooked function must not take
///
/// C keywords, plus the symbols every generated shim defines itself.
pub const RESERVED_NAMES: &[&str] = &[
	"auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else", "enum", "extern",
	"float", "for", "goto", "if", "inline", "int", "long", "register", "restrict", "return", "short", "signed",
	"sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool",
	"_Complex", "_Imaginary", "initialized", "___check_init",
];

/// Check whether `name` is a C keyword or a symbol the shim emits
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
	RESERVED_NAMES.contains(&name)
}

/// A single function parameter: one type, one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
	/// C type, emitted verbatim (e.g. `const char*`)
	pub type_name: String,
	/// Parameter name, used in both the declaration and the forwarding call
	pub param_name: String,
}

impl ArgSpec {
	/// Create a new argument
	pub fn new(type_name: impl Into<String>, param_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			param_name: param_name.into(),
		}
	}

	/// Render as a `type name` declaration fragment
	#[must_use]
	pub fn declaration(&self) -> String {
		format!("{} {}", self.type_name, self.param_name)
	}
}

/// One function to intercept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
	/// Symbol name of the intercepted function
	pub function: String,
	/// Return type, emitted verbatim
	pub returns: String,
	/// Ordered parameter list
	pub args: Vec<ArgSpec>,
	/// Extra header the shim needs for this function's types
	pub header: Option<String>,
	/// printf format string, injected verbatim
	pub print_format: String,
	/// Extra printf arguments, injected verbatim after the format string
	pub printf_args: Option<String>,
}

impl HookSpec {
	/// Name of the static variable holding the original function pointer
	#[must_use]
	pub fn original_symbol(&self) -> String {
		format!("__{}_original", self.function)
	}

	/// Name of the print toggle exported by the shim
	#[must_use]
	pub fn print_flag_symbol(&self) -> String {
		format!("__{}_print", self.function)
	}

	/// Comma-joined `type name` list, or `void` when there are no arguments
	#[must_use]
	pub fn parameter_list(&self) -> String {
		if self.args.is_empty() {
			return "void".to_string();
		}
		self.args
			.iter()
			.map(ArgSpec::declaration)
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Comma-joined parameter names in declaration order
	#[must_use]
	pub fn forwarded_arguments(&self) -> String {
		self.args
			.iter()
			.map(|arg| arg.param_name.as_str())
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Whether the function returns nothing
	#[must_use]
	pub fn returns_void(&self) -> bool {
		self.returns.trim() == "void"
	}
}

/// All hooks for one target library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpec {
	/// Path handed to `dlopen`
	pub library_path: String,
	/// Identifier and file stem derived from `library_path`
	pub escaped_name: String,
	/// Hooks in file order
	pub hooks: Vec<HookSpec>,
}

impl LibrarySpec {
	/// Create a library spec, deriving its escaped name
	pub fn new(library_path: impl Into<String>, hooks: Vec<HookSpec>) -> Self {
		let library_path = library_path.into();
		let escaped_name = escape_library_name(&library_path);
		Self {
			library_path,
			escaped_name,
			hooks,
		}
	}

	/// File name of the generated shim source
	#[must_use]
	pub fn source_file_name(&self) -> String {
		format!("{}.c", self.escaped_name)
	}

	/// Name of the static `dlopen` handle in the generated shim
	#[must_use]
	pub fn handle_symbol(&self) -> String {
		format!("__{}_handle", self.escaped_name)
	}
}

/// A build architecture and the compiler flags that select it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architecture {
	/// Name used in target names (e.g. `amd64`)
	pub name: String,
	/// Flags passed to both the compile and link steps
	pub compile_flags: String,
}

impl Architecture {
	/// Create a new architecture record
	pub fn new(name: impl Into<String>, compile_flags: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			compile_flags: compile_flags.into(),
		}
	}

	/// The built-in architecture list: amd64 and i386
	#[must_use]
	pub fn defaults() -> Vec<Self> {
		vec![Self::new("amd64", "-m64"), Self::new("i386", "-m32")]
	}

	/// Parse a `name=flags` pair as given on the command line
	#[must_use]
	pub fn parse_pair(pair: &str) -> Option<Self> {
		let (name, flags) = pair.split_once('=')?;
		let name = name.trim();
		if name.is_empty() {
			return None;
		}
		Some(Self::new(name, flags.trim()))
	}
}
