//! Shim source generation

use hookster_rs::generator::{collect_headers, render_includes, render_shim};
use hookster_rs::{ArgSpec, HookSpec, LibrarySpec};
use pretty_assertions::assert_eq;

fn hook(function: &str, returns: &str, args: &[(&str, &str)]) -> HookSpec {
	HookSpec {
		function: function.to_string(),
		returns: returns.to_string(),
		args: args.iter().map(|(ty, name)| ArgSpec::new(*ty, *name)).collect(),
		header: None,
		print_format: format!(r"{function}\n"),
		printf_args: None,
	}
}

fn open_hook() -> HookSpec {
	HookSpec {
		print_format: r"open(%s)\n".to_string(),
		printf_args: Some("path".to_string()),
		..hook("open", "int", &[("const char*", "path"), ("int", "flags")])
	}
}

const OPEN_SHIM: &str = r#"#include <dlfcn.h>
#include <stdio.h>
#include <stdlib.h>
#include <unistd.h>

int (*__open_original)(const char* path, int flags);

int __open_print = 1;

static int initialized;
static void *__libfoo_so_handle;

static void ___check_init(void) {
    if (initialized) return;

    __libfoo_so_handle = dlopen("libfoo.so", RTLD_LAZY);
    if (!__libfoo_so_handle) {
        fprintf(stderr, "%s\n", dlerror());
        exit(EXIT_FAILURE);
    }

    dlerror();

    __open_original = dlsym(__libfoo_so_handle, "open");
}

int open(const char* path, int flags) {
    ___check_init();
    int ret = __open_original(path, flags);
    if (__open_print) {
        printf("open(%s)\n", path);
    }
    return ret;
}
"#;

#[test]
fn open_scenario_matches_expected_source() {
	let library = LibrarySpec::new("libfoo.so", vec![open_hook()]);
	assert_eq!(render_shim(&library, false), OPEN_SHIM);
}

#[test]
fn default_headers_are_sorted() {
	assert_eq!(collect_headers(&[]), ["dlfcn.h", "stdio.h", "stdlib.h", "unistd.h"]);
}

#[test]
fn declared_headers_are_merged_once() {
	let with_header = |name: &str, header: &str| HookSpec {
		header: Some(header.to_string()),
		..hook(name, "int", &[])
	};
	let hooks = [
		with_header("a", "foo.h"),
		with_header("b", "bar.h"),
		with_header("c", "foo.h"),
		with_header("d", "stdio.h"),
		hook("e", "int", &[]),
	];

	assert_eq!(
		collect_headers(&hooks),
		["bar.h", "dlfcn.h", "foo.h", "stdio.h", "stdlib.h", "unistd.h"]
	);
}

#[test]
fn header_block_ignores_hook_order() {
	let a = HookSpec {
		header: Some("zlib.h".to_string()),
		..hook("a", "int", &[])
	};
	let b = HookSpec {
		header: Some("fcntl.h".to_string()),
		..hook("b", "int", &[])
	};

	let forward = render_includes(&[a.clone(), b.clone()]);
	let backward = render_includes(&[b, a]);
	assert_eq!(forward, backward);
	assert!(forward.starts_with("#include <dlfcn.h>\n#include <fcntl.h>\n"));
	assert!(forward.ends_with("#include <zlib.h>\n"));
}

#[test]
fn empty_header_is_skipped() {
	let hooks = [HookSpec {
		header: Some(String::new()),
		..hook("a", "int", &[])
	}];
	assert_eq!(collect_headers(&hooks).len(), 4);
}

#[test]
fn wrapper_forwards_parameters_in_declared_order() {
	let hooks = vec![
		hook("memcpy", "void*", &[("void*", "dst"), ("const void*", "src"), ("size_t", "n")]),
		hook("kill", "int", &[("pid_t", "pid"), ("int", "sig")]),
	];
	let library = LibrarySpec::new("libc.so.6", hooks.clone());
	let source = render_shim(&library, false);

	for hook in &hooks {
		let signature_prefix = format!("{} {}(", hook.returns, hook.function);
		let signature = source
			.lines()
			.find(|line| line.starts_with(&signature_prefix) && line.ends_with('{'))
			.unwrap();
		let declared: Vec<&str> = signature[signature_prefix.len()..signature.len() - 3]
			.split(", ")
			.map(|param| param.rsplit(' ').next().unwrap())
			.collect();

		let call_prefix = format!("{}(", hook.original_symbol());
		let call = source.lines().find(|line| line.contains(&call_prefix) && line.contains("ret =")).unwrap();
		let start = call.find(&call_prefix).unwrap() + call_prefix.len();
		let forwarded: Vec<&str> = call[start..call.len() - 2].split(", ").collect();

		assert_eq!(declared, forwarded);
		let expected: Vec<&str> = hook.args.iter().map(|arg| arg.param_name.as_str()).collect();
		assert_eq!(declared, expected);
	}
}

#[test]
fn every_hook_gets_pointer_flag_and_wrapper() {
	let library = LibrarySpec::new(
		"libm.so",
		vec![hook("sin", "double", &[("double", "x")]), hook("cos", "double", &[("double", "x")])],
	);
	let source = render_shim(&library, false);

	for name in ["sin", "cos"] {
		assert!(source.contains(&format!("double (*__{name}_original)(double x);\n")));
		assert!(source.contains(&format!("int __{name}_print = 1;\n")));
		assert!(source.contains(&format!("    __{name}_original = dlsym(__libm_so_handle, \"{name}\");\n")));
		assert!(source.contains(&format!("\ndouble {name}(double x) {{\n")));
	}

	let pointers = source.find("(*__sin_original)").unwrap();
	let flags = source.find("int __sin_print").unwrap();
	let init = source.find("static void ___check_init").unwrap();
	let wrapper = source.find("\ndouble sin(double x)").unwrap();
	assert!(pointers < flags && flags < init && init < wrapper);
}

#[test]
fn empty_printf_args_print_only_the_format() {
	let library = LibrarySpec::new("libfoo.so", vec![hook("getpid", "pid_t", &[])]);
	let source = render_shim(&library, false);
	assert!(source.contains("        printf(\"getpid\\n\");\n"));
	assert!(!source.contains("printf(\"getpid\\n\", "));
}

#[test]
fn printf_args_are_injected_verbatim() {
	let library = LibrarySpec::new(
		"libfoo.so",
		vec![HookSpec {
			print_format: "read(%d) = %zd".to_string(),
			printf_args: Some("fd, ret".to_string()),
			..hook("read", "ssize_t", &[("int", "fd")])
		}],
	);
	assert!(render_shim(&library, false).contains("        printf(\"read(%d) = %zd\", fd, ret);\n"));
}

#[test]
fn no_arguments_render_as_void() {
	let library = LibrarySpec::new("libfoo.so", vec![hook("getpid", "pid_t", &[])]);
	let source = render_shim(&library, false);
	assert!(source.contains("pid_t (*__getpid_original)(void);\n"));
	assert!(source.contains("\npid_t getpid(void) {\n"));
	assert!(source.contains("    pid_t ret = __getpid_original();\n"));
}

#[test]
fn void_return_is_not_captured() {
	let library = LibrarySpec::new("libc.so.6", vec![hook("sync", "void", &[])]);
	let source = render_shim(&library, false);
	assert!(source.contains("\nvoid sync(void) {\n    ___check_init();\n    __sync_original();\n"));
	assert!(!source.contains("void ret"));
	assert!(!source.contains("return ret;"));
}

#[test]
fn init_guard_is_never_set_by_default() {
	let library = LibrarySpec::new("libfoo.so", vec![open_hook()]);
	let source = render_shim(&library, false);
	assert!(source.contains("    if (initialized) return;\n"));
	assert!(!source.contains("initialized = 1;"));
	assert!(!source.contains("if (!__open_original)"));
}

#[test]
fn hardened_init_runs_once_and_checks_symbols() {
	let library = LibrarySpec::new("libfoo.so", vec![open_hook()]);
	let source = render_shim(&library, true);

	let expected_tail = r#"    __open_original = dlsym(__libfoo_so_handle, "open");
    if (!__open_original) {
        fprintf(stderr, "%s\n", dlerror());
        exit(EXIT_FAILURE);
    }

    initialized = 1;
}
"#;
	assert!(source.contains(expected_tail));
}

#[test]
fn library_path_is_escaped_in_dlopen_literal() {
	let library = LibrarySpec::new(r#"C:\libs\"odd".dll"#, vec![open_hook()]);
	let source = render_shim(&library, false);
	assert!(source.contains(r#"dlopen("C:\\libs\\\"odd\".dll", RTLD_LAZY);"#));
	assert!(source.contains(&format!("static void *__{}_handle;", library.escaped_name)));
}

#[test]
fn library_without_hooks_still_has_init_routine() {
	let library = LibrarySpec::new("libempty.so", Vec::new());
	let source = render_shim(&library, false);
	assert!(source.contains("    dlerror();\n}\n"));
	assert!(source.ends_with("}\n"));
}
