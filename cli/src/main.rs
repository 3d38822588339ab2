//! hookster - generate `LD_PRELOAD` shims from a hook file

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use hookster_rs::util::{init_logging, init_logging_with_default};
use hookster_rs::{AlwaysReplace, Architecture, Pipeline, ReplaceConfirmation};

/// Hookster -- a library hook generator.
#[derive(Parser, Debug)]
#[command(name = "hookster", version, about)]
struct Cli {
	/// JSON file with the functions to hook
	#[arg(long, value_name = "file", default_value = "hooks.json")]
	hooks: PathBuf,

	/// Directory where the generated files are stored. Warning: it is removed if it exists.
	#[arg(long, value_name = "dir", default_value = "out")]
	outdir: PathBuf,

	/// Build architecture as NAME=FLAGS (repeatable; replaces amd64=-m64 and i386=-m32)
	#[arg(long = "arch", value_name = "NAME=FLAGS", value_parser = parse_arch)]
	architectures: Vec<Architecture>,

	/// Run the generated init routine once and abort on unresolved symbols
	#[arg(long)]
	harden: bool,

	/// Replace an existing output directory without asking
	#[arg(long, short = 'y')]
	yes: bool,

	/// Log progress to stderr
	#[arg(long, short = 'v')]
	verbose: bool,
}

fn parse_arch(value: &str) -> Result<Architecture, String> {
	Architecture::parse_pair(value).ok_or_else(|| format!("expected NAME=FLAGS, got '{value}'"))
}

/// Asks on the terminal before an existing output directory is removed
#[derive(Debug)]
struct PromptReplace;

impl ReplaceConfirmation for PromptReplace {
	fn confirm_replace(&self, dir: &Path) -> io::Result<bool> {
		Confirm::new()
			.with_prompt(format!("Directory '{}' exists. Remove it and continue?", dir.display()))
			.default(false)
			.interact()
			.map_err(io::Error::other)
	}

	fn name(&self) -> &'static str {
		"PromptReplace"
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let mut builder = hookster_rs::new().harden(cli.harden);
	if !cli.architectures.is_empty() {
		builder = builder.architectures(cli.architectures);
	}
	let generator = builder.build().context("invalid architecture list")?;

	let pipeline = Pipeline::new(generator);
	tracing::info!("Building for {} architectures", pipeline.generator().architectures().len());

	let always = AlwaysReplace::new();
	let confirm: &dyn ReplaceConfirmation = if cli.yes { &always } else { &PromptReplace };
	let summary = pipeline
		.run(&cli.hooks, &cli.outdir, confirm)
		.with_context(|| format!("failed to generate hooks from {}", cli.hooks.display()))?;

	tracing::info!(
		"{} libraries, {} hooks, {} files written",
		summary.libraries,
		summary.hooks,
		summary.files.len()
	);
	Ok(())
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	if cli.verbose {
		init_logging_with_default("info");
	} else {
		init_logging();
	}

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("hookster: {e:#}");
			ExitCode::FAILURE
		},
	}
}
