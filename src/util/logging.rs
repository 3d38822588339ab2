//! Logging utilities for hookster
//!
//! This module provides logging functionality for hookster.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize logging once
static INIT: Once = Once::new();

/// Initialize the tracing system
///
/// This function sets up tracing with an `EnvFilter` that:
/// - Honors the `RUST_LOG` environment variable if set
/// - Uses the `HOOKSTER_DEBUG` environment variable to enable debug logging
/// - Only logs warnings and errors by default
pub fn init_logging() {
	init_logging_with_default("warn");
}

/// Initialize the tracing system with a fallback level
///
/// `RUST_LOG` and `HOOKSTER_DEBUG` still take precedence over `level`.
pub fn init_logging_with_default(level: &str) {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if std::env::var("HOOKSTER_DEBUG").is_ok() {
				EnvFilter::new("hookster=debug,hookster_rs=debug")
			} else {
				EnvFilter::new(format!("hookster={level},hookster_rs={level}"))
			}
		});

		tracing_subscriber::registry()
			.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
			.with(filter)
			.init();
	});
}
