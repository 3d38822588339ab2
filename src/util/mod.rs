//! Utility modules for hookster
//!
//! This module contains utility functions used by hookster.

pub mod logging;

pub use logging::{init_logging, init_logging_with_default};
