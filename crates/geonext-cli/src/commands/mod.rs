//! Command implementations.

pub mod run;

pub use self::run::{execute_run, run_with_provider};
