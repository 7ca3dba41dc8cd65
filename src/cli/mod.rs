//! Command line interface module
//!
//! Argument parsing and the runner behind the `nexus-registry` binary.

pub mod args;
pub mod runner;

pub use args::{Args, Command};
pub use runner::Runner;
