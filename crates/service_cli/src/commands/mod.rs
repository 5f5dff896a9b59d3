//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod allocate;
pub mod check;
pub mod objective;
