//! tunegraph-cli: command-line client for tunegraph.
//!
//! Each subcommand maps onto one `GraphClient` operation and prints JSON to
//! stdout; `demo` prints a readable report instead.

pub mod cli;
pub mod commands;
pub mod error;
pub mod report;
