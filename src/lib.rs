// ABOUTME: Library root for rtprobe - exposes detection APIs for testing and embedding.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod output;
pub mod runtime;
