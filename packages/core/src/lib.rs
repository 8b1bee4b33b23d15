// Library root: exposes the modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod error;
pub mod loader;
pub mod store;
pub mod venue;

// Binary-only plumbing, public so tests can reach config parsing.
pub mod cli;
pub mod config;
pub mod logging;
