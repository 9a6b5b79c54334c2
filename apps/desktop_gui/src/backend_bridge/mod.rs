//! Backend bridge: the worker thread that owns the tokio runtime and runs authentication.

pub mod commands;
pub mod runtime;
