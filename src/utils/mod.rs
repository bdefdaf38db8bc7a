//! Utility functions and helpers for recipebox.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and connection string redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
