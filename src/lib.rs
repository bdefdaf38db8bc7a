// recipebox - Document-backed recipe storage behind a small JSON HTTP API
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;
pub mod utils;
