//! Infrastructure concerns shared by the watcher binary: configuration
//! parsing and logger initialization.

pub mod config;
pub mod logging;
