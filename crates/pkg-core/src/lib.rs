pub mod backend;
pub mod config;
pub mod error;
pub mod hooks;
pub mod init_hooks;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod plugin;
pub mod project;
pub mod runner;
pub mod types;

pub use error::{PkgError, Result};
