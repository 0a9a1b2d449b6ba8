pub mod config;
pub mod init;
pub mod lifecycle;
pub mod uplift;
