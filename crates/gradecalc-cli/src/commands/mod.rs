//! Subcommand implementations.

pub mod calc;
pub mod export;
pub mod init;
pub mod live;
pub mod scale;
pub mod validate;
