// ABOUTME: Library root for rsync-deploy - exposes the deploy engine.
// ABOUTME: The main binary is in main.rs.

pub mod command;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod spawn;
pub mod transport;
