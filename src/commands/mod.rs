// src/commands/mod.rs
//! Command handlers for the ghpypi CLI

mod build;

// Re-export all command handlers
pub use build::cmd_build;
