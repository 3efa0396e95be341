//! CLI module for Balmorel
//!
//! Every command works directly on a scenario root; nothing is persisted
//! between runs apart from the log file.

pub mod config;
pub mod error;
pub mod files;
pub mod output;
pub mod query;
pub mod summary;
pub mod symbols;
