// Path: crates/cli/src/commands/mod.rs

pub mod job_config;
pub mod patch;
pub mod policies;
pub mod register;
