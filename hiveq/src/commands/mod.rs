// hiveq/src/commands/mod.rs

pub mod export;
