//! Shared region matrix domain primitives.
//!
//! This crate owns the data model, parameter/storage addressing, and the
//! deterministic matrix assembly rules. It intentionally excludes AWS SDK and
//! Lambda runtime concerns.

pub mod contract;
pub mod log_items;
pub mod matrix;
pub mod parameter_paths;
pub mod retry;
pub mod storage_keys;
