//! AWS-oriented adapters and handlers for the region matrix Lambdas.
//!
//! This crate owns runtime integration details (Lambda handlers, SDK-backed
//! stores, retry and pagination) on top of the AWS-free primitives in
//! `region_matrix_core`.

pub mod adapters;
pub mod aggregator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pagination;
pub mod retry;
pub mod telemetry;
pub mod uploader;
