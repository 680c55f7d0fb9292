//! Integration test utilities for the ranking pipeline
//!
//! This crate provides fixtures and in-memory/filesystem harnesses for
//! running communities end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
