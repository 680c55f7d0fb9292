//! Data transfer objects for run results
//!
//! - Response DTOs summarizing each community run
//! - Mappers from pipeline outcomes and errors to DTOs

pub mod mappers;
pub mod responses;

pub use responses::{CommunityFailure, CommunityResult, RunSummary};
