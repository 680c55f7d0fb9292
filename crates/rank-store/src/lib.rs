//! # rank-store
//!
//! Storage layer implementing the repository ports over crawler exports on
//! the local filesystem.
//!
//! ## Overview
//!
//! - Directory layout for inputs and outputs
//! - Wire models matching the crawler's JSON records
//! - Model → entity mappers that skip malformed records
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rank_store::{DataLayout, FsCommunityRepository};
//! use rank_core::{CommunityRepository, CorpusShape};
//!
//! async fn example(config: &rank_common::DataConfig) -> Result<(), rank_core::DomainError> {
//!     let repo = FsCommunityRepository::new(DataLayout::from_config(config));
//!     let corpus = repo.load_corpus("1533865579", CorpusShape::Channel).await?;
//!     println!("{} messages", corpus.total_messages());
//!     Ok(())
//! }
//! ```

pub mod layout;
pub mod mappers;
pub mod models;
pub mod repositories;

// Re-export commonly used types
pub use layout::DataLayout;
pub use repositories::{FsCommunityRepository, FsReportRepository};
