//! Repository implementations
//!
//! Filesystem implementations of the repository traits defined in rank-core.

mod community;
mod error;
mod files;
mod report;

pub use community::FsCommunityRepository;
pub use report::FsReportRepository;
