//! Repository traits (ports)

mod repositories;

pub use repositories::{CommunityRepository, RepoResult, ReportRepository};
