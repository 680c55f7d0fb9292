//! Wire models - serde structs matching the crawler's JSON exports
//!
//! Every field is optional: validation happens in the mappers so one bad
//! record never fails a whole file.

mod message;
mod user;

pub use message::{RawMessage, RawReaction};
pub use user::UserRow;
