//! Model to entity mappers
//!
//! Conversions from crawler wire models to domain entities. Records missing
//! an id or a timestamp are dropped together with their replies and counted.

mod message;
mod scalar;
mod seed;
mod user;

pub use message::{map_messages, MappedMessages};
pub use scalar::{parse_id, parse_timestamp};
pub use seed::map_seed_rows;
pub use user::map_user_rows;
