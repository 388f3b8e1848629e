//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod attraction;
pub mod comment;
pub mod destination;
pub mod favorite;
pub mod image;
pub mod itinerary;
pub mod tag;
pub mod user;
