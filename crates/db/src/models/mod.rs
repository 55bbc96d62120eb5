//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//!   (plus the derived dependent count joined at read time)
//! - A `Deserialize` input DTO shared by create and update, since the
//!   admin dialogs always submit the full field set

pub mod city;
pub mod country;
