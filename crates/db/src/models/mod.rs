//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs accepted by the API layer
//! - Create/update DTOs passed to the repositories

pub mod data_check;
pub mod dataset;
pub mod organization;
pub mod record;
