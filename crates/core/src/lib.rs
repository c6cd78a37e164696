//! Domain types and pure logic shared by the database and API layers.
//!
//! Nothing in this crate touches the network or the database.

pub mod chart;
pub mod error;
pub mod naming;
pub mod pagination;
pub mod records;
pub mod review;
pub mod roles;
pub mod types;
