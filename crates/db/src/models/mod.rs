//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - DTOs for inserts and patches

pub mod club;
pub mod user;
