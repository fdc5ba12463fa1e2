//! Domain types and the bulk ingestion pipeline for the club directory.
//!
//! This crate has no database or HTTP dependencies. Persistence is reached
//! only through the [`store::ClubStore`] trait, which the `clubdir-db` crate
//! implements over PostgreSQL and [`store::memory::MemoryClubStore`]
//! implements in memory.

pub mod club;
pub mod error;
pub mod ingest;
pub mod store;
pub mod types;
