//! Repository layer: one zero-sized struct per table providing async query
//! methods that accept `&PgPool` (or a transaction).

pub mod club_repo;
pub mod user_repo;

pub use club_repo::ClubRepo;
pub use user_repo::UserRepo;
