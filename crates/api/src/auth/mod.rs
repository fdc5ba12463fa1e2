//! Operator authentication.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`accounts`] -- credential checks and account bootstrap against `users`.

pub mod accounts;
pub mod password;
