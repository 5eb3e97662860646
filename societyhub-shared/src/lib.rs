//! # SocietyHub Shared Library
//!
//! Types, persistence and presentation logic shared by the SocietyHub API
//! server and the seeder.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Users, societies, events and their relationship tables
//! - `auth`: Password hashing, JWT tokens and axum middleware
//! - `views`: Card and detail-page view models (gradients, badges, button state)
//! - `client`: Typed HTTP client for the join/leave and RSVP flows

pub mod auth;
pub mod client;
pub mod db;
pub mod models;
pub mod views;

/// Current version of the SocietyHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
