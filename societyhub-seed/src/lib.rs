//! # SocietyHub Seeder Library
//!
//! Rebuilds the demo dataset from JSON fixtures.
//!
//! ## Modules
//!
//! - `config`: Environment configuration
//! - `error`: `SeedError`
//! - `fixtures`: Fixture records and file loading
//! - `store`: The `SeedStore` trait and its Postgres implementation
//! - `seeder`: The run itself (clear, insert, link check)

pub mod config;
pub mod error;
pub mod fixtures;
pub mod seeder;
pub mod store;

pub use error::{SeedError, SeedResult};
pub use seeder::SeedSummary;
