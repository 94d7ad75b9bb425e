//! # Player Stats API
//!
//! A read-only HTTP facade over the stats.nba.com player endpoints.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, seasons, awards, tables)
//! - **upstream**: Stats provider trait and the stats.nba.com client
//! - **normalize**: Column and per-game normalization of upstream tables
//! - **pipeline**: Query pipelines behind each endpoint
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod upstream;

pub use models::*;
