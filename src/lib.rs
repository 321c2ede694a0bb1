//! # AoE Insights
//!
//! Personal Age of Empires II analytics: match history filtering, filter
//! menus, per-match pacing series and performance summaries.
//!
//! ## Architecture
//!
//! - **models**: Match records, filter selections, series and stats types
//! - **calculate**: Pure filtering, option derivation, projection and aggregation
//! - **storage**: JSONL files holding analyzed matches and rating history
//! - **api**: REST API endpoints for the rendering layer
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
