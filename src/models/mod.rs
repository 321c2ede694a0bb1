//! Core data models for match analytics.

mod filter;
mod game;
mod ids;
mod series;
mod stats;

pub use filter::*;
pub use game::*;
pub use ids::*;
pub use series::*;
pub use stats::*;
