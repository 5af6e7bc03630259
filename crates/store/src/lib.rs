//! Local strategy storage: campaign and banner thresholds.
//!
//! Strategies live in memory, seeded from a JSON snapshot file.

pub mod store;

pub use store::{InMemoryStrategyStore, StrategySnapshot};
