pub mod config;
pub mod error;
pub mod platform;
pub mod strategy;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult, EntityKind};
pub use platform::{PauseActions, StatsSource};
pub use strategy::StrategyStore;
