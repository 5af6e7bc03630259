use std::fmt;

use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

/// Which kind of remote entity a pause action targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Campaign,
    Banner,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Campaign => f.write_str("campaign"),
            EntityKind::Banner => f.write_str("banner"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date, expected YYYY-MM-DD: {0}")]
    InvalidDate(String),

    #[error("Failed to pause {kind} {id}")]
    ActionFailed { kind: EntityKind, id: u64 },

    #[error("Remote communication error: {0}")]
    RemoteCommunication(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for CampaignError {
    fn from(err: config::ConfigError) -> Self {
        CampaignError::Config(err.to_string())
    }
}

impl CampaignError {
    pub fn campaign_pause_failed(id: u64) -> Self {
        CampaignError::ActionFailed {
            kind: EntityKind::Campaign,
            id,
        }
    }

    pub fn banner_pause_failed(id: u64) -> Self {
        CampaignError::ActionFailed {
            kind: EntityKind::Banner,
            id,
        }
    }
}
