//! In-memory strategy store.
//!
//! Production: swap for a relational store behind the same `StrategyStore`
//! trait. Insertion order is the stable order callers observe.

use std::path::Path;

use async_trait::async_trait;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::strategy::StrategyStore;
use campaign_core::types::{BannerStrategy, CampaignId, CampaignStrategy};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

/// On-disk layout of the strategy snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategySnapshot {
    #[serde(default)]
    pub campaigns: Vec<CampaignStrategy>,
    #[serde(default)]
    pub banners: Vec<BannerStrategy>,
}

#[derive(Default)]
pub struct InMemoryStrategyStore {
    campaigns: RwLock<Vec<CampaignStrategy>>,
    banners: RwLock<Vec<BannerStrategy>>,
}

impl InMemoryStrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StrategySnapshot) -> Self {
        Self {
            campaigns: RwLock::new(snapshot.campaigns),
            banners: RwLock::new(snapshot.banners),
        }
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> CampaignResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CampaignError::Store(format!("cannot read {}: {e}", path.display()))
        })?;
        let snapshot: StrategySnapshot = serde_json::from_str(&raw).map_err(|e| {
            CampaignError::Store(format!("malformed snapshot {}: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            campaigns = snapshot.campaigns.len(),
            banners = snapshot.banners.len(),
            "Strategy snapshot loaded"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Replace the strategy with the same campaign id, or append.
    pub fn upsert_campaign(&self, strategy: CampaignStrategy) {
        let mut campaigns = self.campaigns.write();
        match campaigns
            .iter_mut()
            .find(|c| c.campaign_id == strategy.campaign_id)
        {
            Some(existing) => *existing = strategy,
            None => campaigns.push(strategy),
        }
    }

    /// Replace the strategy with the same banner id, or append.
    pub fn upsert_banner(&self, strategy: BannerStrategy) {
        let mut banners = self.banners.write();
        match banners.iter_mut().find(|b| b.banner_id == strategy.banner_id) {
            Some(existing) => *existing = strategy,
            None => banners.push(strategy),
        }
    }

    pub fn snapshot(&self) -> StrategySnapshot {
        StrategySnapshot {
            campaigns: self.campaigns.read().clone(),
            banners: self.banners.read().clone(),
        }
    }
}

#[async_trait]
impl StrategyStore for InMemoryStrategyStore {
    async fn list_campaign_strategies(&self) -> CampaignResult<Vec<CampaignStrategy>> {
        Ok(self.campaigns.read().clone())
    }

    async fn list_banner_strategies(
        &self,
        campaign_ids: &[CampaignId],
    ) -> CampaignResult<Vec<BannerStrategy>> {
        Ok(self
            .banners
            .read()
            .iter()
            .filter(|b| b.campaign_id.is_some_and(|id| campaign_ids.contains(&id)))
            .cloned()
            .collect())
    }
}
