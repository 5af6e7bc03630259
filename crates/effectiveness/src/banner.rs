//! Banner effectiveness evaluation.

use std::collections::HashMap;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::platform::PauseActions;
use campaign_core::strategy::StrategyStore;
use campaign_core::types::{BannerId, CampaignBannerStats, CampaignId, EvaluationWindow, Thresholds};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::policy;

/// Result of a banner evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "banner_ids", rename_all = "snake_case")]
pub enum BannerOutcome {
    /// No banner strategies exist for the evaluated campaigns.
    NoStrategy,
    /// Banners were evaluated and all met their strategy.
    NonePaused,
    Paused(Vec<BannerId>),
}

impl BannerOutcome {
    pub fn paused_ids(&self) -> &[BannerId] {
        match self {
            BannerOutcome::Paused(ids) => ids,
            BannerOutcome::NoStrategy | BannerOutcome::NonePaused => &[],
        }
    }
}

/// Compares banner statistics, grouped by campaign, with banner strategies
/// and pauses offenders one banner at a time.
pub struct BannerEvaluator<'a> {
    store: &'a dyn StrategyStore,
    actions: &'a dyn PauseActions,
}

impl<'a> BannerEvaluator<'a> {
    pub fn new(store: &'a dyn StrategyStore, actions: &'a dyn PauseActions) -> Self {
        Self { store, actions }
    }

    /// Walks `groups` in order. A banner without a strategy ends evaluation
    /// of the rest of its campaign group.
    pub async fn evaluate(
        &self,
        campaign_ids: &[CampaignId],
        groups: &[CampaignBannerStats],
        window: &EvaluationWindow,
    ) -> CampaignResult<BannerOutcome> {
        let strategies = self.store.list_banner_strategies(campaign_ids).await?;
        if strategies.is_empty() {
            info!(campaigns = campaign_ids.len(), "No banner strategies configured");
            return Ok(BannerOutcome::NoStrategy);
        }

        let mut lookup: HashMap<BannerId, Thresholds> = HashMap::with_capacity(strategies.len());
        for strategy in strategies {
            lookup.entry(strategy.banner_id).or_insert(strategy.thresholds);
        }

        let mut paused: Vec<BannerId> = Vec::new();

        for group in groups {
            for (position, record) in group.banners.iter().enumerate() {
                let Some(thresholds) = lookup.get(&record.banner_id) else {
                    warn!(
                        campaign_id = group.campaign_id,
                        banner_id = record.banner_id,
                        skipped = group.banners.len() - position,
                        "No strategy for banner, skipping rest of campaign"
                    );
                    metrics::counter!("effectiveness.records.unmatched", "entity" => "banner")
                        .increment(1);
                    break;
                };

                if paused.contains(&record.banner_id) {
                    debug!(banner_id = record.banner_id, "Banner already paused in this run");
                    continue;
                }

                let limits = policy::banner_limits(thresholds, window);
                if !limits.is_breached_by(record.clicks, record.cost) {
                    continue;
                }

                if !self
                    .actions
                    .pause_banners(group.campaign_id, &[record.banner_id])
                    .await?
                {
                    metrics::counter!("effectiveness.pause.failed", "entity" => "banner")
                        .increment(1);
                    return Err(CampaignError::banner_pause_failed(record.banner_id));
                }

                info!(
                    campaign_id = group.campaign_id,
                    banner_id = record.banner_id,
                    clicks = record.clicks,
                    cost = record.cost,
                    min_clicks = limits.min_clicks,
                    max_cost = limits.max_cost,
                    "Banner paused"
                );
                metrics::counter!("effectiveness.banners.paused").increment(1);
                paused.push(record.banner_id);
            }
        }

        if paused.is_empty() {
            Ok(BannerOutcome::NonePaused)
        } else {
            Ok(BannerOutcome::Paused(paused))
        }
    }
}
