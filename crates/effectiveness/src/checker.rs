//! Effectiveness check orchestration: campaigns first, then their banners.

use std::collections::HashSet;
use std::sync::Arc;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::platform::{PauseActions, StatsSource};
use campaign_core::strategy::StrategyStore;
use campaign_core::types::{CampaignBannerStats, CampaignId, EvaluationWindow};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::banner::BannerEvaluator;
use crate::campaign::CampaignEvaluator;
use crate::report::EffectivenessReport;
use crate::window;

/// Input of one check. Empty `campaign_ids` means every local campaign.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub campaign_ids: Vec<CampaignId>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl CheckRequest {
    /// Build a request from raw CLI-style arguments.
    pub fn from_args(
        campaigns: Option<&str>,
        from: Option<String>,
        to: Option<String>,
    ) -> CampaignResult<Self> {
        let campaign_ids = match campaigns {
            Some(raw) => parse_campaign_ids(raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            campaign_ids,
            from,
            to,
        })
    }
}

/// Parse a comma-separated campaign id list. Blank input is an empty list.
pub fn parse_campaign_ids(raw: &str) -> CampaignResult<Vec<CampaignId>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(str::trim)
        .map(|piece| {
            if piece.is_empty() {
                return Err(CampaignError::InvalidInput(format!(
                    "empty entry in campaign id list `{raw}`"
                )));
            }
            piece.parse::<CampaignId>().map_err(|_| {
                CampaignError::InvalidInput(format!("campaign id `{piece}` is not a number"))
            })
        })
        .collect()
}

/// Entry point of the effectiveness check.
pub struct EffectivenessChecker {
    store: Arc<dyn StrategyStore>,
    stats: Arc<dyn StatsSource>,
    actions: Arc<dyn PauseActions>,
}

impl EffectivenessChecker {
    pub fn new(
        store: Arc<dyn StrategyStore>,
        stats: Arc<dyn StatsSource>,
        actions: Arc<dyn PauseActions>,
    ) -> Self {
        Self {
            store,
            stats,
            actions,
        }
    }

    /// Run a check with missing dates defaulting to the local calendar date.
    pub async fn check(&self, request: CheckRequest) -> CampaignResult<EffectivenessReport> {
        self.check_on(request, Local::now().date_naive()).await
    }

    /// Run a check with missing dates defaulting to `today`.
    pub async fn check_on(
        &self,
        request: CheckRequest,
        today: NaiveDate,
    ) -> CampaignResult<EffectivenessReport> {
        let run_id = Uuid::new_v4();
        self.run(run_id, request, today)
            .instrument(info_span!("effectiveness_check", %run_id))
            .await
    }

    async fn run(
        &self,
        run_id: Uuid,
        request: CheckRequest,
        today: NaiveDate,
    ) -> CampaignResult<EffectivenessReport> {
        let mut campaign_ids = if request.campaign_ids.is_empty() {
            self.store.all_campaign_ids().await?
        } else {
            request.campaign_ids
        };
        // First occurrence wins; each campaign is fetched once per run.
        let mut seen = HashSet::with_capacity(campaign_ids.len());
        campaign_ids.retain(|id| seen.insert(*id));

        let window = window::resolve(request.from.as_deref(), request.to.as_deref(), today)?;

        info!(
            campaigns = campaign_ids.len(),
            from = %window.from,
            to = %window.to,
            day_count = window.day_count,
            daily_policy = window.is_daily(),
            "Effectiveness check started"
        );

        let campaign_stats = if campaign_ids.is_empty() {
            Vec::new()
        } else {
            self.stats
                .fetch_campaign_stats(&campaign_ids, window.from, window.to)
                .await?
        };
        debug!(records = campaign_stats.len(), "Campaign stats fetched");

        let paused_campaigns = CampaignEvaluator::new(self.store.as_ref(), self.actions.as_ref())
            .evaluate(&campaign_stats, &window)
            .await?;

        let banner_stats = self.collect_banner_stats(&campaign_ids, &window).await?;

        let banner_outcome = BannerEvaluator::new(self.store.as_ref(), self.actions.as_ref())
            .evaluate(&campaign_ids, &banner_stats, &window)
            .await?;

        let report =
            EffectivenessReport::assemble(run_id, window, paused_campaigns, banner_outcome);

        info!(
            paused_campaigns = report.paused_campaign_ids().len(),
            paused_banners = report.paused_banner_ids().len(),
            banner_strategies = report.has_banner_strategies(),
            "Effectiveness check completed"
        );
        Ok(report)
    }

    /// Banner stats per campaign, in campaign order. Campaigns without
    /// banners are left out.
    async fn collect_banner_stats(
        &self,
        campaign_ids: &[CampaignId],
        window: &EvaluationWindow,
    ) -> CampaignResult<Vec<CampaignBannerStats>> {
        let mut groups = Vec::with_capacity(campaign_ids.len());
        for &campaign_id in campaign_ids {
            match self
                .stats
                .fetch_banner_stats(campaign_id, window.from, window.to)
                .await?
            {
                Some(banners) => groups.push(CampaignBannerStats {
                    campaign_id,
                    banners,
                }),
                None => debug!(campaign_id, "No banners for campaign"),
            }
        }
        Ok(groups)
    }
}
