use campaign_core::types::{BannerId, CampaignId, EvaluationWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::banner::BannerOutcome;

pub const CAMPAIGNS_COMPLIANT: &str =
    "All campaigns meet the requirements of the selected strategy.";
pub const BANNERS_COMPLIANT: &str =
    "All banners meet the requirements of the selected strategy.";
pub const NO_BANNER_STRATEGIES: &str =
    "No banner strategies are configured for the selected campaigns.";

/// Outcome of one effectiveness check. Read-only once assembled.
#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessReport {
    run_id: Uuid,
    window: EvaluationWindow,
    paused_campaign_ids: Vec<CampaignId>,
    banner_outcome: BannerOutcome,
    campaign_message: String,
    banner_message: String,
    generated_at: DateTime<Utc>,
}

impl EffectivenessReport {
    pub fn assemble(
        run_id: Uuid,
        window: EvaluationWindow,
        paused_campaign_ids: Vec<CampaignId>,
        banner_outcome: BannerOutcome,
    ) -> Self {
        let campaign_message = campaign_message(&paused_campaign_ids);
        let banner_message = banner_message(&banner_outcome);
        Self {
            run_id,
            window,
            paused_campaign_ids,
            banner_outcome,
            campaign_message,
            banner_message,
            generated_at: Utc::now(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn window(&self) -> &EvaluationWindow {
        &self.window
    }

    /// Campaigns paused in this run, in pause order.
    pub fn paused_campaign_ids(&self) -> &[CampaignId] {
        &self.paused_campaign_ids
    }

    pub fn banner_outcome(&self) -> &BannerOutcome {
        &self.banner_outcome
    }

    pub fn campaign_message(&self) -> &str {
        &self.campaign_message
    }

    pub fn banner_message(&self) -> &str {
        &self.banner_message
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn paused_banner_ids(&self) -> &[BannerId] {
        self.banner_outcome.paused_ids()
    }

    pub fn has_banner_strategies(&self) -> bool {
        self.banner_outcome != BannerOutcome::NoStrategy
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn campaign_message(paused: &[CampaignId]) -> String {
    if paused.is_empty() {
        CAMPAIGNS_COMPLIANT.to_string()
    } else {
        format!("The following campaigns were paused: {}", join_ids(paused))
    }
}

fn banner_message(outcome: &BannerOutcome) -> String {
    match outcome {
        BannerOutcome::Paused(ids) => {
            format!("The following banners were paused: {}", join_ids(ids))
        }
        BannerOutcome::NonePaused => BANNERS_COMPLIANT.to_string(),
        BannerOutcome::NoStrategy => NO_BANNER_STRATEGIES.to_string(),
    }
}
