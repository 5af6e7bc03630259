use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type CampaignId = u64;
pub type BannerId = u64;

/// Windows at least this many days long are judged against weekly thresholds.
pub const WEEKLY_POLICY_MIN_DAYS: i64 = 7;

/// Locally stored performance targets for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStrategy {
    pub campaign_id: CampaignId,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

/// Locally stored performance targets for a single banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerStrategy {
    pub banner_id: BannerId,
    /// Owning campaign. Not enforced against the campaign strategies.
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

/// Minimum clicks and maximum cost, per day and per week.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub daily_clicks: u64,
    #[serde(default)]
    pub daily_cost: f64,
    #[serde(default)]
    pub weekly_clicks: u64,
    #[serde(default)]
    pub weekly_cost: f64,
}

/// Observed campaign performance over an evaluation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStatRecord {
    pub campaign_id: CampaignId,
    pub clicks: u64,
    pub cost: f64,
}

/// Observed banner performance over an evaluation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerStatRecord {
    pub banner_id: BannerId,
    pub campaign_id: CampaignId,
    pub clicks: u64,
    pub cost: f64,
}

/// Banner statistics of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignBannerStats {
    pub campaign_id: CampaignId,
    pub banners: Vec<BannerStatRecord>,
}

/// Inclusive reporting range plus its length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub day_count: i64,
}

impl EvaluationWindow {
    pub fn is_daily(&self) -> bool {
        self.day_count < WEEKLY_POLICY_MIN_DAYS
    }
}
