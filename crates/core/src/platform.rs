//! Remote advertising platform seams.
//!
//! The evaluation core talks to the platform only through these traits; the
//! JSON API client in `campaign-direct` is the production implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CampaignResult;
use crate::types::{BannerId, BannerStatRecord, CampaignId, CampaignStatRecord};

/// Source of performance statistics.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// One record per campaign that had activity in the range. May be empty.
    async fn fetch_campaign_stats(
        &self,
        campaign_ids: &[CampaignId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> CampaignResult<Vec<CampaignStatRecord>>;

    /// `None` when the platform has no banners for the campaign in the range.
    async fn fetch_banner_stats(
        &self,
        campaign_id: CampaignId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CampaignResult<Option<Vec<BannerStatRecord>>>;
}

/// Pause commands. `Ok(false)` means the platform answered but refused.
#[async_trait]
pub trait PauseActions: Send + Sync {
    async fn pause_campaign(&self, campaign_id: CampaignId) -> CampaignResult<bool>;

    async fn pause_banners(
        &self,
        campaign_id: CampaignId,
        banner_ids: &[BannerId],
    ) -> CampaignResult<bool>;
}
