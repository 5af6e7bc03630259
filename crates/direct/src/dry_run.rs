use async_trait::async_trait;
use campaign_core::error::CampaignResult;
use campaign_core::platform::PauseActions;
use campaign_core::types::{BannerId, CampaignId};
use tracing::info;

/// Pause actions that only log. Every pause reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunActions;

#[async_trait]
impl PauseActions for DryRunActions {
    async fn pause_campaign(&self, campaign_id: CampaignId) -> CampaignResult<bool> {
        info!(campaign_id, "Dry run: campaign would be paused");
        Ok(true)
    }

    async fn pause_banners(
        &self,
        campaign_id: CampaignId,
        banner_ids: &[BannerId],
    ) -> CampaignResult<bool> {
        info!(campaign_id, ?banner_ids, "Dry run: banners would be paused");
        Ok(true)
    }
}
