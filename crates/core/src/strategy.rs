use async_trait::async_trait;

use crate::error::CampaignResult;
use crate::types::{BannerStrategy, CampaignId, CampaignStrategy};

/// Read access to locally stored strategies.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// All campaign strategies in the store's stable order.
    async fn list_campaign_strategies(&self) -> CampaignResult<Vec<CampaignStrategy>>;

    /// Banner strategies whose owning campaign is one of `campaign_ids`.
    async fn list_banner_strategies(
        &self,
        campaign_ids: &[CampaignId],
    ) -> CampaignResult<Vec<BannerStrategy>>;

    async fn all_campaign_ids(&self) -> CampaignResult<Vec<CampaignId>> {
        Ok(self
            .list_campaign_strategies()
            .await?
            .into_iter()
            .map(|s| s.campaign_id)
            .collect())
    }
}
