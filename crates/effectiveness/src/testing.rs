//! In-memory fakes for the platform seams.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::platform::{PauseActions, StatsSource};
use campaign_core::types::*;
use campaign_store::InMemoryStrategyStore;
use chrono::NaiveDate;
use parking_lot::Mutex;

pub fn thresholds(
    daily_clicks: u64,
    daily_cost: f64,
    weekly_clicks: u64,
    weekly_cost: f64,
) -> Thresholds {
    Thresholds {
        daily_clicks,
        daily_cost,
        weekly_clicks,
        weekly_cost,
    }
}

pub fn campaign_strategy(campaign_id: CampaignId, t: Thresholds) -> CampaignStrategy {
    CampaignStrategy {
        campaign_id,
        thresholds: t,
    }
}

pub fn banner_strategy(
    banner_id: BannerId,
    campaign_id: CampaignId,
    t: Thresholds,
) -> BannerStrategy {
    BannerStrategy {
        banner_id,
        campaign_id: Some(campaign_id),
        thresholds: t,
    }
}

pub fn campaign_stat(campaign_id: CampaignId, clicks: u64, cost: f64) -> CampaignStatRecord {
    CampaignStatRecord {
        campaign_id,
        clicks,
        cost,
    }
}

pub fn banner_stat(
    banner_id: BannerId,
    campaign_id: CampaignId,
    clicks: u64,
    cost: f64,
) -> BannerStatRecord {
    BannerStatRecord {
        banner_id,
        campaign_id,
        clicks,
        cost,
    }
}

pub fn window(day_count: i64) -> EvaluationWindow {
    let from = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
    EvaluationWindow {
        from,
        to: from + chrono::Duration::days(day_count - 1),
        day_count,
    }
}

pub fn store_with(
    campaigns: Vec<CampaignStrategy>,
    banners: Vec<BannerStrategy>,
) -> InMemoryStrategyStore {
    let store = InMemoryStrategyStore::new();
    for c in campaigns {
        store.upsert_campaign(c);
    }
    for b in banners {
        store.upsert_banner(b);
    }
    store
}

/// Canned statistics; records every request it serves.
#[derive(Default)]
pub struct FakeStats {
    pub campaigns: Vec<CampaignStatRecord>,
    pub banners: HashMap<CampaignId, Vec<BannerStatRecord>>,
    pub fail_banner_fetch_for: Option<CampaignId>,
    pub campaign_requests: Mutex<Vec<(Vec<CampaignId>, NaiveDate, NaiveDate)>>,
    pub banner_requests: Mutex<Vec<CampaignId>>,
}

#[async_trait]
impl StatsSource for FakeStats {
    async fn fetch_campaign_stats(
        &self,
        campaign_ids: &[CampaignId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> CampaignResult<Vec<CampaignStatRecord>> {
        self.campaign_requests
            .lock()
            .push((campaign_ids.to_vec(), from, to));
        Ok(self
            .campaigns
            .iter()
            .filter(|r| campaign_ids.contains(&r.campaign_id))
            .cloned()
            .collect())
    }

    async fn fetch_banner_stats(
        &self,
        campaign_id: CampaignId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> CampaignResult<Option<Vec<BannerStatRecord>>> {
        self.banner_requests.lock().push(campaign_id);
        if self.fail_banner_fetch_for == Some(campaign_id) {
            return Err(CampaignError::RemoteCommunication(
                "GetBannersStat: connection reset".to_string(),
            ));
        }
        Ok(self.banners.get(&campaign_id).cloned())
    }
}

/// Records pause calls; refuses the ids listed in `refuse_*`.
#[derive(Default)]
pub struct RecordingActions {
    pub refuse_campaigns: HashSet<CampaignId>,
    pub refuse_banners: HashSet<BannerId>,
    pub campaign_calls: Mutex<Vec<CampaignId>>,
    pub banner_calls: Mutex<Vec<(CampaignId, Vec<BannerId>)>>,
}

impl RecordingActions {
    pub fn campaign_calls(&self) -> Vec<CampaignId> {
        self.campaign_calls.lock().clone()
    }

    pub fn banner_calls(&self) -> Vec<(CampaignId, Vec<BannerId>)> {
        self.banner_calls.lock().clone()
    }
}

#[async_trait]
impl PauseActions for RecordingActions {
    async fn pause_campaign(&self, campaign_id: CampaignId) -> CampaignResult<bool> {
        self.campaign_calls.lock().push(campaign_id);
        Ok(!self.refuse_campaigns.contains(&campaign_id))
    }

    async fn pause_banners(
        &self,
        campaign_id: CampaignId,
        banner_ids: &[BannerId],
    ) -> CampaignResult<bool> {
        self.banner_calls
            .lock()
            .push((campaign_id, banner_ids.to_vec()));
        Ok(!banner_ids.iter().any(|id| self.refuse_banners.contains(id)))
    }
}
