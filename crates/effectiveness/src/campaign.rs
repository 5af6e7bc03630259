//! Campaign effectiveness evaluation.

use std::collections::HashMap;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::platform::PauseActions;
use campaign_core::strategy::StrategyStore;
use campaign_core::types::{CampaignId, CampaignStatRecord, EvaluationWindow, Thresholds};
use tracing::{debug, info, warn};

use crate::policy;

/// Compares campaign statistics with campaign strategies and pauses
/// offenders.
pub struct CampaignEvaluator<'a> {
    store: &'a dyn StrategyStore,
    actions: &'a dyn PauseActions,
}

impl<'a> CampaignEvaluator<'a> {
    pub fn new(store: &'a dyn StrategyStore, actions: &'a dyn PauseActions) -> Self {
        Self { store, actions }
    }

    /// Returns the paused campaign ids in the order of `stats`. The first
    /// refused pause aborts the evaluation; earlier pauses stand.
    pub async fn evaluate(
        &self,
        stats: &[CampaignStatRecord],
        window: &EvaluationWindow,
    ) -> CampaignResult<Vec<CampaignId>> {
        let strategies = self.store.list_campaign_strategies().await?;
        let mut lookup: HashMap<CampaignId, Thresholds> = HashMap::with_capacity(strategies.len());
        for strategy in strategies {
            lookup
                .entry(strategy.campaign_id)
                .or_insert(strategy.thresholds);
        }

        let mut paused: Vec<CampaignId> = Vec::new();

        for record in stats {
            if paused.contains(&record.campaign_id) {
                debug!(campaign_id = record.campaign_id, "Campaign already paused in this run");
                continue;
            }

            let Some(thresholds) = lookup.get(&record.campaign_id) else {
                warn!(
                    campaign_id = record.campaign_id,
                    "No strategy for campaign, skipping"
                );
                metrics::counter!("effectiveness.records.unmatched", "entity" => "campaign")
                    .increment(1);
                continue;
            };

            let limits = policy::campaign_limits(thresholds, window);
            if !limits.is_breached_by(record.clicks, record.cost) {
                continue;
            }

            if !self.actions.pause_campaign(record.campaign_id).await? {
                metrics::counter!("effectiveness.pause.failed", "entity" => "campaign")
                    .increment(1);
                return Err(CampaignError::campaign_pause_failed(record.campaign_id));
            }

            info!(
                campaign_id = record.campaign_id,
                clicks = record.clicks,
                cost = record.cost,
                min_clicks = limits.min_clicks,
                max_cost = limits.max_cost,
                "Campaign paused"
            );
            metrics::counter!("effectiveness.campaigns.paused").increment(1);
            paused.push(record.campaign_id);
        }

        Ok(paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn strategy_store() -> campaign_store::InMemoryStrategyStore {
        store_with(
            vec![
                campaign_strategy(1, thresholds(100, 50.0, 700, 350.0)),
                campaign_strategy(2, thresholds(100, 50.0, 700, 350.0)),
                campaign_strategy(3, thresholds(100, 50.0, 700, 350.0)),
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_low_clicks_pauses_campaign() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let paused = evaluator
            .evaluate(&[campaign_stat(1, 90, 40.0)], &window(1))
            .await
            .unwrap();

        assert_eq!(paused, vec![1]);
        assert_eq!(actions.campaign_calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_high_cost_pauses_campaign_despite_clicks() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let paused = evaluator
            .evaluate(&[campaign_stat(1, 150, 60.0)], &window(1))
            .await
            .unwrap();

        assert_eq!(paused, vec![1]);
    }

    #[tokio::test]
    async fn test_compliant_campaign_is_left_running() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let paused = evaluator
            .evaluate(&[campaign_stat(1, 100, 50.0)], &window(1))
            .await
            .unwrap();

        assert!(paused.is_empty());
        assert!(actions.campaign_calls().is_empty());
    }

    #[tokio::test]
    async fn test_daily_thresholds_are_not_scaled_for_campaigns() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        // 3 days, 120 clicks: fine against the raw daily bar of 100.
        let paused = evaluator
            .evaluate(&[campaign_stat(1, 120, 45.0)], &window(3))
            .await
            .unwrap();

        assert!(paused.is_empty());
    }

    #[tokio::test]
    async fn test_weekly_policy_from_seven_days() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let stats = [campaign_stat(1, 650, 100.0), campaign_stat(2, 800, 300.0)];
        let paused = evaluator.evaluate(&stats, &window(7)).await.unwrap();

        assert_eq!(paused, vec![1]);
    }

    #[tokio::test]
    async fn test_paused_ids_follow_record_order() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let stats = [
            campaign_stat(3, 10, 1.0),
            campaign_stat(2, 500, 10.0),
            campaign_stat(1, 10, 1.0),
        ];
        let paused = evaluator.evaluate(&stats, &window(1)).await.unwrap();

        assert_eq!(paused, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_refused_pause_aborts_remaining_records() {
        let store = strategy_store();
        let actions = RecordingActions {
            refuse_campaigns: [2].into_iter().collect(),
            ..Default::default()
        };
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let stats = [
            campaign_stat(1, 10, 1.0),
            campaign_stat(2, 10, 1.0),
            campaign_stat(3, 10, 1.0),
        ];
        let err = evaluator.evaluate(&stats, &window(1)).await.unwrap_err();

        assert!(matches!(err, CampaignError::ActionFailed { id: 2, .. }));
        assert_eq!(actions.campaign_calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_unmatched_campaign_is_skipped() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let stats = [campaign_stat(42, 0, 999.0), campaign_stat(1, 10, 1.0)];
        let paused = evaluator.evaluate(&stats, &window(1)).await.unwrap();

        assert_eq!(paused, vec![1]);
    }

    #[tokio::test]
    async fn test_duplicate_record_pauses_once() {
        let store = strategy_store();
        let actions = RecordingActions::default();
        let evaluator = CampaignEvaluator::new(&store, &actions);

        let stats = [campaign_stat(1, 10, 1.0), campaign_stat(1, 10, 1.0)];
        let paused = evaluator.evaluate(&stats, &window(1)).await.unwrap();

        assert_eq!(paused, vec![1]);
        assert_eq!(actions.campaign_calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_same_inputs_same_decisions() {
        let store = strategy_store();
        let stats = [campaign_stat(1, 10, 1.0), campaign_stat(2, 200, 10.0)];

        let first = RecordingActions::default();
        let a = CampaignEvaluator::new(&store, &first)
            .evaluate(&stats, &window(2))
            .await
            .unwrap();
        let second = RecordingActions::default();
        let b = CampaignEvaluator::new(&store, &second)
            .evaluate(&stats, &window(2))
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(first.campaign_calls(), second.campaign_calls());
    }
}
