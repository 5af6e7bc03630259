//! Threshold selection for the daily and weekly policies.

use campaign_core::types::{EvaluationWindow, Thresholds};

/// Effective bar an entity must clear over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min_clicks: u64,
    pub max_cost: f64,
}

impl Limits {
    pub fn is_breached_by(&self, clicks: u64, cost: f64) -> bool {
        clicks < self.min_clicks || cost > self.max_cost
    }
}

/// Campaigns compare against the raw daily or weekly thresholds.
pub fn campaign_limits(thresholds: &Thresholds, window: &EvaluationWindow) -> Limits {
    if window.is_daily() {
        Limits {
            min_clicks: thresholds.daily_clicks,
            max_cost: thresholds.daily_cost,
        }
    } else {
        Limits {
            min_clicks: thresholds.weekly_clicks,
            max_cost: thresholds.weekly_cost,
        }
    }
}

/// Banners scale the daily thresholds by the window length; weekly
/// thresholds are used as is.
pub fn banner_limits(thresholds: &Thresholds, window: &EvaluationWindow) -> Limits {
    if window.is_daily() {
        let days = window.day_count.max(1) as u64;
        Limits {
            min_clicks: thresholds.daily_clicks.saturating_mul(days),
            max_cost: thresholds.daily_cost * days as f64,
        }
    } else {
        Limits {
            min_clicks: thresholds.weekly_clicks,
            max_cost: thresholds.weekly_cost,
        }
    }
}
