//! Reporting window resolution.

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::EvaluationWindow;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve optional ISO date bounds into an inclusive window. A missing or
/// blank bound defaults to `today`, each bound independently.
pub fn resolve(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> CampaignResult<EvaluationWindow> {
    let from = resolve_bound(from, today)?;
    let to = resolve_bound(to, today)?;

    if from > to {
        return Err(CampaignError::InvalidDate(format!(
            "start {from} is after end {to}"
        )));
    }

    Ok(EvaluationWindow {
        from,
        to,
        day_count: (to - from).num_days() + 1,
    })
}

fn resolve_bound(raw: Option<&str>, today: NaiveDate) -> CampaignResult<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| CampaignError::InvalidDate(s.to_string())),
    }
}
