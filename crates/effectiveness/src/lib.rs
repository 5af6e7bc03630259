//! Campaign and banner effectiveness checks.
//!
//! Pulls local strategies and remote statistics for a date window, pauses
//! campaigns and banners that miss their thresholds and reports the result.

pub mod banner;
pub mod campaign;
pub mod checker;
pub mod policy;
pub mod report;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use banner::{BannerEvaluator, BannerOutcome};
pub use campaign::CampaignEvaluator;
pub use checker::{parse_campaign_ids, CheckRequest, EffectivenessChecker};
pub use report::EffectivenessReport;
