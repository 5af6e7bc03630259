//! Wire format of the platform's JSON API.
//!
//! Every call is a POST of `{method, token, locale, param}`. The platform
//! answers with either `{data}` or `{error_code, error_str, error_detail}`.

use std::collections::HashMap;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::{BannerId, BannerStatRecord, CampaignId, CampaignStatRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const METHOD_SUMMARY_STAT: &str = "GetSummaryStat";
pub const METHOD_BANNERS_STAT: &str = "GetBannersStat";
pub const METHOD_STOP_CAMPAIGN: &str = "StopCampaign";
pub const METHOD_STOP_BANNERS: &str = "StopBanners";

/// "No banners found for the campaign". Not a failure.
pub const NO_BANNERS_ERROR_CODE: i64 = 2;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize)]
pub struct ApiRequest<'a, P: Serialize> {
    pub method: &'a str,
    pub token: &'a str,
    pub locale: &'a str,
    pub param: &'a P,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_str: Option<String>,
    #[serde(default)]
    pub error_detail: Option<String>,
}

impl ApiResponse {
    /// Payload of a successful call. The "no banners" error code yields
    /// `Ok(None)`; any other error code is surfaced unchanged.
    pub fn into_data(self) -> CampaignResult<Option<Value>> {
        match self.error_code {
            Some(code) if code != NO_BANNERS_ERROR_CODE => {
                Err(CampaignError::RemoteCommunication(format!(
                    "{}: {}",
                    self.error_str.unwrap_or_else(|| format!("error code {code}")),
                    self.error_detail.unwrap_or_default(),
                )))
            }
            Some(_) => Ok(None),
            None => Ok(self.data),
        }
    }
}

// ─── Params ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SummaryStatParams<'a> {
    #[serde(rename = "CampaignIDS")]
    pub campaign_ids: &'a [CampaignId],
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct BannersStatParams {
    #[serde(rename = "CampaignID")]
    pub campaign_id: CampaignId,
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct StopCampaignParams {
    #[serde(rename = "CampaignID")]
    pub campaign_id: CampaignId,
}

#[derive(Debug, Serialize)]
pub struct StopBannersParams<'a> {
    #[serde(rename = "CampaignID")]
    pub campaign_id: CampaignId,
    #[serde(rename = "BannerIDS")]
    pub banner_ids: &'a [BannerId],
}

// ─── Response rows ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SummaryStatRow {
    #[serde(rename = "CampaignID")]
    campaign_id: CampaignId,
    #[serde(rename = "ClicksContext", default)]
    clicks: u64,
    #[serde(rename = "SumContext", default)]
    cost: f64,
}

#[derive(Debug, Deserialize)]
struct BannersStatData {
    #[serde(rename = "Stat", default)]
    stat: Vec<BannerStatRow>,
}

#[derive(Debug, Deserialize)]
struct BannerStatRow {
    #[serde(rename = "BannerID")]
    banner_id: BannerId,
    #[serde(rename = "ClicksContext", default)]
    clicks: u64,
    #[serde(rename = "SumContext", default)]
    cost: f64,
}

/// Summary stats come back as one row per campaign per day. Rows are summed
/// into one record per campaign, in order of first appearance.
pub fn parse_summary_stat(data: Option<Value>) -> CampaignResult<Vec<CampaignStatRecord>> {
    let Some(data) = data else {
        return Ok(Vec::new());
    };
    let rows: Vec<SummaryStatRow> = serde_json::from_value(data)?;

    let mut records: Vec<CampaignStatRecord> = Vec::new();
    let mut index: HashMap<CampaignId, usize> = HashMap::new();
    for row in rows {
        match index.get(&row.campaign_id) {
            Some(&i) => {
                records[i].clicks += row.clicks;
                records[i].cost += row.cost;
            }
            None => {
                index.insert(row.campaign_id, records.len());
                records.push(CampaignStatRecord {
                    campaign_id: row.campaign_id,
                    clicks: row.clicks,
                    cost: row.cost,
                });
            }
        }
    }
    Ok(records)
}

/// `None` when the platform reported no banners or an empty `Stat` list.
pub fn parse_banners_stat(
    campaign_id: CampaignId,
    data: Option<Value>,
) -> CampaignResult<Option<Vec<BannerStatRecord>>> {
    let Some(data) = data else {
        return Ok(None);
    };
    let parsed: BannersStatData = serde_json::from_value(data)?;
    if parsed.stat.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        parsed
            .stat
            .into_iter()
            .map(|row| BannerStatRecord {
                banner_id: row.banner_id,
                campaign_id,
                clicks: row.clicks,
                cost: row.cost,
            })
            .collect(),
    ))
}

/// Stop commands acknowledge with `data == 1`.
pub fn is_pause_acknowledged(data: Option<&Value>) -> bool {
    data.and_then(Value::as_i64) == Some(1)
}
