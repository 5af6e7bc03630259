//! JSON API client for the remote advertising platform.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use campaign_core::config::DirectConfig;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::platform::{PauseActions, StatsSource};
use campaign_core::types::{BannerId, BannerStatRecord, CampaignId, CampaignStatRecord};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::*;

const REDACTED: &str = "***";

pub struct DirectClient {
    http: Client,
    config: DirectConfig,
}

impl DirectClient {
    pub fn new(config: DirectConfig) -> CampaignResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CampaignError::Config(format!("http client: {e}")))?;

        info!(api_url = %config.api_url, debug = config.debug, "Platform client initialized");
        Ok(Self { http, config })
    }

    /// Send one API call and return its `data` payload.
    async fn call<P: Serialize + Sync>(
        &self,
        method: &str,
        param: &P,
    ) -> CampaignResult<Option<Value>> {
        let start = Instant::now();
        let request = ApiRequest {
            method,
            token: &self.config.token,
            locale: &self.config.locale,
            param,
        };

        if self.config.debug {
            let shown = ApiRequest {
                token: REDACTED,
                ..request
            };
            info!(
                method,
                request = %serde_json::to_string(&shown)?,
                "Platform API request"
            );
        } else {
            debug!(method, "Platform API request");
        }

        let response = self.send(method, &request).await;

        let outcome = if response.is_ok() { "ok" } else { "error" };
        metrics::histogram!(
            "direct.latency_ms",
            "method" => method.to_string(),
            "outcome" => outcome
        )
        .record(start.elapsed().as_millis() as f64);

        response?.into_data()
    }

    async fn send<P: Serialize + Sync>(
        &self,
        method: &str,
        request: &ApiRequest<'_, P>,
    ) -> CampaignResult<ApiResponse> {
        let res = self
            .http
            .post(&self.config.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| CampaignError::RemoteCommunication(format!("{method}: {e}")))?;

        if !res.status().is_success() {
            return Err(CampaignError::RemoteCommunication(format!(
                "{method}: HTTP {}",
                res.status()
            )));
        }

        res.json()
            .await
            .map_err(|e| CampaignError::RemoteCommunication(format!("{method}: {e}")))
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[async_trait]
impl StatsSource for DirectClient {
    async fn fetch_campaign_stats(
        &self,
        campaign_ids: &[CampaignId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> CampaignResult<Vec<CampaignStatRecord>> {
        let params = SummaryStatParams {
            campaign_ids,
            start_date: format_date(from),
            end_date: format_date(to),
        };
        let data = self.call(METHOD_SUMMARY_STAT, &params).await?;
        parse_summary_stat(data)
    }

    async fn fetch_banner_stats(
        &self,
        campaign_id: CampaignId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CampaignResult<Option<Vec<BannerStatRecord>>> {
        let params = BannersStatParams {
            campaign_id,
            start_date: format_date(from),
            end_date: format_date(to),
        };
        let data = self.call(METHOD_BANNERS_STAT, &params).await?;
        parse_banners_stat(campaign_id, data)
    }
}

#[async_trait]
impl PauseActions for DirectClient {
    async fn pause_campaign(&self, campaign_id: CampaignId) -> CampaignResult<bool> {
        let data = self
            .call(METHOD_STOP_CAMPAIGN, &StopCampaignParams { campaign_id })
            .await?;
        Ok(is_pause_acknowledged(data.as_ref()))
    }

    async fn pause_banners(
        &self,
        campaign_id: CampaignId,
        banner_ids: &[BannerId],
    ) -> CampaignResult<bool> {
        let params = StopBannersParams {
            campaign_id,
            banner_ids,
        };
        let data = self.call(METHOD_STOP_BANNERS, &params).await?;
        Ok(is_pause_acknowledged(data.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use metrics::{
        Counter, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };
    use parking_lot::Mutex;

    use super::*;

    fn unreachable_client() -> DirectClient {
        DirectClient::new(DirectConfig {
            api_url: "http://127.0.0.1:9/json/".to_string(),
            timeout_ms: 500,
            ..DirectConfig::default()
        })
        .unwrap()
    }

    /// Captures histogram samples as `name{label=value,..}` strings.
    #[derive(Default)]
    struct SampleRecorder {
        samples: Arc<Mutex<Vec<String>>>,
    }

    struct Sink {
        series: String,
        samples: Arc<Mutex<Vec<String>>>,
    }

    impl HistogramFn for Sink {
        fn record(&self, _value: f64) {
            self.samples.lock().push(self.series.clone());
        }
    }

    impl Recorder for SampleRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            let labels = key
                .labels()
                .map(|l| format!("{}={}", l.key(), l.value()))
                .collect::<Vec<_>>()
                .join(",");
            Histogram::from_arc(Arc::new(Sink {
                series: format!("{}{{{labels}}}", key.name()),
                samples: self.samples.clone(),
            }))
        }
    }

    #[test]
    fn test_latency_recorded_for_failed_calls() {
        let recorder = SampleRecorder::default();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let client = unreachable_client();

        let result = metrics::with_local_recorder(&recorder, || {
            runtime.block_on(client.pause_campaign(7))
        });

        assert!(result.is_err());
        assert_eq!(
            *recorder.samples.lock(),
            vec!["direct.latency_ms{method=StopCampaign,outcome=error}".to_string()]
        );
    }

    #[test]
    fn test_dates_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "2026-03-07");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_remote_error() {
        let err = unreachable_client().pause_campaign(1).await.unwrap_err();
        assert!(matches!(
            err,
            CampaignError::RemoteCommunication(ref m) if m.starts_with("StopCampaign")
        ));
    }
}
