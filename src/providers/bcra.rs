//! Official USD exchange-rate history from estadisticasbcra.com.

use super::util::{build_client, fetch_json};
use crate::core::config::BcraProviderConfig;
use crate::core::error::{PipelineError, Result};
use crate::core::exchange::{EXCHANGE_RATE, ExchangeRateProvider};
use crate::core::series::{NormalizedSeries, SeriesRow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const PROVIDER: &str = "estadisticasbcra";

pub struct BcraProvider {
    base_url: String,
    token: String,
    client: Client,
}

impl BcraProvider {
    /// `token` is required; callers resolve it from configuration beforehand.
    pub fn new(config: &BcraProviderConfig, token: String, timeout: Duration) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(PipelineError::ConfigurationMissing(
                "BCRA API token".to_string(),
            ));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    d: String,
    v: f64,
}

fn normalize_rates(records: Vec<RateRecord>) -> Result<NormalizedSeries> {
    let total = records.len();
    let rows: Vec<SeriesRow> = records
        .into_iter()
        .filter_map(|record| {
            NaiveDate::parse_from_str(&record.d, "%Y-%m-%d")
                .ok()
                .map(|date| SeriesRow::new(date, vec![Some(record.v)]))
        })
        .collect();

    if rows.len() < total {
        warn!(
            "Dropped {} exchange rate rows with unparseable dates",
            total - rows.len()
        );
    }
    NormalizedSeries::normalize(PROVIDER, &[EXCHANGE_RATE], rows)
}

#[async_trait]
impl ExchangeRateProvider for BcraProvider {
    async fn fetch_exchange_rate_history(&self) -> Result<NormalizedSeries> {
        let url = format!("{}/usd_of", self.base_url);
        debug!("Requesting exchange rate history from {}", url);

        let request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("BEARER {}", self.token));
        let records: Vec<RateRecord> = fetch_json(PROVIDER, request).await?;

        normalize_rates(records)
    }
}
