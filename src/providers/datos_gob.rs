//! CPI series from the Argentine government open-data series API.

use super::util::{build_client, fetch_json};
use crate::core::config::DatosGobProviderConfig;
use crate::core::error::Result;
use crate::core::inflation::{CPI_CORE, CPI_GENERAL, CpiProvider};
use crate::core::series::{NormalizedSeries, SeriesRow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const PROVIDER: &str = "datos.gob.ar";

pub struct DatosGobProvider {
    base_url: String,
    general_series_id: String,
    core_series_id: String,
    client: Client,
}

impl DatosGobProvider {
    pub fn new(config: &DatosGobProviderConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            general_series_id: config.general_series_id.clone(),
            core_series_id: config.core_series_id.clone(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    data: Vec<(String, Option<f64>, Option<f64>)>,
}

/// Turns `[date, general, core]` records into a CPI series. Records whose date
/// does not parse are dropped and counted.
fn normalize_cpi(records: Vec<(String, Option<f64>, Option<f64>)>) -> Result<NormalizedSeries> {
    let mut dropped = 0usize;
    let rows: Vec<SeriesRow> = records
        .into_iter()
        .filter_map(|(date_str, general, core)| {
            match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => Some(SeriesRow::new(date, vec![general, core])),
                Err(_) => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        warn!("Dropped {} CPI rows with unparseable dates", dropped);
    }
    NormalizedSeries::normalize(PROVIDER, &[CPI_GENERAL, CPI_CORE], rows)
}

#[async_trait]
impl CpiProvider for DatosGobProvider {
    async fn fetch_cpi(&self) -> Result<NormalizedSeries> {
        let url = format!(
            "{}/series/?ids={},{}&format=json",
            self.base_url, self.general_series_id, self.core_series_id
        );
        debug!("Requesting CPI series from {}", url);

        let response: SeriesResponse = fetch_json(PROVIDER, self.client.get(&url)).await?;

        normalize_cpi(response.data)
    }
}
