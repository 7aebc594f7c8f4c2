//! Spot dollar quotes from DolarApi.

use super::util::{build_client, fetch_json};
use crate::core::config::DolarApiProviderConfig;
use crate::core::error::{PipelineError, Result};
use crate::core::exchange::{DollarMarket, QuoteProvider, SpotQuote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "dolarapi";

pub struct DolarApiProvider {
    base_url: String,
    client: Client,
}

impl DolarApiProvider {
    pub fn new(config: &DolarApiProviderConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    compra: Option<f64>,
    venta: Option<f64>,
    #[serde(rename = "fechaActualizacion")]
    updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl QuoteProvider for DolarApiProvider {
    async fn fetch_quote(&self, market: DollarMarket) -> Result<SpotQuote> {
        let url = format!("{}/dolares/{}", self.base_url, market.slug());
        debug!("Requesting {} dollar quote from {}", market, url);

        let response: QuoteResponse = fetch_json(PROVIDER, self.client.get(&url)).await?;
        if response.compra.is_none() && response.venta.is_none() {
            return Err(PipelineError::schema(
                PROVIDER,
                format!("quote for {market} has neither `compra` nor `venta`"),
            ));
        }

        debug!(
            "{} quote: buy {:?}, sell {:?}",
            market, response.compra, response.venta
        );
        Ok(SpotQuote {
            market,
            buy: response.compra,
            sell: response.venta,
            updated_at: response.updated_at,
        })
    }
}
