//! Assembles the dashboard's data products from the providers.
//!
//! Every stage runs strictly in sequence: CPI, exchange rate, official quote,
//! parallel quote. Each product ends up either fully populated or absent with
//! a typed reason; a failed input makes the products derived from it absent.

use crate::core::error::{PipelineError, Result};
use crate::core::exchange::{DollarMarket, EXCHANGE_RATE, ExchangeRateProvider, QuoteProvider};
use crate::core::inflation::{CPI_CORE, CPI_GENERAL, CpiProvider};
use crate::core::metrics::{CurrencyGapSnapshot, RatioSeries, exchange_to_cpi_ratio};
use crate::core::monthly::{MonthlySeries, to_monthly};
use crate::core::series::NormalizedSeries;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

/// Serializes a product as its value, or as `{"error": "..."}` when absent.
fn serialize_product<T: Serialize, S: Serializer>(
    product: &Result<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(untagged)]
    enum Product<'a, T> {
        Value(&'a T),
        Absent { error: String },
    }

    match product {
        Ok(value) => Product::Value(value).serialize(serializer),
        Err(e) => {
            let absent: Product<'_, T> = Product::Absent {
                error: e.to_string(),
            };
            absent.serialize(serializer)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    #[serde(serialize_with = "serialize_product")]
    pub cpi: Result<NormalizedSeries>,
    #[serde(serialize_with = "serialize_product")]
    pub exchange_rate: Result<NormalizedSeries>,
    #[serde(serialize_with = "serialize_product")]
    pub ratio: Result<RatioSeries>,
    #[serde(serialize_with = "serialize_product")]
    pub gap: Result<CurrencyGapSnapshot>,
}

impl DashboardData {
    pub async fn collect(
        cpi_provider: &dyn CpiProvider,
        exchange_rate_provider: &dyn ExchangeRateProvider,
        quote_provider: &dyn QuoteProvider,
        parallel_market: DollarMarket,
    ) -> Self {
        info!("Collecting dashboard data");
        let cpi = cpi_provider.fetch_cpi().await;
        let exchange_rate = exchange_rate_provider.fetch_exchange_rate_history().await;
        let gap = collect_gap(quote_provider, parallel_market).await;
        let ratio = derive_ratio(&cpi, &exchange_rate);

        Self {
            cpi,
            exchange_rate,
            ratio,
            gap,
        }
    }
}

/// Fetches the official quote, then the parallel one, and derives the gap.
pub async fn collect_gap(
    quote_provider: &dyn QuoteProvider,
    parallel_market: DollarMarket,
) -> Result<CurrencyGapSnapshot> {
    let official = quote_provider
        .fetch_quote(DollarMarket::Official)
        .await
        .map_err(|e| e.as_insufficient("official quote"))?;
    let parallel = quote_provider
        .fetch_quote(parallel_market)
        .await
        .map_err(|e| e.as_insufficient("parallel quote"))?;
    let snapshot = CurrencyGapSnapshot::from_quotes(&official, &parallel)?;
    debug!(
        "Currency gap vs {}: {:.2}%",
        snapshot.parallel_market, snapshot.gap_pct
    );
    Ok(snapshot)
}

pub fn monthly_cpi(cpi: &NormalizedSeries) -> MonthlySeries {
    to_monthly(cpi, &[CPI_GENERAL, CPI_CORE])
}

pub fn monthly_exchange_rate(exchange_rate: &NormalizedSeries) -> MonthlySeries {
    to_monthly(exchange_rate, &[EXCHANGE_RATE])
}

/// Monthly exchange-rate/general-CPI ratio, absent when either input failed or
/// the two series share no month.
pub fn derive_ratio(
    cpi: &Result<NormalizedSeries>,
    exchange_rate: &Result<NormalizedSeries>,
) -> Result<RatioSeries> {
    let cpi = cpi.as_ref().map_err(|e| e.as_insufficient("CPI series"))?;
    let exchange_rate = exchange_rate
        .as_ref()
        .map_err(|e| e.as_insufficient("exchange rate series"))?;

    let ratio = exchange_to_cpi_ratio(
        &monthly_cpi(cpi),
        CPI_GENERAL,
        &monthly_exchange_rate(exchange_rate),
        EXCHANGE_RATE,
    );
    if ratio.is_empty() {
        return Err(PipelineError::InsufficientData(
            "no month has both CPI and exchange rate data".to_string(),
        ));
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exchange::SpotQuote;
    use crate::core::series::SeriesRow;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cpi_series() -> NormalizedSeries {
        NormalizedSeries::normalize(
            "cpi",
            &[CPI_GENERAL, CPI_CORE],
            vec![
                SeriesRow::new(date(2020, 1, 1), vec![Some(100.0), Some(90.0)]),
                SeriesRow::new(date(2020, 2, 1), vec![Some(110.0), None]),
            ],
        )
        .unwrap()
    }

    fn fx_series() -> NormalizedSeries {
        NormalizedSeries::normalize(
            "fx",
            &[EXCHANGE_RATE],
            vec![
                SeriesRow::new(date(2020, 1, 2), vec![Some(79.0)]),
                SeriesRow::new(date(2020, 1, 3), vec![Some(81.0)]),
                SeriesRow::new(date(2020, 2, 3), vec![Some(88.0)]),
            ],
        )
        .unwrap()
    }

    struct StaticCpi(Result<NormalizedSeries>);

    #[async_trait]
    impl CpiProvider for StaticCpi {
        async fn fetch_cpi(&self) -> Result<NormalizedSeries> {
            self.0.clone()
        }
    }

    struct StaticFx(Result<NormalizedSeries>);

    #[async_trait]
    impl ExchangeRateProvider for StaticFx {
        async fn fetch_exchange_rate_history(&self) -> Result<NormalizedSeries> {
            self.0.clone()
        }
    }

    struct RecordingQuotes {
        calls: Mutex<Vec<DollarMarket>>,
        official_sell: Option<f64>,
    }

    #[async_trait]
    impl QuoteProvider for RecordingQuotes {
        async fn fetch_quote(&self, market: DollarMarket) -> Result<SpotQuote> {
            self.calls.lock().unwrap().push(market);
            let (buy, sell) = match market {
                DollarMarket::Official => (Some(95.0), self.official_sell),
                _ => (Some(150.0), Some(155.0)),
            };
            Ok(SpotQuote {
                market,
                buy,
                sell,
                updated_at: None,
            })
        }
    }

    #[tokio::test]
    async fn test_collect_populates_every_product() {
        let quotes = RecordingQuotes {
            calls: Mutex::new(Vec::new()),
            official_sell: Some(100.0),
        };

        let data = DashboardData::collect(
            &StaticCpi(Ok(cpi_series())),
            &StaticFx(Ok(fx_series())),
            &quotes,
            DollarMarket::Blue,
        )
        .await;

        assert_eq!(data.cpi.as_ref().unwrap().len(), 2);
        assert_eq!(data.exchange_rate.as_ref().unwrap().len(), 3);
        let ratio = data.ratio.unwrap();
        assert_eq!(ratio.len(), 2);
        assert!((ratio.rows[0].ratio - 0.8).abs() < 1e-9);
        assert!((ratio.rows[1].ratio - 0.8).abs() < 1e-9);
        assert_eq!(data.gap.unwrap().gap_pct, 50.0);
        assert_eq!(
            *quotes.calls.lock().unwrap(),
            vec![DollarMarket::Official, DollarMarket::Blue]
        );
    }

    #[tokio::test]
    async fn test_failed_input_makes_ratio_absent() {
        let quotes = RecordingQuotes {
            calls: Mutex::new(Vec::new()),
            official_sell: None,
        };

        let data = DashboardData::collect(
            &StaticCpi(Err(PipelineError::schema("cpi", "missing field `data`"))),
            &StaticFx(Ok(fx_series())),
            &quotes,
            DollarMarket::Mep,
        )
        .await;

        assert!(matches!(data.cpi, Err(PipelineError::SchemaMismatch { .. })));
        assert!(data.exchange_rate.is_ok());
        assert!(matches!(data.ratio, Err(PipelineError::InsufficientData(_))));
        assert!(matches!(data.gap, Err(PipelineError::InsufficientData(_))));
    }

    #[test]
    fn test_ratio_without_shared_months_is_insufficient() {
        let fx = NormalizedSeries::normalize(
            "fx",
            &[EXCHANGE_RATE],
            vec![SeriesRow::new(date(2024, 1, 2), vec![Some(800.0)])],
        );

        let ratio = derive_ratio(&Ok(cpi_series()), &fx);

        assert!(matches!(ratio, Err(PipelineError::InsufficientData(_))));
    }

    #[test]
    fn test_absent_product_serializes_as_error() {
        let data = DashboardData {
            cpi: Ok(cpi_series()),
            exchange_rate: Err(PipelineError::network("bcra", "timeout")),
            ratio: Err(PipelineError::InsufficientData("no data".to_string())),
            gap: Err(PipelineError::InsufficientData("no quotes".to_string())),
        };

        let json = serde_json::to_value(&data).unwrap();

        assert!(json["cpi"]["rows"].is_array());
        assert_eq!(
            json["exchange_rate"]["error"],
            "network failure (bcra): timeout"
        );
    }
}
