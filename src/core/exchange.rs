//! Exchange-rate abstractions: official history and spot dollar quotes

use crate::core::error::Result;
use crate::core::series::NormalizedSeries;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Column name of the official exchange-rate series.
pub const EXCHANGE_RATE: &str = "exchange_rate";

/// Dollar markets quoted by the spot-quote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DollarMarket {
    Official,
    Mep,
    Blue,
}

impl DollarMarket {
    /// Path segment used by the quote API.
    pub fn slug(&self) -> &'static str {
        match self {
            DollarMarket::Official => "oficial",
            DollarMarket::Mep => "bolsa",
            DollarMarket::Blue => "blue",
        }
    }

    pub fn is_parallel(&self) -> bool {
        !matches!(self, DollarMarket::Official)
    }
}

impl Display for DollarMarket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DollarMarket::Official => "Oficial",
                DollarMarket::Mep => "MEP",
                DollarMarket::Blue => "Blue",
            }
        )
    }
}

impl FromStr for DollarMarket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "official" | "oficial" => Ok(DollarMarket::Official),
            "mep" | "bolsa" => Ok(DollarMarket::Mep),
            "blue" => Ok(DollarMarket::Blue),
            _ => Err(anyhow!("Invalid dollar market: {}", s)),
        }
    }
}

/// Point-in-time buy/sell quote for one market. Either leg may be missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotQuote {
    pub market: DollarMarket,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Daily official exchange rate, one `EXCHANGE_RATE` column.
    async fn fetch_exchange_rate_history(&self) -> Result<NormalizedSeries>;
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, market: DollarMarket) -> Result<SpotQuote>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parse_accepts_api_slugs() {
        assert_eq!("bolsa".parse::<DollarMarket>().unwrap(), DollarMarket::Mep);
        assert_eq!("OFICIAL".parse::<DollarMarket>().unwrap(), DollarMarket::Official);
        assert_eq!("blue".parse::<DollarMarket>().unwrap(), DollarMarket::Blue);
        assert!("crypto".parse::<DollarMarket>().is_err());
    }

    #[test]
    fn test_market_slug_round_trips_through_parse() {
        for market in [DollarMarket::Official, DollarMarket::Mep, DollarMarket::Blue] {
            assert_eq!(market.slug().parse::<DollarMarket>().unwrap(), market);
        }
    }
}
