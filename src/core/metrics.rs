//! Derived metrics: currency gap and exchange-rate/CPI ratio.
//!
//! Pure functions over already normalized or aggregated inputs.

use crate::core::error::{PipelineError, Result};
use crate::core::exchange::{DollarMarket, SpotQuote};
use crate::core::monthly::{MonthlySeries, YearMonth};
use serde::Serialize;
use tracing::debug;

/// Percentage by which the parallel buy rate exceeds the official sell rate.
pub fn currency_gap(official_sell: Option<f64>, parallel_buy: Option<f64>) -> Result<f64> {
    let (Some(official_sell), Some(parallel_buy)) = (official_sell, parallel_buy) else {
        return Err(PipelineError::InsufficientData(
            "both the official sell and the parallel buy quote are required".to_string(),
        ));
    };
    if !official_sell.is_finite() || !parallel_buy.is_finite() {
        return Err(PipelineError::InsufficientData(
            "quotes must be finite numbers".to_string(),
        ));
    }
    if official_sell <= 0.0 {
        return Err(PipelineError::InsufficientData(format!(
            "official sell quote must be positive, got {official_sell}"
        )));
    }
    Ok((parallel_buy - official_sell) / official_sell * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyGapSnapshot {
    pub parallel_market: DollarMarket,
    pub official_sell: f64,
    pub parallel_buy: f64,
    pub gap_pct: f64,
}

impl CurrencyGapSnapshot {
    pub fn from_quotes(official: &SpotQuote, parallel: &SpotQuote) -> Result<Self> {
        let gap_pct = currency_gap(official.sell, parallel.buy)?;
        // currency_gap only succeeds when both legs are present
        let (Some(official_sell), Some(parallel_buy)) = (official.sell, parallel.buy) else {
            return Err(PipelineError::InsufficientData("missing quote".to_string()));
        };
        Ok(Self {
            parallel_market: parallel.market,
            official_sell,
            parallel_buy,
            gap_pct,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioRow {
    pub month: YearMonth,
    pub exchange_rate_mean: f64,
    pub cpi_mean: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RatioSeries {
    pub rows: Vec<RatioRow>,
}

impl RatioSeries {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Inner-joins the monthly CPI and exchange-rate means on month and divides
/// exchange rate by CPI. Months missing from either side, lacking a mean, or
/// with a zero CPI mean are left out.
pub fn exchange_to_cpi_ratio(
    monthly_cpi: &MonthlySeries,
    cpi_column: &str,
    monthly_fx: &MonthlySeries,
    fx_column: &str,
) -> RatioSeries {
    let (Some(cpi), Some(fx)) = (monthly_cpi.column(cpi_column), monthly_fx.column(fx_column))
    else {
        debug!("Ratio columns not found: {} / {}", fx_column, cpi_column);
        return RatioSeries::default();
    };

    let rows: Vec<RatioRow> = cpi
        .iter()
        .filter_map(|(month, cpi_mean)| {
            let fx_mean = fx.get(month)?;
            if *cpi_mean == 0.0 {
                debug!("Skipping {} in ratio: CPI mean is zero", month);
                return None;
            }
            Some(RatioRow {
                month: *month,
                exchange_rate_mean: *fx_mean,
                cpi_mean: *cpi_mean,
                ratio: fx_mean / cpi_mean,
            })
        })
        .collect();

    debug!(
        "Ratio joined {} CPI months with {} FX months into {} rows",
        cpi.len(),
        fx.len(),
        rows.len()
    );
    RatioSeries { rows }
}
