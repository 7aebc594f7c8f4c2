//! Consumer price index abstractions

use crate::core::error::Result;
use crate::core::series::NormalizedSeries;
use async_trait::async_trait;

/// Column name of the general CPI series.
pub const CPI_GENERAL: &str = "cpi_general";
/// Column name of the core CPI series.
pub const CPI_CORE: &str = "cpi_core";

#[async_trait]
pub trait CpiProvider: Send + Sync {
    /// CPI series with `CPI_GENERAL` and `CPI_CORE` columns.
    async fn fetch_cpi(&self) -> Result<NormalizedSeries>;
}
