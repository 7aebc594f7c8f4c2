//! Core business logic: data model, pipeline stages and their abstractions

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod exchange;
pub mod i18n;
pub mod inflation;
pub mod log;
pub mod metrics;
pub mod monthly;
pub mod series;

// Re-export main types for cleaner imports
pub use error::PipelineError;
pub use exchange::{DollarMarket, ExchangeRateProvider, QuoteProvider, SpotQuote};
pub use i18n::{Language, TextKey};
pub use inflation::CpiProvider;
pub use series::NormalizedSeries;
