pub mod cli;
pub mod core;
pub mod providers;

// Re-export for convenience
pub use crate::core::config;

use crate::core::cache::SystemClock;
use crate::core::config::AppConfig;
use crate::core::i18n::Language;
use crate::providers::bcra::BcraProvider;
use crate::providers::caching::{
    CachingCpiProvider, CachingExchangeRateProvider, CachingQuoteProvider, SessionCache,
};
use crate::providers::datos_gob::DatosGobProvider;
use crate::providers::dolar_api::DolarApiProvider;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard,
    Gap,
    Inflation,
    Exchange,
    Ratio,
}

/// Per-invocation overrides taken from the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    pub language: Option<Language>,
    pub json: bool,
}

fn exchange_rate_provider(
    config: &AppConfig,
    timeout: Duration,
    cache: &Arc<SessionCache>,
) -> Result<CachingExchangeRateProvider<BcraProvider>> {
    let token = config
        .bcra_token()
        .context("The exchange rate history requires a BCRA API token")?;
    let provider = BcraProvider::new(&config.providers.bcra, token, timeout)?;
    Ok(CachingExchangeRateProvider::new(provider, Arc::clone(cache)))
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: RunOptions,
) -> Result<()> {
    info!("EconMind starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        language = %config.language,
        parallel_market = %config.parallel_market,
        timeout_secs = config.request_timeout_secs,
        cache_ttl_secs = ?config.cache_ttl_secs,
        "Loaded config"
    );
    if !config.parallel_market.is_parallel() {
        anyhow::bail!(
            "parallel_market must be a parallel dollar market (mep or blue), got {}",
            config.parallel_market
        );
    }

    let lang = options.language.unwrap_or(config.language);
    let timeout = config.request_timeout();

    // One cache per run, shared by every provider
    let cache = Arc::new(SessionCache::with_policy(
        config.cache_ttl(),
        Arc::new(SystemClock),
    ));
    let cpi_provider = CachingCpiProvider::new(
        DatosGobProvider::new(&config.providers.datos_gob, timeout)?,
        Arc::clone(&cache),
    );
    let quote_provider = CachingQuoteProvider::new(
        DolarApiProvider::new(&config.providers.dolar_api, timeout)?,
        Arc::clone(&cache),
    );

    match command {
        AppCommand::Dashboard => {
            let fx_provider = exchange_rate_provider(&config, timeout, &cache)?;
            cli::dashboard::run(
                &cpi_provider,
                &fx_provider,
                &quote_provider,
                config.parallel_market,
                lang,
                options.json,
            )
            .await
        }
        AppCommand::Gap => {
            cli::gap::run(&quote_provider, config.parallel_market, lang, options.json).await
        }
        AppCommand::Inflation => cli::inflation::run(&cpi_provider, lang, options.json).await,
        AppCommand::Exchange => {
            let fx_provider = exchange_rate_provider(&config, timeout, &cache)?;
            cli::exchange::run(&fx_provider, lang, options.json).await
        }
        AppCommand::Ratio => {
            let fx_provider = exchange_rate_provider(&config, timeout, &cache)?;
            cli::ratio::run(&cpi_provider, &fx_provider, lang, options.json).await
        }
    }
}
