use super::{exchange, gap, inflation, ratio, ui};
use crate::core::dashboard::DashboardData;
use crate::core::i18n::{Language, TextKey};
use crate::core::{CpiProvider, DollarMarket, ExchangeRateProvider, QuoteProvider};
use anyhow::Result;

/// Data sources and methodology footer.
pub fn render_sources(lang: Language) -> String {
    format!(
        "{}{}\n\n{}",
        ui::section_title(TextKey::SourcesTitle.text(lang)),
        TextKey::SourcesBody.text(lang),
        TextKey::MethodologyBody.text(lang)
    )
}

pub async fn run(
    cpi_provider: &dyn CpiProvider,
    exchange_rate_provider: &dyn ExchangeRateProvider,
    quote_provider: &dyn QuoteProvider,
    parallel_market: DollarMarket,
    lang: Language,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner(TextKey::Fetching.text(lang));
    let data = DashboardData::collect(
        cpi_provider,
        exchange_rate_provider,
        quote_provider,
        parallel_market,
    )
    .await;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!(
        "{}\n{}",
        ui::style_text(TextKey::Title.text(lang), ui::StyleType::Title),
        TextKey::Subtitle.text(lang)
    );
    // Gap first, as a headline card
    let sections = [
        gap::render(&data.gap, lang),
        inflation::render(&data.cpi, lang),
        exchange::render(&data.exchange_rate, lang),
        ratio::render(&data.ratio, lang),
        render_sources(lang),
    ];
    for section in sections {
        ui::print_separator();
        println!("{section}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_are_localized() {
        let es = console::strip_ansi_codes(&render_sources(Language::Es)).to_string();
        let en = console::strip_ansi_codes(&render_sources(Language::En)).to_string();

        assert!(es.contains("Fuentes de Datos y Metodología"));
        assert!(es.contains("diciembre de 2019"));
        assert!(en.contains("Data Sources and Methodology"));
    }
}
