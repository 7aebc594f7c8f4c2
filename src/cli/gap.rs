use super::ui;
use crate::core::dashboard::collect_gap;
use crate::core::error::PipelineError;
use crate::core::i18n::{Language, TextKey};
use crate::core::metrics::CurrencyGapSnapshot;
use crate::core::{DollarMarket, QuoteProvider};
use anyhow::Result;

/// Headline metric card: gap percentage, then the two quotes it came from.
pub fn render(gap: &Result<CurrencyGapSnapshot, PipelineError>, lang: Language) -> String {
    let mut output = ui::section_title(TextKey::GapTitle.text(lang));
    match gap {
        Ok(snapshot) => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell(TextKey::GapTitle.text(lang)),
                ui::header_cell(TextKey::OfficialSell.text(lang)),
                ui::header_cell(&format!(
                    "{} {}",
                    TextKey::ParallelBuy.text(lang),
                    snapshot.parallel_market
                )),
            ]);
            table.add_row(vec![
                ui::change_cell(snapshot.gap_pct),
                ui::number_cell(Some(snapshot.official_sell), 2),
                ui::number_cell(Some(snapshot.parallel_buy), 2),
            ]);
            output.push_str(&table.to_string());
        }
        Err(e) => {
            output.push_str(&ui::style_text(
                TextKey::GapUnavailable.text(lang),
                ui::StyleType::Error,
            ));
            output.push('\n');
            output.push_str(&ui::error_line(e, lang));
        }
    }
    output
}

pub async fn run(
    quote_provider: &dyn QuoteProvider,
    parallel_market: DollarMarket,
    lang: Language,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner(TextKey::Fetching.text(lang));
    let gap = collect_gap(quote_provider, parallel_market).await;
    pb.finish_and_clear();

    if json {
        println!("{}", ui::product_json(&gap)?);
    } else {
        println!("{}", render(&gap, lang));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_gap_snapshot() {
        let gap = Ok(CurrencyGapSnapshot {
            parallel_market: DollarMarket::Mep,
            official_sell: 1000.0,
            parallel_buy: 1250.0,
            gap_pct: 25.0,
        });

        let output = console::strip_ansi_codes(&render(&gap, Language::En)).to_string();

        assert!(output.contains("Currency Gap"));
        assert!(output.contains("25.00%"));
        assert!(output.contains("1000.00"));
        assert!(output.contains("MEP"));
    }

    #[test]
    fn test_render_missing_gap_shows_localized_error() {
        let gap = Err(PipelineError::InsufficientData("no quotes".to_string()));

        let output = console::strip_ansi_codes(&render(&gap, Language::Es)).to_string();

        assert!(output.contains("No se pudo calcular la brecha cambiaria"));
        assert!(output.contains("no quotes"));
    }
}
