use super::ui;
use crate::core::dashboard::derive_ratio;
use crate::core::error::PipelineError;
use crate::core::i18n::{Language, TextKey};
use crate::core::metrics::RatioSeries;
use crate::core::{CpiProvider, ExchangeRateProvider};
use anyhow::Result;
use comfy_table::Cell;

pub fn render(ratio: &Result<RatioSeries, PipelineError>, lang: Language) -> String {
    let mut output = ui::section_title(TextKey::RatioSection.text(lang));
    output.push_str(TextKey::RatioInterpretation.text(lang));
    output.push_str("\n\n");

    let ratio = match ratio {
        Ok(ratio) => ratio,
        Err(e) => {
            output.push_str(&ui::style_text(
                TextKey::RatioUnavailable.text(lang),
                ui::StyleType::Error,
            ));
            output.push('\n');
            output.push_str(&ui::error_line(e, lang));
            return output;
        }
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(TextKey::Month.text(lang)),
        ui::header_cell(TextKey::ExchangeRate.text(lang)),
        ui::header_cell(TextKey::CpiGeneral.text(lang)),
        ui::header_cell(TextKey::Ratio.text(lang)),
    ]);
    for row in &ratio.rows {
        table.add_row(vec![
            Cell::new(row.month.to_string()),
            ui::number_cell(Some(row.exchange_rate_mean), 2),
            ui::number_cell(Some(row.cpi_mean), 2),
            ui::number_cell(Some(row.ratio), 4),
        ]);
    }

    output.push_str(&ui::style_text(
        TextKey::RatioChartTitle.text(lang),
        ui::StyleType::Title,
    ));
    output.push('\n');
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&ui::style_text(
        TextKey::RatioCaption.text(lang),
        ui::StyleType::Subtle,
    ));
    output
}

pub async fn run(
    cpi_provider: &dyn CpiProvider,
    exchange_rate_provider: &dyn ExchangeRateProvider,
    lang: Language,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner(TextKey::Fetching.text(lang));
    let cpi = cpi_provider.fetch_cpi().await;
    let exchange_rate = exchange_rate_provider.fetch_exchange_rate_history().await;
    pb.finish_and_clear();

    let ratio = derive_ratio(&cpi, &exchange_rate);
    if json {
        println!("{}", ui::product_json(&ratio)?);
    } else {
        println!("{}", render(&ratio, lang));
    }
    Ok(())
}
