use super::ui;
use crate::core::dashboard::monthly_exchange_rate;
use crate::core::error::PipelineError;
use crate::core::exchange::EXCHANGE_RATE;
use crate::core::i18n::{Language, TextKey};
use crate::core::{ExchangeRateProvider, NormalizedSeries};
use anyhow::Result;
use comfy_table::Cell;

/// Official exchange rate as monthly means, followed by the latest daily value.
pub fn render(exchange_rate: &Result<NormalizedSeries, PipelineError>, lang: Language) -> String {
    let mut output = ui::section_title(TextKey::UsdSection.text(lang));
    let series = match exchange_rate {
        Ok(series) => series,
        Err(e) => {
            output.push_str(&ui::error_line(e, lang));
            return output;
        }
    };
    if series.is_empty() {
        output.push_str(&ui::style_text(TextKey::NoRows.text(lang), ui::StyleType::Subtle));
        return output;
    }

    let monthly = monthly_exchange_rate(series);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(TextKey::Month.text(lang)),
        ui::header_cell(TextKey::ExchangeRate.text(lang)),
    ]);
    for row in monthly.rows() {
        table.add_row(vec![
            Cell::new(row.month.to_string()),
            ui::number_cell(row.values.first().copied().flatten(), 2),
        ]);
    }

    output.push_str(&ui::style_text(
        TextKey::UsdChartTitle.text(lang),
        ui::StyleType::Title,
    ));
    output.push('\n');
    output.push_str(&table.to_string());
    if let Some((date, value)) = series.latest(EXCHANGE_RATE) {
        output.push_str(&format!(
            "\n{} ({}): {}",
            TextKey::UsdLatest.text(lang),
            date.format("%Y-%m-%d"),
            ui::style_text(&format!("{value:.2}"), ui::StyleType::MetricValue)
        ));
    }
    output.push('\n');
    output.push_str(&ui::style_text(
        TextKey::UsdCaption.text(lang),
        ui::StyleType::Subtle,
    ));
    output
}

pub async fn run(
    exchange_rate_provider: &dyn ExchangeRateProvider,
    lang: Language,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner(TextKey::Fetching.text(lang));
    let exchange_rate = exchange_rate_provider.fetch_exchange_rate_history().await;
    pb.finish_and_clear();

    if json {
        println!("{}", ui::product_json(&exchange_rate)?);
    } else {
        println!("{}", render(&exchange_rate, lang));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::SeriesRow;
    use chrono::NaiveDate;

    #[test]
    fn test_render_monthly_means_and_latest() {
        let series = NormalizedSeries::normalize(
            "test",
            &[EXCHANGE_RATE],
            vec![
                SeriesRow::new(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), vec![Some(59.0)]),
                SeriesRow::new(NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(), vec![Some(61.0)]),
                SeriesRow::new(NaiveDate::from_ymd_opt(2020, 2, 3).unwrap(), vec![Some(62.5)]),
            ],
        );

        let output = console::strip_ansi_codes(&render(&series, Language::En)).to_string();

        assert!(output.contains("2020-01"));
        assert!(output.contains("60.00"));
        assert!(output.contains("Latest value (2020-02-03): 62.50"));
    }
}
