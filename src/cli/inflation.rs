use super::ui;
use crate::core::error::PipelineError;
use crate::core::events::{chart_events, events_in_month};
use crate::core::i18n::{Language, TextKey};
use crate::core::inflation::{CPI_CORE, CPI_GENERAL};
use crate::core::monthly::YearMonth;
use crate::core::{CpiProvider, NormalizedSeries};
use anyhow::Result;
use comfy_table::Cell;

/// CPI general/core table, one row per observation, annotated with events.
pub fn render(cpi: &Result<NormalizedSeries, PipelineError>, lang: Language) -> String {
    let mut output = ui::section_title(TextKey::InflationSection.text(lang));
    let series = match cpi {
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

    let general = series.column_index(CPI_GENERAL);
    let core = series.column_index(CPI_CORE);
    let events = chart_events();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(TextKey::Date.text(lang)),
        ui::header_cell(TextKey::CpiGeneral.text(lang)),
        ui::header_cell(TextKey::CpiCore.text(lang)),
        ui::header_cell(TextKey::Events.text(lang)),
    ]);
    for row in series.rows() {
        let labels: Vec<&str> = events_in_month(&events, YearMonth::of(row.date))
            .into_iter()
            .map(|kind| kind.label(lang))
            .collect();
        table.add_row(vec![
            Cell::new(row.date.format("%Y-%m-%d")),
            ui::number_cell(general.and_then(|i| row.values[i]), 2),
            ui::number_cell(core.and_then(|i| row.values[i]), 2),
            Cell::new(labels.join(", ")),
        ]);
    }

    output.push_str(&ui::style_text(
        TextKey::InflationChartTitle.text(lang),
        ui::StyleType::Title,
    ));
    output.push('\n');
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&ui::style_text(
        TextKey::InflationCaption.text(lang),
        ui::StyleType::Subtle,
    ));
    output.push('\n');
    output.push_str(&ui::style_text(
        TextKey::InflationSource.text(lang),
        ui::StyleType::Subtle,
    ));
    output
}

pub async fn run(cpi_provider: &dyn CpiProvider, lang: Language, json: bool) -> Result<()> {
    let pb = ui::new_spinner(TextKey::Fetching.text(lang));
    let cpi = cpi_provider.fetch_cpi().await;
    pb.finish_and_clear();

    if json {
        println!("{}", ui::product_json(&cpi)?);
    } else {
        println!("{}", render(&cpi, lang));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::SeriesRow;
    use chrono::NaiveDate;

    #[test]
    fn test_render_annotates_events() {
        let series = NormalizedSeries::normalize(
            "test",
            &[CPI_GENERAL, CPI_CORE],
            vec![
                SeriesRow::new(NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(), vec![Some(1.5), None]),
                SeriesRow::new(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(), vec![Some(25.5), Some(28.3)]),
            ],
        );

        let output = console::strip_ansi_codes(&render(&series, Language::En)).to_string();

        assert!(output.contains("2020-04-01"));
        assert!(output.contains("COVID-19"));
        assert!(output.contains("Milei takes office"));
        assert!(output.contains("28.30"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_render_failure() {
        let cpi = Err(PipelineError::schema("datos.gob.ar", "missing field `data`"));

        let output = console::strip_ansi_codes(&render(&cpi, Language::En)).to_string();

        assert!(output.contains("does not have the expected structure"));
    }
}
