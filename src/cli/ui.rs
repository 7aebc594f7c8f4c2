use crate::core::error::PipelineError;
use crate::core::i18n::{Language, describe_error};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Section,
    MetricValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Section => style(text).bold().cyan(),
        StyleType::MetricValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<f64>` into a right-aligned cell. `None` is displayed as "N/A".
pub fn number_cell(value: Option<f64>, decimals: usize) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format!("{v:.decimals$}")).set_alignment(CellAlignment::Right),
    )
}

/// Creates a cell for a percentage with color coding.
pub fn change_cell(change: f64) -> Cell {
    let text = format!("{change:.2}%");
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text)
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Section heading followed by a blank line.
pub fn section_title(text: &str) -> String {
    format!("{}\n\n", style_text(text, StyleType::Section))
}

/// Localized, styled rendering of a pipeline failure.
pub fn error_line(err: &PipelineError, lang: Language) -> String {
    style_text(&describe_error(err, lang), StyleType::Error)
}

/// Pretty JSON for one data product: the value itself, or `{"error": ...}`.
pub fn product_json<T: Serialize>(product: &Result<T, PipelineError>) -> anyhow::Result<String> {
    let value = match product {
        Ok(value) => serde_json::to_value(value)?,
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Creates a spinner shown while data is fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
