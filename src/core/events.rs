//! Historical events annotated alongside the CPI series

use crate::core::i18n::{Language, TextKey};
use crate::core::monthly::YearMonth;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Covid,
    FernandezTakesOffice,
    MileiTakesOffice,
}

impl EventKind {
    pub fn label(&self, lang: Language) -> &'static str {
        match self {
            EventKind::Covid => TextKey::Covid.text(lang),
            EventKind::FernandezTakesOffice => TextKey::FernandezTakesOffice.text(lang),
            EventKind::MileiTakesOffice => TextKey::MileiTakesOffice.text(lang),
        }
    }
}

/// A dated marker; `end` is set for periods, absent for single days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEvent {
    pub kind: EventKind,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl ChartEvent {
    /// Whether any day of `month` falls inside this event.
    pub fn touches(&self, month: YearMonth) -> bool {
        let start = YearMonth::of(self.start);
        let end = self.end.map_or(start, YearMonth::of);
        start <= month && month <= end
    }
}

pub fn chart_events() -> Vec<ChartEvent> {
    let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    [
        (EventKind::FernandezTakesOffice, ymd(2019, 12, 1), None),
        (EventKind::Covid, ymd(2020, 3, 1), ymd(2021, 12, 31)),
        (EventKind::MileiTakesOffice, ymd(2023, 12, 1), None),
    ]
    .into_iter()
    .filter_map(|(kind, start, end)| {
        Some(ChartEvent {
            kind,
            start: start?,
            end,
        })
    })
    .collect()
}

/// Events relevant to a given month, in chronological order.
pub fn events_in_month(events: &[ChartEvent], month: YearMonth) -> Vec<EventKind> {
    events
        .iter()
        .filter(|event| event.touches(month))
        .map(|event| event.kind)
        .collect()
}
