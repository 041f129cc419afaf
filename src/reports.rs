//! Reports screen backend — adherence rates over the recorded dose log.
//!
//! Every rate is `taken / (taken + missed)` as a whole percentage. Snoozed
//! events sit outside the rates entirely; they only show up in the raw
//! status breakdown. Doses never recorded one way or the other do not count
//! against the user.

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::repository::{count_medicines, fetch_events};
use crate::db::DatabaseError;
use crate::models::{DoseStatus, HistoryEvent};

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// One labeled bucket of an adherence series ("Mon" 80, "Feb" 67, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherencePeriod {
    pub label: String,
    pub rate: u32,
}

/// Raw event counts by status over the whole log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub taken: u32,
    pub missed: u32,
    pub snoozed: u32,
}

/// Everything the reports screen renders from in one fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceReport {
    /// Whole-log adherence percentage.
    pub overall_rate: u32,
    pub breakdown: StatusBreakdown,
    /// The trailing 7 days, oldest first, ending today.
    pub weekly: Vec<AdherencePeriod>,
    /// The trailing 6 calendar months, oldest first, ending this month.
    pub monthly: Vec<AdherencePeriod>,
    pub total_medicines: u32,
}

// ═══════════════════════════════════════════
// Aggregation
// ═══════════════════════════════════════════

/// Builds the adherence report with the series ending at `today`.
pub fn adherence_report_on(
    conn: &Connection,
    today: NaiveDate,
) -> Result<AdherenceReport, DatabaseError> {
    let events = fetch_events(conn)?;
    let (taken, missed, snoozed) = count_outcomes(&events);

    Ok(AdherenceReport {
        overall_rate: adherence_rate(taken, missed),
        breakdown: StatusBreakdown { taken, missed, snoozed },
        weekly: weekly_series(&events, today),
        monthly: monthly_series(&events, today),
        total_medicines: count_medicines(conn)?,
    })
}

/// Builds the adherence report ending today, by the local calendar.
pub fn adherence_report(conn: &Connection) -> Result<AdherenceReport, DatabaseError> {
    adherence_report_on(conn, Local::now().date_naive())
}

/// Integer adherence percentage, rounding .5 up. Zero recorded outcomes
/// (or only snoozed ones) yield 0 rather than an error.
fn adherence_rate(taken: u32, missed: u32) -> u32 {
    let denominator = taken + missed;
    if denominator == 0 {
        return 0;
    }
    ((taken as f64 / denominator as f64) * 100.0).round() as u32
}

fn count_outcomes<'a, I>(events: I) -> (u32, u32, u32)
where
    I: IntoIterator<Item = &'a HistoryEvent>,
{
    let mut taken = 0;
    let mut missed = 0;
    let mut snoozed = 0;
    for event in events {
        match event.status {
            DoseStatus::Taken => taken += 1,
            DoseStatus::Missed => missed += 1,
            DoseStatus::Snoozed => snoozed += 1,
        }
    }
    (taken, missed, snoozed)
}

/// Per-day rates for the 7 calendar dates ending at `today`, oldest first.
fn weekly_series(events: &[HistoryEvent], today: NaiveDate) -> Vec<AdherencePeriod> {
    (0..7)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let (taken, missed, _) = count_outcomes(events.iter().filter(|e| e.date == day));
            AdherencePeriod {
                label: day.format("%a").to_string(),
                rate: adherence_rate(taken, missed),
            }
        })
        .collect()
}

/// Per-month rates for the 6 calendar months ending at `today`'s month,
/// oldest first. Buckets match on year and month, so last January's events
/// never bleed into this January's bar.
fn monthly_series(events: &[HistoryEvent], today: NaiveDate) -> Vec<AdherencePeriod> {
    let this_month = today.with_day(1).unwrap_or(today);
    (0..6u32)
        .rev()
        .map(|back| {
            let month = this_month
                .checked_sub_months(Months::new(back))
                .unwrap_or(this_month);
            let (taken, missed, _) = count_outcomes(events.iter().filter(|e| {
                e.date.year() == month.year() && e.date.month() == month.month()
            }));
            AdherencePeriod {
                label: month.format("%b").to_string(),
                rate: adherence_rate(taken, missed),
            }
        })
        .collect()
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
