//! Home screen backend — dose occurrences for a date and their counters.
//!
//! An occurrence is one medicine at one scheduled time on one date. The set
//! is derived fresh on every call by expanding each medicine's schedule and
//! joining recorded history over it; nothing here is cached or persisted.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::repository::{fetch_events_on, fetch_medicines};
use crate::db::DatabaseError;
use crate::models::DoseStatus;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Status of one dose slot as shown on the home screen. `Pending` is derived
/// (no history event yet), never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurrenceStatus {
    Taken,
    Missed,
    Snoozed,
    Pending,
}

impl From<DoseStatus> for OccurrenceStatus {
    fn from(status: DoseStatus) -> Self {
        match status {
            DoseStatus::Taken => Self::Taken,
            DoseStatus::Missed => Self::Missed,
            DoseStatus::Snoozed => Self::Snoozed,
        }
    }
}

/// One concrete dose slot: a medicine at one of its scheduled times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    pub medicine_id: i64,
    pub name: String,
    pub dosage: String,
    pub time: String,
    pub status: OccurrenceStatus,
}

/// Dose counters for the home header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub taken: u32,
    pub missed: u32,
    pub pending: u32,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Builds the dose occurrences for `date`: every scheduled time of every
/// medicine due that day, joined against recorded history.
///
/// Slots without a matching event are `Pending`. The match key is the exact
/// `(medicine_id, time)` pair: time strings are compared verbatim, so
/// "8:00 AM" never matches "08:00". Order follows the medicine list, then
/// each medicine's own times order.
pub fn occurrences_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Occurrence>, DatabaseError> {
    let medicines = fetch_medicines(conn)?;

    let mut status_by_slot: HashMap<(i64, String), DoseStatus> = HashMap::new();
    for event in fetch_events_on(conn, date)? {
        status_by_slot.insert((event.medicine_id, event.time), event.status);
    }

    let mut occurrences = Vec::new();
    for med in &medicines {
        for time in med.times_on(date) {
            let status = status_by_slot
                .get(&(med.id, time.clone()))
                .map(|s| OccurrenceStatus::from(*s))
                .unwrap_or(OccurrenceStatus::Pending);
            occurrences.push(Occurrence {
                medicine_id: med.id,
                name: med.name.clone(),
                dosage: med.dosage.clone(),
                time: time.clone(),
                status,
            });
        }
    }
    Ok(occurrences)
}

/// Today's occurrences, by the local calendar.
pub fn occurrences_today(conn: &Connection) -> Result<Vec<Occurrence>, DatabaseError> {
    occurrences_on(conn, Local::now().date_naive())
}

/// Counts the occurrences of `date` by outcome. Snoozed doses still need
/// action, so they count as pending here.
pub fn dashboard_stats(conn: &Connection, date: NaiveDate) -> Result<DashboardStats, DatabaseError> {
    let mut stats = DashboardStats::default();
    for occurrence in occurrences_on(conn, date)? {
        match occurrence.status {
            OccurrenceStatus::Taken => stats.taken += 1,
            OccurrenceStatus::Missed => stats.missed += 1,
            OccurrenceStatus::Snoozed | OccurrenceStatus::Pending => stats.pending += 1,
        }
    }
    Ok(stats)
}

/// Today's counters, by the local calendar.
pub fn dashboard_stats_today(conn: &Connection) -> Result<DashboardStats, DatabaseError> {
    dashboard_stats(conn, Local::now().date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
