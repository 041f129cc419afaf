use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::enums::Frequency;

/// A medicine with its dosing schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub dosage: String,
    /// Times of day a dose is due, in the order the user entered them.
    /// Display strings like "8:00 AM", matched verbatim and never parsed.
    pub times: Vec<String>,
    pub frequency: Frequency,
    /// Weekdays the schedule applies to under `Custom`, 0 = Sunday through
    /// 6 = Saturday. An empty set means the medicine is never due.
    pub active_weekdays: Vec<u8>,
}

/// Input for creating a medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub dosage: String,
    pub times: Vec<String>,
    pub frequency: Frequency,
    pub active_weekdays: Vec<u8>,
}

impl Medicine {
    /// Whether any dose of this medicine is due on `date`.
    ///
    /// Unrecognized frequency values count as never due; the medicine stays
    /// visible in lists but produces no dose slots.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match &self.frequency {
            Frequency::Daily => true,
            Frequency::Custom => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                self.active_weekdays.contains(&weekday)
            }
            Frequency::Unrecognized(_) => false,
        }
    }

    /// The scheduled times for `date`: all of `times` on an active day,
    /// none otherwise.
    pub fn times_on(&self, date: NaiveDate) -> &[String] {
        if self.is_active_on(date) {
            &self.times
        } else {
            &[]
        }
    }
}
