use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::DoseStatus;

/// One recorded dose outcome. At most one event exists per
/// `(medicine_id, date, time)` slot — recording again overwrites the status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: i64,
    /// Weak reference: the medicine may have been deleted since.
    pub medicine_id: i64,
    pub status: DoseStatus,
    pub date: NaiveDate,
    /// The scheduled time string the user acted on, kept verbatim.
    pub time: String,
}
