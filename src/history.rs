//! History screen backend — the full dose log with medicine names joined in.

use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;
use crate::models::DoseStatus;

/// Name shown for events whose medicine has since been deleted.
pub const DELETED_MEDICINE_LABEL: &str = "Deleted Medicine";

/// One row of the history screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub medicine_id: i64,
    pub name: String,
    pub status: DoseStatus,
    pub date: String,
    pub time: String,
}

/// The full dose log, newest first. Events whose medicine no longer exists
/// are kept and labeled, not dropped.
pub fn fetch_history(conn: &Connection) -> Result<Vec<HistoryEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT h.id, h.medicine_id, COALESCE(m.name, ?1) AS name, h.status, h.date, h.time
         FROM history h
         LEFT JOIN medicines m ON h.medicine_id = m.id
         ORDER BY h.date DESC, h.time DESC",
    )?;

    let rows = stmt.query_map(params![DELETED_MEDICINE_LABEL], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, medicine_id, name, status, date, time) = row?;
        entries.push(HistoryEntry {
            id,
            medicine_id,
            name,
            status: DoseStatus::from_str(&status)?,
            date,
            time,
        });
    }
    Ok(entries)
}
