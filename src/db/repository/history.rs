use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{DoseStatus, HistoryEvent};

/// Records the outcome of one scheduled dose slot. Writing the same
/// `(medicine_id, date, time)` again overwrites the previous status.
///
/// `time` is taken as-is; it is not checked against the medicine's current
/// schedule, and `medicine_id` may point at a medicine deleted since.
pub fn record_dose(
    conn: &Connection,
    medicine_id: i64,
    status: DoseStatus,
    date: NaiveDate,
    time: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO history (medicine_id, status, date, time)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(medicine_id, date, time) DO UPDATE SET status = excluded.status",
        params![medicine_id, status.as_str(), date.to_string(), time],
    )?;
    Ok(())
}

/// The whole dose log, oldest slot first.
pub fn fetch_events(conn: &Connection) -> Result<Vec<HistoryEvent>, DatabaseError> {
    fetch_events_where(conn, "", &[])
}

/// Dose events recorded for one date.
pub fn fetch_events_on(conn: &Connection, date: NaiveDate) -> Result<Vec<HistoryEvent>, DatabaseError> {
    fetch_events_where(conn, "WHERE date = ?1", &[&date.to_string()])
}

/// Dose events with dates in `[from, to]` inclusive.
pub fn fetch_events_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<HistoryEvent>, DatabaseError> {
    fetch_events_where(
        conn,
        "WHERE date BETWEEN ?1 AND ?2",
        &[&from.to_string(), &to.to_string()],
    )
}

/// Deletes every recorded dose event. Irreversible; any confirmation step
/// belongs to the caller.
pub fn clear_history(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM history", [])?;
    Ok(())
}

fn fetch_events_where(
    conn: &Connection,
    filter: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<HistoryEvent>, DatabaseError> {
    let sql = format!(
        "SELECT id, medicine_id, status, date, time FROM history {filter}
         ORDER BY date, time, id"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map(params, |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (id, medicine_id, status, date, time) = row?;
        events.push(HistoryEvent {
            id,
            medicine_id,
            status: DoseStatus::from_str(&status)?,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid event date: {e}")))?,
            time,
        });
    }
    Ok(events)
}
