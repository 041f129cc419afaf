use rusqlite::{params, Connection};
use tracing;

use crate::db::DatabaseError;
use crate::models::{Frequency, Medicine, NewMedicine};

/// Creates a medicine and returns its assigned id.
pub fn add_medicine(conn: &Connection, med: &NewMedicine) -> Result<i64, DatabaseError> {
    if med.name.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "medicine name must not be empty".into(),
        ));
    }
    if med.times.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "medicine needs at least one scheduled time".into(),
        ));
    }

    conn.execute(
        "INSERT INTO medicines (name, dosage, times, frequency, selected_days)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            med.name,
            med.dosage,
            serde_json::to_string(&med.times)?,
            med.frequency.as_str(),
            serde_json::to_string(&med.active_weekdays)?,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All medicines in insertion order.
///
/// A row whose stored times or weekday array fails to decode is skipped and
/// logged instead of failing the whole read, so one corrupt row cannot blank
/// the medicine list.
pub fn fetch_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dosage, times, frequency, selected_days
         FROM medicines ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(MedicineRow {
            id: row.get(0)?,
            name: row.get(1)?,
            dosage: row.get(2)?,
            times: row.get(3)?,
            frequency: row.get(4)?,
            selected_days: row.get(5)?,
        })
    })?;

    let mut medicines = Vec::new();
    for row in rows {
        let raw = row?;
        let id = raw.id;
        match medicine_from_row(raw) {
            Ok(med) => medicines.push(med),
            Err(reason) => {
                tracing::warn!(medicine_id = id, %reason, "skipping undecodable medicine row");
            }
        }
    }
    Ok(medicines)
}

/// Hard-deletes a medicine. History rows referencing it are kept.
pub fn delete_medicine(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM medicines WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Medicine".into(),
            id,
        });
    }
    Ok(())
}

pub fn count_medicines(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))
        .map_err(DatabaseError::from)
}

// Internal row type for Medicine mapping
struct MedicineRow {
    id: i64,
    name: String,
    dosage: String,
    times: String,
    frequency: String,
    selected_days: Option<String>,
}

fn medicine_from_row(row: MedicineRow) -> Result<Medicine, serde_json::Error> {
    let times: Vec<String> = serde_json::from_str(&row.times)?;
    let active_weekdays: Vec<u8> = match row.selected_days.as_deref() {
        Some(raw) => serde_json::from_str(raw)?,
        None => Vec::new(),
    };

    let frequency = Frequency::parse(&row.frequency);
    if let Frequency::Unrecognized(value) = &frequency {
        tracing::warn!(medicine_id = row.id, %value, "unrecognized frequency, medicine will never be due");
    }

    Ok(Medicine {
        id: row.id,
        name: row.name,
        dosage: row.dosage,
        times,
        frequency,
        active_weekdays,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn make_medicine(name: &str, times: &[&str]) -> NewMedicine {
        NewMedicine {
            name: name.into(),
            dosage: "100mg".into(),
            times: times.iter().map(|t| t.to_string()).collect(),
            frequency: Frequency::Daily,
            active_weekdays: vec![],
        }
    }

    #[test]
    fn add_and_fetch_round_trip() {
        let conn = open_memory_database().unwrap();
        let id = add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM", "8:00 PM"])).unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].id, id);
        assert_eq!(meds[0].name, "Aspirin");
        assert_eq!(meds[0].times, ["8:00 AM", "8:00 PM"]);
        assert_eq!(meds[0].frequency, Frequency::Daily);
    }

    #[test]
    fn fetch_preserves_insertion_order() {
        let conn = open_memory_database().unwrap();
        add_medicine(&conn, &make_medicine("Zinc", &["9:00 AM"])).unwrap();
        add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM"])).unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds[0].name, "Zinc");
        assert_eq!(meds[1].name, "Aspirin");
    }

    #[test]
    fn custom_weekdays_survive_storage() {
        let conn = open_memory_database().unwrap();
        let med = NewMedicine {
            name: "Vitamin D".into(),
            dosage: "1000 IU".into(),
            times: vec!["12:00 PM".into()],
            frequency: Frequency::Custom,
            active_weekdays: vec![1, 3, 5],
        };
        add_medicine(&conn, &med).unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds[0].frequency, Frequency::Custom);
        assert_eq!(meds[0].active_weekdays, [1, 3, 5]);
    }

    #[test]
    fn empty_name_rejected() {
        let conn = open_memory_database().unwrap();
        let result = add_medicine(&conn, &make_medicine("   ", &["8:00 AM"]));
        assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
    }

    #[test]
    fn empty_times_rejected() {
        let conn = open_memory_database().unwrap();
        let result = add_medicine(&conn, &make_medicine("Aspirin", &[]));
        assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
    }

    #[test]
    fn custom_with_empty_weekdays_accepted() {
        // A degenerate schedule that is never due, not an error.
        let conn = open_memory_database().unwrap();
        let med = NewMedicine {
            name: "Iron".into(),
            dosage: "65mg".into(),
            times: vec!["7:00 AM".into()],
            frequency: Frequency::Custom,
            active_weekdays: vec![],
        };
        assert!(add_medicine(&conn, &med).is_ok());
    }

    #[test]
    fn delete_removes_row() {
        let conn = open_memory_database().unwrap();
        let id = add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM"])).unwrap();
        delete_medicine(&conn, id).unwrap();
        assert!(fetch_medicines(&conn).unwrap().is_empty());
    }

    #[test]
    fn delete_nonexistent_returns_not_found() {
        let conn = open_memory_database().unwrap();
        let result = delete_medicine(&conn, 99);
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn recreate_after_delete_gets_new_id() {
        let conn = open_memory_database().unwrap();
        let first = add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM"])).unwrap();
        delete_medicine(&conn, first).unwrap();
        let second = add_medicine(&conn, &make_medicine("Aspirin", &["9:00 AM"])).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn corrupt_times_row_is_skipped() {
        let conn = open_memory_database().unwrap();
        add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM"])).unwrap();
        conn.execute(
            "INSERT INTO medicines (name, dosage, times, frequency, selected_days)
             VALUES ('Broken', '10mg', 'not json', 'Daily', '[]')",
            [],
        )
        .unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "Aspirin");
    }

    #[test]
    fn corrupt_weekdays_row_is_skipped() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO medicines (name, dosage, times, frequency, selected_days)
             VALUES ('Broken', '10mg', '[\"8:00 AM\"]', 'Custom', '{bad')",
            [],
        )
        .unwrap();
        add_medicine(&conn, &make_medicine("Zinc", &["9:00 AM"])).unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "Zinc");
    }

    #[test]
    fn null_selected_days_reads_as_empty() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO medicines (name, dosage, times, frequency, selected_days)
             VALUES ('Aspirin', '100mg', '[\"8:00 AM\"]', 'Daily', NULL)",
            [],
        )
        .unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds.len(), 1);
        assert!(meds[0].active_weekdays.is_empty());
    }

    #[test]
    fn unrecognized_frequency_still_listed() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO medicines (name, dosage, times, frequency, selected_days)
             VALUES ('Mystery', '10mg', '[\"8:00 AM\"]', 'Fortnightly', '[]')",
            [],
        )
        .unwrap();

        let meds = fetch_medicines(&conn).unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].frequency, Frequency::Unrecognized("Fortnightly".into()));
    }

    #[test]
    fn count_tracks_rows() {
        let conn = open_memory_database().unwrap();
        assert_eq!(count_medicines(&conn).unwrap(), 0);
        add_medicine(&conn, &make_medicine("Aspirin", &["8:00 AM"])).unwrap();
        add_medicine(&conn, &make_medicine("Zinc", &["9:00 AM"])).unwrap();
        assert_eq!(count_medicines(&conn).unwrap(), 2);
    }
}
