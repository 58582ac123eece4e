//! Export snapshots and the JSON interchange document.

use crate::assignment::SeatAssignment;
use crate::error::ImportError;
use crate::person::Person;
use crate::table::{MAX_SEAT_COUNT, Stage, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An independent copy of the plan at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tables: Vec<Table>,
    pub stage: Stage,
    pub people: Vec<Person>,
    pub seat_assignments: Vec<SeatAssignment>,
    pub exported_at: DateTime<Utc>,
}

/// Assemble a snapshot from its parts. No filtering and no validation.
pub fn project(
    tables: &[Table],
    stage: &Stage,
    people: &[Person],
    assignments: &[SeatAssignment],
    exported_at: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        tables: tables.to_vec(),
        stage: stage.clone(),
        people: people.to_vec(),
        seat_assignments: assignments.to_vec(),
        exported_at,
    }
}

impl Snapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check referential integrity before loading.
    ///
    /// Ids and stored ordinals must be unique, every table must have between
    /// one and [`MAX_SEAT_COUNT`] seats, and every assignment must point at an
    /// existing table, an in-range seat and a known person, with no seat or
    /// person used twice. An ordinal of 0 means "not stored".
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.stage.id != Stage::ID {
            return Err(ImportError::InvalidStage(self.stage.id.clone()));
        }

        let mut seat_counts: HashMap<&str, u32> = HashMap::with_capacity(self.tables.len());
        let mut ordinals: HashMap<u32, &str> = HashMap::new();
        for table in &self.tables {
            if table.seat_count == 0 {
                return Err(ImportError::EmptyTable(table.id.clone()));
            }
            if table.seat_count > MAX_SEAT_COUNT {
                return Err(ImportError::TooManySeats {
                    table_id: table.id.clone(),
                    seat_count: table.seat_count,
                });
            }
            if seat_counts.insert(&table.id, table.seat_count).is_some() {
                return Err(ImportError::DuplicateTable(table.id.clone()));
            }
            if table.ordinal != 0 {
                if let Some(first) = ordinals.insert(table.ordinal, &table.id) {
                    return Err(ImportError::DuplicateOrdinal {
                        ordinal: table.ordinal,
                        first: first.to_string(),
                        second: table.id.clone(),
                    });
                }
            }
        }

        let mut people: HashSet<&str> = HashSet::with_capacity(self.people.len());
        for person in &self.people {
            if !people.insert(&person.id) {
                return Err(ImportError::DuplicatePerson(person.id.clone()));
            }
        }

        let mut seats = HashSet::new();
        let mut seated = HashSet::new();
        for a in &self.seat_assignments {
            let seat_count = *seat_counts
                .get(a.table_id.as_str())
                .ok_or_else(|| ImportError::UnknownTable(a.table_id.clone()))?;
            if a.seat_index >= seat_count {
                return Err(ImportError::SeatOutOfRange {
                    table_id: a.table_id.clone(),
                    seat_index: a.seat_index,
                    seat_count,
                });
            }
            if !people.contains(a.person_id.as_str()) {
                return Err(ImportError::UnknownPerson(a.person_id.clone()));
            }
            if !seats.insert((a.table_id.as_str(), a.seat_index)) {
                return Err(ImportError::SeatTaken {
                    table_id: a.table_id.clone(),
                    seat_index: a.seat_index,
                });
            }
            if !seated.insert(a.person_id.as_str()) {
                return Err(ImportError::PersonSeatedTwice(a.person_id.clone()));
            }
        }
        Ok(())
    }
}

/// File name for an export taken on `date`, e.g. `seating-map-2024-05-01.json`.
pub fn default_export_file_name(extension: &str, date: NaiveDate) -> String {
    format!("seating-map-{}.{}", date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableShape;
    use chrono::TimeZone;

    fn sample() -> Snapshot {
        let mut table = Table::new(TableShape::Round, 4, 1);
        table.id = "t1".into();
        Snapshot {
            tables: vec![table],
            stage: Stage::default(),
            people: vec![Person::new("p1", "Ada"), Person::new("p2", "Grace")],
            seat_assignments: vec![SeatAssignment::new("t1", 0, "p1")],
            exported_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["exportedAt", "people", "seatAssignments", "stage", "tables"]
        );
        assert_eq!(value["exportedAt"], "2024-05-01T12:00:00Z");
        assert_eq!(value["stage"]["id"], "stage");
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        let parsed = Snapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_project_is_deep_copy() {
        let snapshot = sample();
        let mut tables = snapshot.tables.clone();
        let copy = project(
            &tables,
            &snapshot.stage,
            &snapshot.people,
            &snapshot.seat_assignments,
            snapshot.exported_at,
        );
        tables[0].seat_count = 99;
        assert_eq!(copy.tables[0].seat_count, 4);
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_validate_unknown_table() {
        let mut snapshot = sample();
        snapshot.seat_assignments.push(SeatAssignment::new("gone", 0, "p2"));
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::UnknownTable("gone".into()))
        );
    }

    #[test]
    fn test_validate_seat_out_of_range() {
        let mut snapshot = sample();
        snapshot.seat_assignments.push(SeatAssignment::new("t1", 4, "p2"));
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::SeatOutOfRange { seat_index: 4, seat_count: 4, .. })
        ));
    }

    #[test]
    fn test_validate_seat_taken() {
        let mut snapshot = sample();
        snapshot.seat_assignments.push(SeatAssignment::new("t1", 0, "p2"));
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::SeatTaken { seat_index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_person_twice() {
        let mut snapshot = sample();
        snapshot.seat_assignments.push(SeatAssignment::new("t1", 1, "p1"));
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::PersonSeatedTwice("p1".into()))
        );
    }

    #[test]
    fn test_validate_unknown_person() {
        let mut snapshot = sample();
        snapshot.seat_assignments.push(SeatAssignment::new("t1", 1, "ghost"));
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::UnknownPerson("ghost".into()))
        );
    }

    #[test]
    fn test_validate_duplicate_table() {
        let mut snapshot = sample();
        let copy = snapshot.tables[0].clone();
        snapshot.tables.push(copy);
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::DuplicateTable("t1".into()))
        );
    }

    #[test]
    fn test_validate_duplicate_ordinal() {
        let mut snapshot = sample();
        let mut second = Table::new(TableShape::Round, 4, 1);
        second.id = "t2".into();
        snapshot.tables.push(second);
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::DuplicateOrdinal {
                ordinal: 1,
                first: "t1".into(),
                second: "t2".into(),
            })
        );
    }

    #[test]
    fn test_validate_missing_ordinals_allowed() {
        let mut snapshot = sample();
        snapshot.tables[0].ordinal = 0;
        for id in ["t2", "t3"] {
            let mut table = Table::new(TableShape::Round, 4, 0);
            table.id = id.into();
            snapshot.tables.push(table);
        }
        assert_eq!(snapshot.validate(), Ok(()));
    }

    #[test]
    fn test_validate_too_many_seats() {
        let mut snapshot = sample();
        let mut huge = Table::new(TableShape::Rectangular, 4, 2);
        huge.id = "t2".into();
        huge.seat_count = 3_000_000_000;
        snapshot.tables.push(huge);
        assert_eq!(
            snapshot.validate(),
            Err(ImportError::TooManySeats {
                table_id: "t2".into(),
                seat_count: 3_000_000_000,
            })
        );
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            default_export_file_name("json", date),
            "seating-map-2024-05-01.json"
        );
    }
}
