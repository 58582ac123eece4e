//! Seat to person assignments.
//!
//! The store keeps two indexes over the same relation so that a seat holds at
//! most one person and a person holds at most one seat. Tables and people are
//! referenced by id only.

use crate::person::{Person, PersonId, Roster};
use crate::table::TableId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Address of a single seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatKey {
    pub table_id: TableId,
    pub seat_index: u32,
}

impl SeatKey {
    pub fn new(table_id: impl Into<TableId>, seat_index: u32) -> Self {
        Self {
            table_id: table_id.into(),
            seat_index,
        }
    }
}

/// One person sitting in one seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub table_id: TableId,
    pub seat_index: u32,
    pub person_id: PersonId,
}

impl SeatAssignment {
    pub fn new(table_id: impl Into<TableId>, seat_index: u32, person_id: impl Into<PersonId>) -> Self {
        Self {
            table_id: table_id.into(),
            seat_index,
            person_id: person_id.into(),
        }
    }

    pub fn seat(&self) -> SeatKey {
        SeatKey::new(self.table_id.clone(), self.seat_index)
    }
}

/// What an assignment moved out of the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignOutcome {
    /// Previous occupant of the target seat.
    pub displaced: Option<PersonId>,
    /// Seat the person sat in before.
    pub vacated: Option<SeatKey>,
}

impl AssignOutcome {
    /// True when nothing else changed besides the new record.
    pub fn is_clean(&self) -> bool {
        self.displaced.is_none() && self.vacated.is_none()
    }
}

/// The seat and person relation.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    by_seat: BTreeMap<SeatKey, PersonId>,
    by_person: HashMap<PersonId, SeatKey>,
}

impl AssignmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat `person_id` at `(table_id, seat_index)`.
    ///
    /// Whoever sat there is unseated and the person leaves any other seat.
    /// Last writer wins; nothing here is an error.
    pub fn assign(&mut self, table_id: &str, seat_index: u32, person_id: &str) -> AssignOutcome {
        let key = SeatKey::new(table_id, seat_index);

        let displaced = self.by_seat.remove(&key);
        if let Some(previous) = &displaced {
            self.by_person.remove(previous);
        }
        let vacated = self.by_person.remove(person_id);
        if let Some(old_seat) = &vacated {
            self.by_seat.remove(old_seat);
        }

        self.by_seat.insert(key.clone(), person_id.to_string());
        self.by_person.insert(person_id.to_string(), key);

        AssignOutcome {
            displaced: displaced.filter(|p| p != person_id),
            vacated,
        }
    }

    /// Free a seat. Returns the person who sat there, if any.
    pub fn unassign(&mut self, table_id: &str, seat_index: u32) -> Option<PersonId> {
        let person = self.by_seat.remove(&SeatKey::new(table_id, seat_index))?;
        self.by_person.remove(&person);
        Some(person)
    }

    /// Remove a person from whatever seat they hold.
    pub fn unassign_person(&mut self, person_id: &str) -> Option<SeatKey> {
        let seat = self.by_person.remove(person_id)?;
        self.by_seat.remove(&seat);
        Some(seat)
    }

    /// Drop every assignment at a deleted table. Returns how many were removed.
    pub fn on_table_deleted(&mut self, table_id: &str) -> usize {
        self.retain(|key| key.table_id != table_id)
    }

    /// Drop assignments at seats a shrunken table no longer has.
    pub fn on_seat_count_reduced(&mut self, table_id: &str, new_count: u32) -> usize {
        self.retain(|key| key.table_id != table_id || key.seat_index < new_count)
    }

    fn retain(&mut self, mut keep: impl FnMut(&SeatKey) -> bool) -> usize {
        let before = self.by_seat.len();
        let by_person = &mut self.by_person;
        self.by_seat.retain(|key, person| {
            let kept = keep(key);
            if !kept {
                by_person.remove(person);
            }
            kept
        });
        before - self.by_seat.len()
    }

    /// Who sits at a seat.
    pub fn query(&self, table_id: &str, seat_index: u32) -> Option<&PersonId> {
        self.by_seat.get(&SeatKey::new(table_id, seat_index))
    }

    /// Where a person sits.
    pub fn seat_of(&self, person_id: &str) -> Option<&SeatKey> {
        self.by_person.get(person_id)
    }

    pub fn is_assigned(&self, person_id: &str) -> bool {
        self.by_person.contains_key(person_id)
    }

    /// Roster members without a seat, in roster order.
    pub fn unassigned_people<'a>(&'a self, roster: &'a Roster) -> Vec<&'a Person> {
        roster.iter().filter(|p| !self.is_assigned(&p.id)).collect()
    }

    /// Assignments at one table, by seat index.
    pub fn assignments_for_table(&self, table_id: &str) -> Vec<SeatAssignment> {
        self.iter().filter(|a| a.table_id == table_id).collect()
    }

    /// Number of occupied seats at a table.
    pub fn occupied_count(&self, table_id: &str) -> usize {
        self.by_seat.keys().filter(|k| k.table_id == table_id).count()
    }

    /// All assignments, ordered by table id then seat index.
    pub fn iter(&self) -> impl Iterator<Item = SeatAssignment> + '_ {
        self.by_seat.iter().map(|(key, person)| SeatAssignment {
            table_id: key.table_id.clone(),
            seat_index: key.seat_index,
            person_id: person.clone(),
        })
    }

    pub fn to_vec(&self) -> Vec<SeatAssignment> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.by_seat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seat.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_seat.clear();
        self.by_person.clear();
    }
}

impl FromIterator<SeatAssignment> for AssignmentStore {
    /// Replays records through [`AssignmentStore::assign`], so later records
    /// win over earlier ones.
    fn from_iter<I: IntoIterator<Item = SeatAssignment>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.assign(&record.table_id, record.seat_index, &record.person_id);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_assign_and_query() {
        let mut store = AssignmentStore::new();
        let outcome = store.assign("t1", 0, "p1");
        assert!(outcome.is_clean());
        assert_eq!(store.query("t1", 0).map(String::as_str), Some("p1"));
        assert!(store.query("t1", 1).is_none());
    }

    #[test]
    fn test_reassign_person_moves_them() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "p1");
        let outcome = store.assign("t1", 1, "p1");

        assert_eq!(outcome.vacated, Some(SeatKey::new("t1", 0)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.to_vec(), vec![SeatAssignment::new("t1", 1, "p1")]);
    }

    #[test]
    fn test_taking_occupied_seat_unseats_occupant() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "p1");
        let outcome = store.assign("t1", 0, "p2");

        assert_eq!(outcome.displaced.as_deref(), Some("p1"));
        assert_eq!(store.query("t1", 0).map(String::as_str), Some("p2"));
        assert!(store.seat_of("p1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_seat_again_is_clean() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 2, "p1");
        let outcome = store.assign("t1", 2, "p1");
        assert!(outcome.is_clean());
        assert_eq!(store.len(), 1);
        assert_eq!(store.seat_of("p1"), Some(&SeatKey::new("t1", 2)));
    }

    #[test]
    fn test_unassign() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "p1");
        assert_eq!(store.unassign("t1", 0).as_deref(), Some("p1"));
        assert!(store.unassign("t1", 0).is_none());
        assert!(!store.is_assigned("p1"));
    }

    #[test]
    fn test_unassign_person() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 3, "p1");
        assert_eq!(store.unassign_person("p1"), Some(SeatKey::new("t1", 3)));
        assert!(store.query("t1", 3).is_none());
        assert!(store.unassign_person("p1").is_none());
    }

    #[test]
    fn test_table_deleted_cascade() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "p1");
        store.assign("t1", 1, "p2");
        store.assign("t1", 2, "p3");
        store.assign("t2", 0, "p4");

        assert_eq!(store.on_table_deleted("t1"), 3);
        assert_eq!(store.len(), 1);
        assert!(!store.is_assigned("p1"));
        assert!(store.is_assigned("p4"));
    }

    #[test]
    fn test_seat_count_reduced_cascade() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "p0");
        store.assign("t1", 3, "p3");
        store.assign("t1", 7, "p7");
        store.assign("t2", 7, "other");

        assert_eq!(store.on_seat_count_reduced("t1", 4), 1);
        assert!(store.query("t1", 7).is_none());
        assert!(!store.is_assigned("p7"));
        assert!(store.query("t1", 0).is_some());
        assert!(store.query("t1", 3).is_some());
        assert!(store.query("t2", 7).is_some());
    }

    #[test]
    fn test_unassigned_people_keeps_roster_order() {
        let roster = Roster::from_people(vec![
            Person::new("a", "A"),
            Person::new("b", "B"),
            Person::new("c", "C"),
        ])
        .unwrap();
        let mut store = AssignmentStore::new();
        store.assign("t1", 0, "b");

        let ids: Vec<_> = store
            .unassigned_people(&roster)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_uniqueness_under_random_sequence() {
        // Deterministic pseudo-random sequence of assignments.
        let mut store = AssignmentStore::new();
        let mut x: u32 = 12345;
        for _ in 0..500 {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let table = format!("t{}", (x >> 8) % 3);
            let seat = (x >> 12) % 5;
            let person = format!("p{}", (x >> 16) % 12);
            store.assign(&table, seat, &person);

            let records = store.to_vec();
            let seats: HashSet<_> = records.iter().map(SeatAssignment::seat).collect();
            let people: HashSet<_> = records.iter().map(|a| a.person_id.clone()).collect();
            assert_eq!(seats.len(), records.len());
            assert_eq!(people.len(), records.len());
        }
    }

    #[test]
    fn test_from_iter_last_wins() {
        let store: AssignmentStore = vec![
            SeatAssignment::new("t1", 0, "p1"),
            SeatAssignment::new("t1", 1, "p1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.to_vec(), vec![SeatAssignment::new("t1", 1, "p1")]);
    }

    #[test]
    fn test_assignments_for_table_sorted() {
        let mut store = AssignmentStore::new();
        store.assign("t1", 4, "a");
        store.assign("t1", 1, "b");
        store.assign("t2", 0, "c");
        let seats: Vec<_> = store
            .assignments_for_table("t1")
            .into_iter()
            .map(|a| a.seat_index)
            .collect();
        assert_eq!(seats, vec![1, 4]);
        assert_eq!(store.occupied_count("t1"), 2);
    }

    #[test]
    fn test_assignment_json() {
        let value = serde_json::to_value(SeatAssignment::new("t1", 2, "p1")).unwrap();
        assert_eq!(value["tableId"], "t1");
        assert_eq!(value["seatIndex"], 2);
        assert_eq!(value["personId"], "p1");
    }
}
