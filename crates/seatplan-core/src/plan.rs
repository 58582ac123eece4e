//! The seating plan: layout, roster and assignments owned together.

use crate::assignment::{AssignOutcome, AssignmentStore, SeatKey};
use crate::error::{SeatingError, SeatingResult};
use crate::export::{Snapshot, project};
use crate::geometry::seat_offset;
use crate::labels::{parse_seat_label, seat_label};
use crate::layout::LayoutModel;
use crate::person::{Person, PersonId, Roster};
use crate::report::{GuestList, PlanSummary};
use crate::table::{Stage, StagePatch, Table, TablePatch, TableShape};
use chrono::{DateTime, Utc};
use kurbo::{Point, Vec2};

/// Everything a renderer needs to draw one seat.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatView {
    pub seat_index: u32,
    pub label: String,
    /// Offset from the table center.
    pub offset: Vec2,
    /// Absolute canvas position.
    pub position: Point,
    pub person_id: Option<PersonId>,
}

/// A complete seating plan.
///
/// Every mutation runs to completion before returning and keeps these
/// invariants: a seat holds at most one person, a person holds at most one
/// seat, and every assignment points at an existing table and an in-range
/// seat. Deleting or shrinking a table drops the assignments it orphans.
#[derive(Debug, Clone, Default)]
pub struct SeatingPlan {
    layout: LayoutModel,
    assignments: AssignmentStore,
    roster: Roster,
}

impl SeatingPlan {
    /// Create an empty plan with the default stage and no people.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty plan for the given attendees.
    pub fn with_people(people: Vec<Person>) -> SeatingResult<Self> {
        Ok(Self {
            roster: Roster::from_people(people)?,
            ..Self::default()
        })
    }

    /// Load a validated snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> SeatingResult<Self> {
        if let Err(e) = snapshot.validate() {
            log::warn!("Rejected snapshot: {}", e);
            return Err(e.into());
        }
        let Snapshot {
            tables,
            stage,
            people,
            seat_assignments,
            ..
        } = snapshot;

        log::info!(
            "Loaded plan with {} tables, {} people, {} assignments",
            tables.len(),
            people.len(),
            seat_assignments.len()
        );
        Ok(Self {
            layout: LayoutModel::from_parts(tables, stage),
            assignments: seat_assignments.into_iter().collect(),
            roster: Roster::from_people(people)?,
        })
    }

    /// Parse and load an exported JSON document.
    pub fn from_json(json: &str) -> SeatingResult<Self> {
        Self::from_snapshot(Snapshot::from_json(json)?)
    }

    /// Snapshot of the plan taken at `exported_at`.
    pub fn snapshot_at(&self, exported_at: DateTime<Utc>) -> Snapshot {
        project(
            self.layout.tables(),
            self.layout.stage(),
            self.roster.as_slice(),
            &self.assignments.to_vec(),
            exported_at,
        )
    }

    /// Snapshot of the plan taken now.
    pub fn export(&self) -> Snapshot {
        let snapshot = self.snapshot_at(Utc::now());
        log::info!(
            "Exported plan with {} tables and {} assignments",
            snapshot.tables.len(),
            snapshot.seat_assignments.len()
        );
        snapshot
    }

    /// Drop all tables and assignments and restore the default stage.
    /// The roster is kept.
    pub fn reset(&mut self) {
        self.layout = LayoutModel::new();
        self.assignments.clear();
    }

    // --- Reads ---

    pub fn tables(&self) -> &[Table] {
        self.layout.tables()
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.layout.table(id)
    }

    pub fn stage(&self) -> &Stage {
        self.layout.stage()
    }

    pub fn people(&self) -> &[Person] {
        self.roster.as_slice()
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.roster.get(id)
    }

    pub fn layout(&self) -> &LayoutModel {
        &self.layout
    }

    pub fn assignments(&self) -> &AssignmentStore {
        &self.assignments
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Id of the person sitting at a seat.
    pub fn query(&self, table_id: &str, seat_index: u32) -> Option<&PersonId> {
        self.assignments.query(table_id, seat_index)
    }

    /// The person sitting at a seat.
    pub fn person_at(&self, table_id: &str, seat_index: u32) -> Option<&Person> {
        self.query(table_id, seat_index)
            .and_then(|id| self.roster.get(id))
    }

    /// People without a seat, in roster order.
    pub fn unassigned_people(&self) -> Vec<&Person> {
        self.assignments.unassigned_people(&self.roster)
    }

    /// Label of a seat, using the table's stored ordinal.
    pub fn seat_label(&self, table_id: &str, seat_index: u32) -> SeatingResult<String> {
        let table = self.checked_seat(table_id, seat_index)?;
        Ok(seat_label(table.ordinal, seat_index))
    }

    /// Resolve a label such as `t2-s5` to a seat.
    pub fn find_seat(&self, label: &str) -> Option<SeatKey> {
        let parsed = parse_seat_label(label)?;
        let table = self.layout.table_by_ordinal(parsed.ordinal)?;
        (parsed.seat_index < table.seat_count).then(|| SeatKey::new(table.id.clone(), parsed.seat_index))
    }

    /// Every seat of a table with its label, placement and occupant.
    pub fn seats(&self, table_id: &str) -> SeatingResult<Vec<SeatView>> {
        let table = self.checked_table(table_id)?;
        let center = table.center();
        Ok((0..table.seat_count)
            .map(|i| {
                let offset = seat_offset(table.shape, table.width, table.height, i, table.seat_count);
                SeatView {
                    seat_index: i,
                    label: seat_label(table.ordinal, i),
                    offset,
                    position: center + offset,
                    person_id: self.query(table_id, i).cloned(),
                }
            })
            .collect())
    }

    /// People who may be put in a seat: everyone unseated plus its current
    /// occupant, filtered by a search term.
    pub fn candidates_for_seat(
        &self,
        table_id: &str,
        seat_index: u32,
        term: &str,
    ) -> SeatingResult<Vec<&Person>> {
        self.checked_seat(table_id, seat_index)?;
        let occupant = self.query(table_id, seat_index);
        Ok(self
            .roster
            .search(term)
            .into_iter()
            .filter(|p| !self.assignments.is_assigned(&p.id) || occupant == Some(&p.id))
            .collect())
    }

    pub fn guest_list(&self) -> GuestList {
        GuestList::build(&self.layout, &self.assignments, &self.roster)
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::build(&self.layout, &self.assignments, &self.roster)
    }

    // --- Writes ---

    /// Add a table sized for `seat_count` seats.
    pub fn add_table(&mut self, shape: TableShape, seat_count: u32) -> SeatingResult<&Table> {
        self.layout.add_table(shape, seat_count)
    }

    /// Merge a patch into a table, dropping assignments at removed seats.
    pub fn update_table(&mut self, id: &str, patch: TablePatch) -> SeatingResult<()> {
        let update = self.layout.update_table(id, patch)?;
        if update.shrank() {
            let dropped = self
                .assignments
                .on_seat_count_reduced(id, update.seat_count);
            if dropped > 0 {
                log::info!(
                    "Table {} shrank to {} seats, dropped {} assignments",
                    id,
                    update.seat_count,
                    dropped
                );
            }
        }
        Ok(())
    }

    /// Remove a table and every assignment at it.
    pub fn delete_table(&mut self, id: &str) -> SeatingResult<Table> {
        let table = self.layout.delete_table(id)?;
        let dropped = self.assignments.on_table_deleted(id);
        if dropped > 0 {
            log::info!("Deleted table {}, dropped {} assignments", id, dropped);
        }
        Ok(table)
    }

    pub fn update_stage(&mut self, patch: StagePatch) {
        self.layout.update_stage(patch);
    }

    /// Seat a person, moving them from any other seat and unseating whoever
    /// sat there.
    pub fn assign(
        &mut self,
        table_id: &str,
        seat_index: u32,
        person_id: &str,
    ) -> SeatingResult<AssignOutcome> {
        self.checked_seat(table_id, seat_index)?;
        if !self.roster.contains(person_id) {
            return Err(SeatingError::PersonNotFound(person_id.to_string()));
        }
        let outcome = self.assignments.assign(table_id, seat_index, person_id);
        log::debug!(
            "Assigned {} to seat {} of {} ({:?})",
            person_id,
            seat_index,
            table_id,
            outcome
        );
        Ok(outcome)
    }

    /// Free a seat. Freeing an empty seat is a no-op.
    pub fn unassign(&mut self, table_id: &str, seat_index: u32) -> SeatingResult<Option<PersonId>> {
        self.checked_seat(table_id, seat_index)?;
        let person = self.assignments.unassign(table_id, seat_index);
        if let Some(person) = &person {
            log::debug!("Unassigned {} from seat {} of {}", person, seat_index, table_id);
        }
        Ok(person)
    }

    /// Remove a person from their seat, if they have one.
    pub fn unassign_person(&mut self, person_id: &str) -> Option<SeatKey> {
        let seat = self.assignments.unassign_person(person_id);
        if let Some(seat) = &seat {
            log::debug!("Unassigned {} from seat {} of {}", person_id, seat.seat_index, seat.table_id);
        }
        seat
    }

    fn checked_table(&self, table_id: &str) -> SeatingResult<&Table> {
        self.layout
            .table(table_id)
            .ok_or_else(|| SeatingError::TableNotFound(table_id.to_string()))
    }

    fn checked_seat(&self, table_id: &str, seat_index: u32) -> SeatingResult<&Table> {
        let table = self.checked_table(table_id)?;
        if seat_index >= table.seat_count {
            return Err(SeatingError::SeatOutOfRange {
                table_id: table_id.to_string(),
                seat_index,
                seat_count: table.seat_count,
            });
        }
        Ok(table)
    }
}
