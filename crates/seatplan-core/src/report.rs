//! Guest list and occupancy reports.

use crate::assignment::AssignmentStore;
use crate::labels::{seat_label, table_display_name};
use crate::layout::LayoutModel;
use crate::person::{Person, Roster};
use crate::table::{TableId, TableShape};
use std::fmt;

/// A seated guest.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestEntry {
    pub label: String,
    pub seat_index: u32,
    pub person: Person,
}

/// Guests at one table, by seat index.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGuests {
    pub table_id: TableId,
    pub name: String,
    pub guests: Vec<GuestEntry>,
}

/// Seated guests grouped per table, followed by everyone without a seat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuestList {
    /// Tables with at least one guest, in display order.
    pub tables: Vec<TableGuests>,
    pub unassigned: Vec<Person>,
}

impl GuestList {
    pub fn build(layout: &LayoutModel, assignments: &AssignmentStore, roster: &Roster) -> Self {
        let tables = layout
            .tables()
            .iter()
            .filter_map(|table| {
                let guests: Vec<GuestEntry> = assignments
                    .assignments_for_table(&table.id)
                    .into_iter()
                    .filter_map(|a| {
                        let person = roster.get(&a.person_id)?;
                        Some(GuestEntry {
                            label: seat_label(table.ordinal, a.seat_index),
                            seat_index: a.seat_index,
                            person: person.clone(),
                        })
                    })
                    .collect();
                if guests.is_empty() {
                    return None;
                }
                Some(TableGuests {
                    table_id: table.id.clone(),
                    name: table_display_name(table, table.ordinal),
                    guests,
                })
            })
            .collect();

        let unassigned = assignments
            .unassigned_people(roster)
            .into_iter()
            .cloned()
            .collect();

        Self { tables, unassigned }
    }

    /// Number of seated guests.
    pub fn seated_count(&self) -> usize {
        self.tables.iter().map(|t| t.guests.len()).sum()
    }
}

fn describe(person: &Person) -> String {
    let mut line = person.name.clone();
    match (person.title.is_empty(), person.company.is_empty()) {
        (false, false) => line.push_str(&format!(" - {}, {}", person.title, person.company)),
        (false, true) => line.push_str(&format!(" - {}", person.title)),
        (true, false) => line.push_str(&format!(" - {}", person.company)),
        (true, true) => {}
    }
    line
}

impl fmt::Display for GuestList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Guest List")?;
        for table in &self.tables {
            writeln!(f)?;
            writeln!(f, "{}:", table.name)?;
            for guest in &table.guests {
                writeln!(f, "  {}: {}", guest.label, describe(&guest.person))?;
            }
        }
        if !self.unassigned.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unassigned Guests:")?;
            for person in &self.unassigned {
                writeln!(f, "  {}", describe(person))?;
            }
        }
        Ok(())
    }
}

/// Occupancy of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOccupancy {
    pub table_id: TableId,
    pub name: String,
    pub shape: TableShape,
    pub occupied: usize,
    pub seat_count: u32,
}

/// Seat totals across the plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanSummary {
    pub total_seats: u64,
    pub occupied_seats: u64,
    pub people: usize,
    pub tables: Vec<TableOccupancy>,
}

impl PlanSummary {
    pub fn build(layout: &LayoutModel, assignments: &AssignmentStore, roster: &Roster) -> Self {
        let tables: Vec<TableOccupancy> = layout
            .tables()
            .iter()
            .map(|table| TableOccupancy {
                table_id: table.id.clone(),
                name: table_display_name(table, table.ordinal),
                shape: table.shape,
                occupied: assignments.occupied_count(&table.id),
                seat_count: table.seat_count,
            })
            .collect();

        Self {
            total_seats: layout.total_seats(),
            occupied_seats: tables.iter().map(|t| t.occupied as u64).sum(),
            people: roster.len(),
            tables,
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Seats nobody sits in.
    pub fn free_seats(&self) -> u64 {
        self.total_seats.saturating_sub(self.occupied_seats)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} tables, {} seats, {} occupied, {} people",
            self.table_count(),
            self.total_seats,
            self.occupied_seats,
            self.people
        )?;
        for table in &self.tables {
            let marker = match table.shape {
                TableShape::Round => "●",
                TableShape::Rectangular => "■",
            };
            writeln!(
                f,
                "  {} {}: {}/{} occupied",
                marker, table.name, table.occupied, table.seat_count
            )?;
        }
        Ok(())
    }
}
