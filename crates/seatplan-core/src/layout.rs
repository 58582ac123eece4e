//! Table and stage placement.
//!
//! The layout owns geometry only. Callers that also hold assignments use
//! [`crate::plan::SeatingPlan`], which cascades deletions and shrinks.

use crate::error::{SeatingError, SeatingResult};
use crate::table::{MAX_SEAT_COUNT, Stage, StagePatch, Table, TablePatch, TableShape};

/// Seat counts before and after a table update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableUpdate {
    pub previous_seat_count: u32,
    pub seat_count: u32,
}

impl TableUpdate {
    /// True when the update removed seats.
    pub fn shrank(&self) -> bool {
        self.seat_count < self.previous_seat_count
    }
}

/// Tables in display order plus the stage.
#[derive(Debug, Clone)]
pub struct LayoutModel {
    tables: Vec<Table>,
    stage: Stage,
    next_ordinal: u32,
}

impl Default for LayoutModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutModel {
    /// Create an empty layout with the default stage.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            stage: Stage::default(),
            next_ordinal: 1,
        }
    }

    /// Rebuild a layout from loaded tables.
    ///
    /// Tables without an ordinal are numbered by position, after any
    /// ordinal already in use.
    pub fn from_parts(mut tables: Vec<Table>, stage: Stage) -> Self {
        let mut next_ordinal = tables.iter().map(|t| t.ordinal).max().unwrap_or(0) + 1;
        let all_missing = tables.iter().all(|t| t.ordinal == 0);
        for (i, table) in tables.iter_mut().enumerate() {
            if table.ordinal == 0 {
                if all_missing {
                    table.ordinal = i as u32 + 1;
                } else {
                    table.ordinal = next_ordinal;
                    next_ordinal += 1;
                }
            }
        }
        if all_missing {
            next_ordinal = tables.len() as u32 + 1;
        }
        Self {
            tables,
            stage,
            next_ordinal,
        }
    }

    /// Add a table sized for `seat_count` seats.
    ///
    /// The table is named `Table N` where N is the new table count.
    pub fn add_table(&mut self, shape: TableShape, seat_count: u32) -> SeatingResult<&Table> {
        if seat_count == 0 || seat_count > MAX_SEAT_COUNT {
            return Err(SeatingError::InvalidSeatCount);
        }
        let name = format!("Table {}", self.tables.len() + 1);
        let table = Table::new(shape, seat_count, self.next_ordinal).with_name(name);
        self.next_ordinal += 1;

        log::debug!(
            "Added {:?} table {} with {} seats",
            table.shape,
            table.id,
            table.seat_count
        );
        self.tables.push(table);
        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Merge a patch into a table.
    pub fn update_table(&mut self, id: &str, patch: TablePatch) -> SeatingResult<TableUpdate> {
        if patch.seat_count.is_some_and(|n| n == 0 || n > MAX_SEAT_COUNT) {
            return Err(SeatingError::InvalidSeatCount);
        }
        let table = self
            .table_mut(id)
            .ok_or_else(|| SeatingError::TableNotFound(id.to_string()))?;
        let previous_seat_count = table.apply(patch);
        log::debug!("Updated table {}", id);

        Ok(TableUpdate {
            previous_seat_count,
            seat_count: table.seat_count,
        })
    }

    /// Remove a table.
    pub fn delete_table(&mut self, id: &str) -> SeatingResult<Table> {
        let pos = self
            .tables
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SeatingError::TableNotFound(id.to_string()))?;
        log::debug!("Deleted table {}", id);
        Ok(self.tables.remove(pos))
    }

    /// Merge a patch into the stage.
    pub fn update_stage(&mut self, patch: StagePatch) {
        self.stage.apply(patch);
    }

    /// Tables in display order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// Table carrying a given display ordinal.
    pub fn table_by_ordinal(&self, ordinal: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.ordinal == ordinal)
    }

    /// 1-based position of a table in display order.
    ///
    /// Unlike [`Table::ordinal`] this changes when earlier tables are deleted.
    pub fn position_of(&self, id: &str) -> Option<u32> {
        self.tables
            .iter()
            .position(|t| t.id == id)
            .map(|i| i as u32 + 1)
    }

    /// Total seats over all tables.
    pub fn total_seats(&self) -> u64 {
        self.tables.iter().map(|t| u64::from(t.seat_count)).sum()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
