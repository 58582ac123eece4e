//! Seatplan Core Library
//!
//! Platform-agnostic seating geometry and assignment engine for event floor plans.

pub mod assignment;
pub mod error;
pub mod export;
pub mod geometry;
pub mod labels;
pub mod layout;
pub mod person;
pub mod plan;
pub mod report;
pub mod table;

pub use assignment::{AssignOutcome, AssignmentStore, SeatAssignment, SeatKey};
pub use error::{ImportError, SeatingError, SeatingResult};
pub use export::{Snapshot, default_export_file_name, project};
pub use geometry::{Side, SideQuotas, seat_offset, seat_offsets, seat_position, side_quotas};
pub use labels::{SeatLabel, parse_seat_label, seat_label, table_display_name};
pub use layout::{LayoutModel, TableUpdate};
pub use person::{Person, PersonId, Roster};
pub use plan::{SeatView, SeatingPlan};
pub use report::{GuestEntry, GuestList, PlanSummary, TableGuests, TableOccupancy};
pub use table::{MAX_SEAT_COUNT, Stage, StagePatch, Table, TableId, TablePatch, TableShape};
