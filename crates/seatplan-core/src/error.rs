//! Error types for the seating engine.

use thiserror::Error;

/// Caller errors raised by plan operations.
///
/// Seat conflicts are never errors: assigning an occupied seat or an already
/// seated person silently reassigns.
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Seat {seat_index} is out of range for table {table_id} ({seat_count} seats)")]
    SeatOutOfRange {
        table_id: String,
        seat_index: u32,
        seat_count: u32,
    },

    #[error("Seat count must be between 1 and {}", crate::table::MAX_SEAT_COUNT)]
    InvalidSeatCount,

    #[error("Duplicate person id in roster: {0}")]
    DuplicatePerson(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Referential integrity violations found while importing a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Duplicate table id: {0}")]
    DuplicateTable(String),

    #[error("Table {0} has no seats")]
    EmptyTable(String),

    #[error("Table {table_id} has {seat_count} seats, more than the limit of {}", crate::table::MAX_SEAT_COUNT)]
    TooManySeats { table_id: String, seat_count: u32 },

    #[error("Tables {first} and {second} share ordinal {ordinal}")]
    DuplicateOrdinal {
        ordinal: u32,
        first: String,
        second: String,
    },

    #[error("Duplicate person id: {0}")]
    DuplicatePerson(String),

    #[error("Stage id must be \"stage\", found {0:?}")]
    InvalidStage(String),

    #[error("Assignment references unknown table {0}")]
    UnknownTable(String),

    #[error("Assignment references unknown person {0}")]
    UnknownPerson(String),

    #[error("Seat {seat_index} is out of range for table {table_id} ({seat_count} seats)")]
    SeatOutOfRange {
        table_id: String,
        seat_index: u32,
        seat_count: u32,
    },

    #[error("Seat {seat_index} of table {table_id} is assigned more than once")]
    SeatTaken { table_id: String, seat_index: u32 },

    #[error("Person {0} is assigned to more than one seat")]
    PersonSeatedTwice(String),
}

/// Result type for plan operations.
pub type SeatingResult<T> = Result<T, SeatingError>;
