//! Seat labels of the form `t<table>-s<seat>`.

use crate::table::Table;

/// A parsed seat label. `seat_index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLabel {
    pub ordinal: u32,
    pub seat_index: u32,
}

/// Label for seat `seat_index` (zero-based) at the table numbered `ordinal`.
pub fn seat_label(ordinal: u32, seat_index: u32) -> String {
    format!("t{}-s{}", ordinal, seat_index + 1)
}

/// Parse a label produced by [`seat_label`]. Case-insensitive.
pub fn parse_seat_label(label: &str) -> Option<SeatLabel> {
    let label = label.trim().to_ascii_lowercase();
    let (table, seat) = label.strip_prefix('t')?.split_once("-s")?;
    let ordinal: u32 = table.parse().ok()?;
    let seat_number: u32 = seat.parse().ok()?;
    if ordinal == 0 || seat_number == 0 {
        return None;
    }
    Some(SeatLabel {
        ordinal,
        seat_index: seat_number - 1,
    })
}

/// The table's name, or `Table <ordinal>` when it has none.
pub fn table_display_name(table: &Table, ordinal: u32) -> String {
    match table.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("Table {}", ordinal),
    }
}
