//! Subcommand bodies. Each returns the text to print.

use seatplan_core::{SeatingPlan, table_display_name};
use std::fmt::Write;
use std::path::Path;

/// Read and validate a plan file.
pub fn load(path: &Path) -> Result<SeatingPlan, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    SeatingPlan::from_json(&json).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn validate(path: &Path) -> Result<String, String> {
    let plan = load(path)?;
    Ok(format!(
        "{}: ok ({} tables, {} people, {} assignments)\n",
        path.display(),
        plan.tables().len(),
        plan.people().len(),
        plan.assignments().len()
    ))
}

pub fn guests(path: &Path) -> Result<String, String> {
    Ok(load(path)?.guest_list().to_string())
}

pub fn summary(path: &Path) -> Result<String, String> {
    Ok(load(path)?.summary().to_string())
}

pub fn seats(path: &Path, only: Option<u32>) -> Result<String, String> {
    let plan = load(path)?;
    if let Some(ordinal) = only {
        if plan.layout().table_by_ordinal(ordinal).is_none() {
            return Err(format!("No table numbered {}", ordinal));
        }
    }
    seat_report(&plan, only).map_err(|e| e.to_string())
}

/// Every seat with its label, absolute position and occupant, grouped by
/// table. `only` restricts the report to one table ordinal.
pub fn seat_report(plan: &SeatingPlan, only: Option<u32>) -> seatplan_core::SeatingResult<String> {
    let mut out = String::new();
    for table in plan.tables() {
        if only.is_some_and(|ordinal| ordinal != table.ordinal) {
            continue;
        }
        let _ = writeln!(
            out,
            "{} ({:?}, {} seats)",
            table_display_name(table, table.ordinal),
            table.shape,
            table.seat_count
        );
        for seat in plan.seats(&table.id)? {
            let occupant = seat
                .person_id
                .as_deref()
                .and_then(|id| plan.person(id))
                .map_or("-", |p| p.name.as_str());
            let _ = writeln!(
                out,
                "  {:<8} ({:>7.1}, {:>7.1})  {}",
                seat.label, seat.position.x, seat.position.y, occupant
            );
        }
    }
    Ok(out)
}
