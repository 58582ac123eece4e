//! Table and stage definitions for the floor plan.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a table.
pub type TableId = String;

/// Default top-left corner for newly added tables.
pub const DEFAULT_TABLE_POSITION: Point = Point::new(200.0, 200.0);

/// Largest seat count a single table may have.
pub const MAX_SEAT_COUNT: u32 = 1000;

/// Table outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    /// Seats spread evenly around a circle.
    #[default]
    Round,
    /// Seats spread across the four sides.
    Rectangular,
}

impl TableShape {
    /// Cycle to the other shape.
    pub fn next(self) -> Self {
        match self {
            TableShape::Round => TableShape::Rectangular,
            TableShape::Rectangular => TableShape::Round,
        }
    }

    /// Width and height that leave room for `seat_count` seats.
    ///
    /// Round tables are square: `max(120, 15n)` on both axes. Rectangular
    /// tables grow `12n` wide (at least 160) and `8n` tall, clamped to
    /// `100..=120`.
    pub fn default_size(self, seat_count: u32) -> (f64, f64) {
        let n = f64::from(seat_count);
        match self {
            TableShape::Round => {
                let side = (n * 15.0).max(120.0);
                (side, side)
            }
            TableShape::Rectangular => {
                let width = (n * 12.0).max(160.0);
                let height = (n * 8.0).clamp(100.0, 120.0);
                (width, height)
            }
        }
    }
}

/// A table on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    /// Top-left corner position.
    #[serde(flatten)]
    pub position: Point,
    pub shape: TableShape,
    pub seat_count: u32,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display number used in seat labels, fixed when the table is created.
    /// Zero means unassigned (older documents).
    #[serde(default)]
    pub ordinal: u32,
}

impl Table {
    /// Create a table sized for its seat count at the default position.
    pub fn new(shape: TableShape, seat_count: u32, ordinal: u32) -> Self {
        let (width, height) = shape.default_size(seat_count);
        Self {
            id: format!("table-{}", Uuid::new_v4()),
            position: DEFAULT_TABLE_POSITION,
            shape,
            seat_count,
            width,
            height,
            name: None,
            ordinal,
        }
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the table outline as a kurbo Rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Center of the table, the origin for seat offsets.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Recompute width and height from shape and seat count.
    pub fn resize_for_seats(&mut self) {
        let (width, height) = self.shape.default_size(self.seat_count);
        self.width = width;
        self.height = height;
    }

    /// Merge a patch into this table. Returns the seat count before the patch.
    ///
    /// A patch that changes shape or seat count re-derives the dimensions
    /// unless it sets them explicitly.
    pub fn apply(&mut self, patch: TablePatch) -> u32 {
        let previous = self.seat_count;
        let reshaped = patch.shape.is_some_and(|s| s != self.shape)
            || patch.seat_count.is_some_and(|n| n != self.seat_count);

        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(seat_count) = patch.seat_count {
            self.seat_count = seat_count;
        }
        if reshaped {
            self.resize_for_seats();
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        previous
    }
}

/// Partial update for a table. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePatch {
    pub position: Option<Point>,
    pub shape: Option<TableShape>,
    pub seat_count: Option<u32>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// `Some(None)` clears the name.
    pub name: Option<Option<String>>,
}

impl TablePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn seat_count(seat_count: u32) -> Self {
        Self {
            seat_count: Some(seat_count),
            ..Self::default()
        }
    }

    pub fn shape(shape: TableShape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn name(name: Option<String>) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

/// The single stage on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    /// Top-left corner position.
    #[serde(flatten)]
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Stage {
    /// The fixed stage identifier.
    pub const ID: &'static str = "stage";

    /// Get the stage outline as a kurbo Rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Merge a patch into the stage.
    pub fn apply(&mut self, patch: StagePatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            id: Self::ID.to_string(),
            position: Point::new(400.0, 20.0),
            width: 250.0,
            height: 100.0,
        }
    }
}

/// Partial update for the stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagePatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_default_size() {
        assert_eq!(TableShape::Round.default_size(6), (120.0, 120.0));
        assert_eq!(TableShape::Round.default_size(10), (150.0, 150.0));
    }

    #[test]
    fn test_rectangular_default_size() {
        assert_eq!(TableShape::Rectangular.default_size(4), (160.0, 100.0));
        assert_eq!(TableShape::Rectangular.default_size(14), (168.0, 112.0));
        assert_eq!(TableShape::Rectangular.default_size(30), (360.0, 120.0));
    }

    #[test]
    fn test_new_table() {
        let table = Table::new(TableShape::Round, 8, 3);
        assert!(table.id.starts_with("table-"));
        assert_eq!(table.position, DEFAULT_TABLE_POSITION);
        assert_eq!(table.ordinal, 3);
        assert!((table.width - 120.0).abs() < f64::EPSILON);
        assert!(table.name.is_none());
    }

    #[test]
    fn test_center() {
        let mut table = Table::new(TableShape::Rectangular, 4, 1);
        table.position = Point::new(10.0, 20.0);
        assert_eq!(table.center(), Point::new(90.0, 70.0));
    }

    #[test]
    fn test_patch_seat_count_resizes() {
        let mut table = Table::new(TableShape::Round, 6, 1);
        let previous = table.apply(TablePatch::seat_count(12));
        assert_eq!(previous, 6);
        assert_eq!(table.seat_count, 12);
        assert!((table.width - 180.0).abs() < f64::EPSILON);
        assert!((table.height - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_explicit_size_wins() {
        let mut table = Table::new(TableShape::Round, 6, 1);
        table.apply(TablePatch {
            shape: Some(TableShape::Rectangular),
            width: Some(300.0),
            ..TablePatch::default()
        });
        assert_eq!(table.shape, TableShape::Rectangular);
        assert!((table.width - 300.0).abs() < f64::EPSILON);
        assert!((table.height - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_move_keeps_size() {
        let mut table = Table::new(TableShape::Round, 6, 1);
        table.width = 200.0;
        table.apply(TablePatch::position(Point::new(5.0, 5.0)));
        assert_eq!(table.position, Point::new(5.0, 5.0));
        assert!((table.width - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_json_shape() {
        let table = Table::new(TableShape::Rectangular, 4, 1).with_name("Head");
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["shape"], "rectangular");
        assert_eq!(value["seatCount"], 4);
        assert_eq!(value["x"], 200.0);
        assert_eq!(value["y"], 200.0);
        assert_eq!(value["name"], "Head");
    }

    #[test]
    fn test_table_without_ordinal_parses() {
        let json = r#"{"id":"t1","x":1,"y":2,"shape":"round","seatCount":6,"width":120,"height":120}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.ordinal, 0);
        assert_eq!(table.position, Point::new(1.0, 2.0));
        assert!(table.name.is_none());
    }

    #[test]
    fn test_stage_default() {
        let stage = Stage::default();
        assert_eq!(stage.id, "stage");
        assert_eq!(stage.bounds(), Rect::new(400.0, 20.0, 650.0, 120.0));
    }
}
