//! Seat placement around tables.
//!
//! All offsets are relative to the table center, in canvas units with y
//! pointing down. Callers must pass `seat_count >= 1`, `seat_index <
//! seat_count` and dimensions large enough for the clearances below; the
//! functions here do not clamp degenerate sizes.

use crate::table::{Table, TableShape};
use kurbo::{Point, Vec2};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Distance between the rim of a round table and its seat circle.
pub const ROUND_SEAT_INSET: f64 = 20.0;

/// Space kept free at each end of a rectangular side.
pub const CORNER_CLEARANCE: f64 = 40.0;

/// Distance seats sit outside the edge of a rectangular table.
pub const SEAT_CLEARANCE: f64 = 20.0;

/// A side of a rectangular table, in fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Number of seats placed on each side of a rectangular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideQuotas {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl SideQuotas {
    /// Total seats across all sides.
    pub fn total(&self) -> u32 {
        self.top + self.right + self.bottom + self.left
    }

    /// Seats on the given side.
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Find the side a global seat index falls on.
    ///
    /// Returns the side and the index within that side.
    pub fn locate(&self, seat_index: u32) -> (Side, u32) {
        let mut first = 0;
        for side in [Side::Top, Side::Right, Side::Bottom] {
            let count = self.get(side);
            if seat_index < first + count {
                return (side, seat_index - first);
            }
            first += count;
        }
        (Side::Left, seat_index - first)
    }
}

/// Split `seat_count` seats across the four sides of a `width` x `height`
/// rectangle.
///
/// Each side asks for `ceil(n * usable / usable_perimeter)` seats, where a
/// side's usable length is its length minus [`CORNER_CLEARANCE`]. Sides are
/// filled top, right, bottom in that order, each capped by what is left, and
/// the left side takes the remainder. The counts always sum to `seat_count`.
pub fn side_quotas(seat_count: u32, width: f64, height: f64) -> SideQuotas {
    let n = f64::from(seat_count);
    let perimeter = 2.0 * (width + height) - 4.0 * CORNER_CLEARANCE;
    let horizontal = (n * (width - CORNER_CLEARANCE) / perimeter).ceil() as u32;
    let vertical = (n * (height - CORNER_CLEARANCE) / perimeter).ceil() as u32;

    let top = horizontal.min(seat_count);
    let right = vertical.min(seat_count - top);
    let bottom = horizontal.min(seat_count - top - right);
    let left = seat_count - top - right - bottom;

    SideQuotas {
        top,
        right,
        bottom,
        left,
    }
}

/// Offset of seat `seat_index` from the table center.
pub fn seat_offset(
    shape: TableShape,
    width: f64,
    height: f64,
    seat_index: u32,
    seat_count: u32,
) -> Vec2 {
    debug_assert!(seat_count >= 1, "table must have at least one seat");
    debug_assert!(seat_index < seat_count, "seat index out of range");

    match shape {
        TableShape::Round => round_offset(width, height, seat_index, seat_count),
        TableShape::Rectangular => rectangular_offset(width, height, seat_index, seat_count),
    }
}

/// Offsets for every seat of a table, in seat index order.
pub fn seat_offsets(table: &Table) -> Vec<Vec2> {
    (0..table.seat_count)
        .map(|i| seat_offset(table.shape, table.width, table.height, i, table.seat_count))
        .collect()
}

/// Absolute canvas position of a seat.
pub fn seat_position(table: &Table, seat_index: u32) -> Point {
    table.center()
        + seat_offset(
            table.shape,
            table.width,
            table.height,
            seat_index,
            table.seat_count,
        )
}

/// Seats at equal angles on a circle, starting at the top and going clockwise.
fn round_offset(width: f64, height: f64, seat_index: u32, seat_count: u32) -> Vec2 {
    let radius = width.min(height) / 2.0 - ROUND_SEAT_INSET;
    let angle = f64::from(seat_index) * TAU / f64::from(seat_count) - FRAC_PI_2;
    Vec2::from_angle(angle) * radius
}

/// Seats walked clockwise around the rectangle, evenly spaced per side.
fn rectangular_offset(width: f64, height: f64, seat_index: u32, seat_count: u32) -> Vec2 {
    let quotas = side_quotas(seat_count, width, height);
    let (side, local) = quotas.locate(seat_index);
    let count = quotas.get(side);

    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let span_x = width - 2.0 * CORNER_CLEARANCE;
    let span_y = height - 2.0 * CORNER_CLEARANCE;

    match side {
        Side::Top => Vec2::new(
            along(-half_w + CORNER_CLEARANCE, span_x, local, count),
            -half_h - SEAT_CLEARANCE,
        ),
        Side::Right => Vec2::new(
            half_w + SEAT_CLEARANCE,
            along(-half_h + CORNER_CLEARANCE, span_y, local, count),
        ),
        Side::Bottom => Vec2::new(
            along(half_w - CORNER_CLEARANCE, -span_x, local, count),
            half_h + SEAT_CLEARANCE,
        ),
        Side::Left => Vec2::new(
            -half_w - SEAT_CLEARANCE,
            along(half_h - CORNER_CLEARANCE, -span_y, local, count),
        ),
    }
}

/// Position of seat `local` of `count` along a side starting at `start`.
/// A lone seat sits at the midpoint.
fn along(start: f64, span: f64, local: u32, count: u32) -> f64 {
    if count <= 1 {
        start + span / 2.0
    } else {
        start + span * f64::from(local) / f64::from(count - 1)
    }
}
