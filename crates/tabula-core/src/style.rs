//! Style resolution.
//!
//! Every visual property is resolved through an ordered override chain:
//! the most specific value that is set wins, otherwise a hard-coded default.

use crate::table::{Cell, TableSettings};
use crate::types::Color;

/// Canvas background when the table sets none.
pub const DEFAULT_BACKGROUND: Color = Color::WHITE;

/// Cell background when neither cell nor table sets one.
pub const DEFAULT_CELL_BACKGROUND: Color = Color::WHITE;

/// Border color when the table sets none.
pub const DEFAULT_EDGE_COLOR: Color = Color::BLACK;

/// Border thickness used when the table's is zero.
pub const DEFAULT_EDGE_THICKNESS: f64 = 1.0;

/// Return the first value set in `chain`, most specific first, or `default`.
pub fn resolve<T: Copy>(chain: &[Option<T>], default: T) -> T {
    chain.iter().flatten().copied().next().unwrap_or(default)
}

/// Cell background: cell override, then table default, then white.
pub fn cell_background(cell: &Cell, settings: &TableSettings) -> Color {
    resolve(
        &[cell.background, settings.cell_background],
        DEFAULT_CELL_BACKGROUND,
    )
}

/// Background of a top-level canvas.
pub fn canvas_background(settings: &TableSettings) -> Color {
    resolve(&[settings.table_background], DEFAULT_BACKGROUND)
}

pub fn edge_color(settings: &TableSettings) -> Color {
    resolve(&[settings.edge_color], DEFAULT_EDGE_COLOR)
}

pub fn edge_thickness(settings: &TableSettings) -> f64 {
    let configured = (settings.edge_thickness > 0).then_some(settings.edge_thickness as f64);
    resolve(&[configured], DEFAULT_EDGE_THICKNESS)
}
