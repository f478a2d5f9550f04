//! Geometry assignment: track sizes to absolute cell rectangles.

use tracing::debug;

use crate::bounds::{Bounds, Size};
use crate::grid::{GridCellInfo, LayoutGrid};

/// Position of each track boundary, starting at `start`.
///
/// There is one more position than there are tracks; the last one is the
/// far edge of the final track.
fn calculate_positions(sizes: &[f64], start: f64) -> Vec<f64> {
    let mut positions = Vec::with_capacity(sizes.len() + 1);
    let mut current = start;
    positions.push(current);
    for size in sizes {
        current += size;
        positions.push(current);
    }
    positions
}

/// Compute every cell's rectangle and the canvas size from the grid's
/// resolved track sizes.
///
/// Cells are emitted in row-major order of their top-left slot. An empty
/// grid gets a margin-only canvas and no cells. Canvas sides are never
/// smaller than 1.
pub fn assign_geometry(grid: &mut LayoutGrid, margin: f64) {
    if grid.is_empty() {
        let side = (2.0 * margin).max(1.0);
        debug!(margin, "empty grid; margin-only canvas");
        grid.set_geometry(Vec::new(), Size::new(side, side));
        return;
    }

    let xs = calculate_positions(grid.column_widths(), margin);
    let ys = calculate_positions(grid.row_heights(), margin);
    let edge = |offsets: &[f64], index: usize| offsets[index.min(offsets.len() - 1)];

    let cells: Vec<GridCellInfo> = grid
        .placements()
        .iter()
        .map(|p| {
            let x = edge(&xs, p.col);
            let y = edge(&ys, p.row);
            let bounds = Bounds::new(
                x,
                y,
                edge(&xs, p.col + p.col_span) - x,
                edge(&ys, p.row + p.row_span) - y,
            );
            GridCellInfo {
                handle: p.handle,
                bounds,
                grid_row: p.row,
                grid_col: p.col,
                row_span: p.row_span,
                col_span: p.col_span,
            }
        })
        .collect();

    let track_width: f64 = grid.column_widths().iter().sum();
    let track_height: f64 = grid.row_heights().iter().sum();
    let canvas = Size::new(
        (track_width + 2.0 * margin).max(1.0),
        (track_height + 2.0 * margin).max(1.0),
    );

    grid.set_geometry(cells, canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::place_cells;
    use tabula_core::{Cell, Table};

    #[test]
    fn test_empty_grid_canvas() {
        let mut grid = place_cells(&Table::new("t"));
        assign_geometry(&mut grid, 15.0);
        assert!(grid.cells().is_empty());
        assert_eq!(grid.canvas_size(), Size::new(30.0, 30.0));

        assign_geometry(&mut grid, 0.0);
        assert_eq!(grid.canvas_size(), Size::new(1.0, 1.0));
    }

    #[test]
    fn test_positions_follow_track_sizes() {
        let table = Table::new("t")
            .with_row(vec![Cell::text("A").with_colspan(2), Cell::text("B")])
            .with_row(vec![Cell::text("C"), Cell::text("D"), Cell::text("E")]);
        let mut grid = place_cells(&table);
        grid.set_track_sizes(vec![10.0, 20.0, 30.0], vec![5.0, 7.0]);
        assign_geometry(&mut grid, 2.0);

        let cells = grid.cells();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].bounds, Bounds::new(2.0, 2.0, 30.0, 5.0));
        assert_eq!(cells[1].bounds, Bounds::new(32.0, 2.0, 30.0, 5.0));
        assert_eq!(cells[4].bounds, Bounds::new(32.0, 7.0, 30.0, 7.0));
        assert_eq!(grid.canvas_size(), Size::new(64.0, 16.0));
    }

    #[test]
    fn test_rowspan_height_covers_rows() {
        let table = Table::new("t")
            .with_row(vec![Cell::text("A").with_rowspan(2), Cell::text("B")])
            .with_row(vec![Cell::text("C")]);
        let mut grid = place_cells(&table);
        grid.set_track_sizes(vec![40.0, 40.0], vec![30.0, 50.0]);
        assign_geometry(&mut grid, 0.0);

        let a = grid.cells()[0];
        assert_eq!(a.bounds.height, 80.0);
        let c = grid.cells()[2];
        assert_eq!((c.grid_row, c.grid_col), (1, 1));
        assert_eq!(c.bounds.position(), glam::DVec2::new(40.0, 30.0));
    }
}
