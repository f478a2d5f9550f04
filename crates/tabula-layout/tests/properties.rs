//! Layout invariants over random tables.

use proptest::prelude::*;
use tabula_core::{Cell, Table};
use tabula_layout::{
    measure_text_content, place_cells, resolve_column_widths, CellHandle, EstimatedMeasurer,
    LayoutEngine, LayoutOptions, SizingInput,
};

fn arb_cell() -> impl Strategy<Value = Cell> {
    (
        "[a-z ]{0,24}",
        1usize..4,
        1usize..4,
        prop::option::of(10.0f64..120.0),
    )
        .prop_map(|(text, colspan, rowspan, fixed_width)| {
            let mut cell = Cell::text(text).with_colspan(colspan).with_rowspan(rowspan);
            cell.fixed_width = fixed_width;
            cell
        })
}

fn arb_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(arb_cell(), 0..5), 0..6).prop_map(|rows| {
        rows.into_iter()
            .fold(Table::new("t"), |table, row| table.with_row(row))
    })
}

proptest! {
    #[test]
    fn spans_occupy_contiguous_blocks(table in arb_table()) {
        let grid = place_cells(&table);
        for p in grid.placements() {
            let cell = p.handle.resolve(&table).unwrap();
            // Overwrites can only shrink a block, never move cells into it.
            prop_assert!(p.col_span <= cell.col_span());
            prop_assert!(p.row_span <= cell.row_span());
            prop_assert_eq!(grid.get(p.row, p.col), Some(p.handle));
        }
        let seen: std::collections::HashSet<CellHandle> =
            grid.placements().iter().map(|p| p.handle).collect();
        prop_assert_eq!(seen.len(), grid.placements().len());
    }

    #[test]
    fn tracks_respect_minimums_and_fixed_widths(table in arb_table()) {
        let measurer = EstimatedMeasurer::default();
        let options = LayoutOptions::default();
        let grid = LayoutEngine::new(&measurer).layout(&table);

        for info in grid.cells() {
            let cell = info.handle.resolve(&table).unwrap();
            if let Some(fixed) = cell.fixed_width() {
                prop_assert!(info.bounds.width + 0.001 >= fixed);
            }
        }
        for height in grid.row_heights() {
            prop_assert!(*height >= 0.0);
        }
        for (col, width) in grid.column_widths().iter().enumerate() {
            prop_assert!(*width >= 0.0);
            let owned = grid.placements().iter().any(|p| {
                p.col == col
                    && p.col_span == 1
                    && p.handle.resolve(&table).and_then(Cell::fixed_width).is_none()
            });
            if owned {
                prop_assert!(*width >= options.min_cell_width);
            }
        }
    }

    #[test]
    fn canvas_is_tracks_plus_margin(table in arb_table()) {
        let measurer = EstimatedMeasurer::default();
        let grid = LayoutEngine::new(&measurer).layout(&table);
        let margin = LayoutOptions::default().margin;

        prop_assert!(grid.canvas_width() >= 2.0 * margin);
        prop_assert!(grid.canvas_height() >= 2.0 * margin);
        if !grid.is_empty() {
            let width: f64 = grid.column_widths().iter().sum();
            let height: f64 = grid.row_heights().iter().sum();
            prop_assert!((grid.canvas_width() - (width + 2.0 * margin)).abs() < 0.001);
            prop_assert!((grid.canvas_height() - (height + 2.0 * margin)).abs() < 0.001);
        } else {
            prop_assert!(grid.cells().is_empty());
        }
    }

    #[test]
    fn width_pass_meets_each_requirement(table in arb_table()) {
        let measurer = EstimatedMeasurer::default();
        let options = LayoutOptions::default();
        let references = Default::default();
        let input = SizingInput {
            table: &table,
            measurer: &measurer,
            options: &options,
            references: &references,
        };
        let grid = place_cells(&table);
        let widths = resolve_column_widths(&grid, &input);

        for p in grid.placements() {
            let cell = p.handle.resolve(&table).unwrap();
            let spanned: f64 = widths[p.columns()].iter().sum();
            let required = cell.fixed_width().unwrap_or(options.min_cell_width);
            prop_assert!(spanned + 0.001 >= required);
        }
    }

    #[test]
    fn cells_fit_measured_content(table in arb_table()) {
        let measurer = EstimatedMeasurer::default();
        let options = LayoutOptions::default();
        let grid = LayoutEngine::new(&measurer).layout(&table);
        let padding = 2.0 * options.padding;

        for info in grid.cells() {
            let cell = info.handle.resolve(&table).unwrap();
            if cell.fixed_width().is_none() {
                let natural =
                    measure_text_content(cell, &measurer, options.unbounded_width, &options);
                prop_assert!(info.bounds.width + 0.001 >= natural.width + padding);
            }
            if cell.fixed_height().is_none() {
                let spanned: f64 =
                    grid.column_widths()[info.grid_col..info.grid_col + info.col_span].iter().sum();
                let wrap_width = (spanned - padding).max(0.0);
                let wrapped = measure_text_content(cell, &measurer, wrap_width, &options);
                prop_assert!(info.bounds.height + 0.001 >= wrapped.height + padding);
            }
        }
    }
}
