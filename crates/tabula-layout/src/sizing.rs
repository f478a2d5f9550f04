//! Size resolution: column widths, then row heights.
//!
//! Both passes visit distinct cells in row-major order and raise tracks to
//! meet each cell's requirement. A single-track cell raises its track to the
//! requirement; a spanning cell spreads any shortfall evenly over the tracks
//! it covers. Tracks never shrink.

use std::collections::HashMap;
use std::ops::Range;

use tabula_core::{Cell, Table};
use tracing::trace;

use crate::bounds::Size;
use crate::grid::{CellHandle, LayoutGrid};
use crate::options::LayoutOptions;
use crate::text::TextMeasurer;

/// Everything the sizing passes read besides the grid itself.
pub struct SizingInput<'a, M: TextMeasurer + ?Sized> {
    pub table: &'a Table,
    pub measurer: &'a M,
    pub options: &'a LayoutOptions,
    /// Content size of each table-reference cell. Reference cells missing
    /// from the map get [`fallback_content_size`].
    pub references: &'a HashMap<CellHandle, Size>,
}

/// Content size used for a reference cell that could not be laid out.
pub fn fallback_content_size(options: &LayoutOptions) -> Size {
    Size::new(
        (options.min_cell_width - 2.0 * options.padding).max(0.0),
        (options.min_cell_height - 2.0 * options.padding).max(0.0),
    )
}

/// Measure a text cell's title and body wrapped at `max_width`.
///
/// The title is measured as `[title]`. When both parts are present they are
/// separated by a gap of `title_gap_ratio` line heights.
pub fn measure_text_content<M: TextMeasurer + ?Sized>(
    cell: &Cell,
    measurer: &M,
    max_width: f64,
    options: &LayoutOptions,
) -> Size {
    let line_height = measurer.line_height();

    let title = cell
        .title()
        .map(|title| measure_block(measurer, &format!("[{title}]"), max_width));
    let body = cell
        .content()
        .map(|content| measure_block(measurer, content, max_width));

    let mut size = Size::ZERO;
    for (width, lines) in title.iter().chain(body.iter()) {
        size.width = size.width.max(*width);
        size.height += *lines as f64 * line_height;
    }
    if title.is_some() && body.is_some() {
        size.height += options.title_gap_ratio * line_height;
    }
    size
}

/// Widest line and line count. Non-empty text always takes at least a line.
fn measure_block<M: TextMeasurer + ?Sized>(measurer: &M, text: &str, max_width: f64) -> (f64, usize) {
    let lines = measurer.wrap(text, max_width);
    let width = lines.iter().map(|l| l.width).fold(0.0_f64, f64::max);
    (width, lines.len().max(1))
}

fn reference_content<M: TextMeasurer + ?Sized>(input: &SizingInput<'_, M>, handle: CellHandle) -> Size {
    input
        .references
        .get(&handle)
        .copied()
        .unwrap_or_else(|| fallback_content_size(input.options))
}

/// Raise `tracks[range]` so their sum meets `requirement`.
fn apply_requirement(tracks: &mut [f64], range: Range<usize>, requirement: f64) {
    let span = range.len();
    if span == 0 {
        return;
    }
    if span == 1 {
        let track = &mut tracks[range.start];
        *track = track.max(requirement);
        return;
    }

    let current: f64 = tracks[range.clone()].iter().sum();
    if requirement > current {
        let share = (requirement - current) / span as f64;
        for track in &mut tracks[range] {
            *track += share;
        }
    }
}

/// Resolve column widths from each cell's widest unwrapped content.
pub fn resolve_column_widths<M: TextMeasurer + ?Sized>(
    grid: &LayoutGrid,
    input: &SizingInput<'_, M>,
) -> Vec<f64> {
    let options = input.options;
    let mut widths = vec![0.0; grid.num_cols()];

    for placement in grid.placements() {
        let Some(cell) = placement.handle.resolve(input.table) else {
            continue;
        };

        let requirement = match cell.fixed_width() {
            Some(fixed) => fixed,
            None => {
                let content = if cell.is_table_ref() {
                    reference_content(input, placement.handle).width
                } else {
                    measure_text_content(cell, input.measurer, options.unbounded_width, options)
                        .width
                };
                (content + 2.0 * options.padding).max(options.min_cell_width)
            }
        };

        trace!(
            row = placement.row,
            col = placement.col,
            span = placement.col_span,
            requirement,
            "column width requirement"
        );
        apply_requirement(&mut widths, placement.columns(), requirement);
    }

    widths
}

/// Resolve row heights with content wrapped at the widths already resolved.
pub fn resolve_row_heights<M: TextMeasurer + ?Sized>(
    grid: &LayoutGrid,
    column_widths: &[f64],
    input: &SizingInput<'_, M>,
) -> Vec<f64> {
    let options = input.options;
    let mut heights = vec![0.0; grid.num_rows()];

    for placement in grid.placements() {
        let Some(cell) = placement.handle.resolve(input.table) else {
            continue;
        };

        let requirement = match cell.fixed_height() {
            Some(fixed) => fixed,
            None => {
                let content = if cell.is_table_ref() {
                    reference_content(input, placement.handle).height
                } else {
                    let cell_width: f64 = placement
                        .columns()
                        .filter_map(|c| column_widths.get(c))
                        .sum();
                    let wrap_width = (cell_width - 2.0 * options.padding).max(0.0);
                    measure_text_content(cell, input.measurer, wrap_width, options).height
                };
                (content + 2.0 * options.padding).max(options.min_cell_height)
            }
        };

        trace!(
            row = placement.row,
            col = placement.col,
            span = placement.row_span,
            requirement,
            "row height requirement"
        );
        apply_requirement(&mut heights, placement.rows(), requirement);
    }

    heights
}
