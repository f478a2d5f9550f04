//! Grid placement: cells with spans onto an occupancy grid.
//!
//! Rows are processed top to bottom. Each row keeps a column cursor; a cell
//! goes into the first free slot at or after the cursor in its row, so
//! slots already reserved by a row span from above are skipped rather than
//! overwritten. The grid has no size up front and grows as cells claim
//! slots.

use std::collections::{HashMap, HashSet};

use tabula_core::{Cell, Table, MAX_SPAN};
use tracing::warn;

use crate::bounds::{Bounds, Size};

/// Non-owning handle to a cell of the source table: `(row index, cell index)`.
///
/// Handles compare by position, so two cells with identical contents are
/// still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellHandle {
    pub row: usize,
    pub index: usize,
}

impl CellHandle {
    pub fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }

    /// Look the cell up in the table it was created from.
    pub fn resolve<'t>(&self, table: &'t Table) -> Option<&'t Cell> {
        table.cell_at(self.row, self.index)
    }
}

/// A distinct cell and the block of slots it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub handle: CellHandle,
    /// Top-left logical row
    pub row: usize,
    /// Top-left logical column
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl Placement {
    /// Column indices covered by this cell.
    pub fn columns(&self) -> std::ops::Range<usize> {
        self.col..self.col + self.col_span
    }

    /// Row indices covered by this cell.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.row..self.row + self.row_span
    }
}

/// Final geometry of one distinct cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCellInfo {
    pub handle: CellHandle,
    /// Absolute rectangle on the canvas
    pub bounds: Bounds,
    pub grid_row: usize,
    pub grid_col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Occupancy grid for one table, plus its resolved sizes once computed.
#[derive(Debug, Clone, Default)]
pub struct LayoutGrid {
    /// Row-major slot store, `stride` columns per allocated row
    slots: Vec<Option<CellHandle>>,
    stride: usize,
    num_rows: usize,
    num_cols: usize,
    spans: HashMap<CellHandle, (usize, usize)>,
    placements: Vec<Placement>,
    column_widths: Vec<f64>,
    row_heights: Vec<f64>,
    cells: Vec<GridCellInfo>,
    canvas_width: f64,
    canvas_height: f64,
}

impl LayoutGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// True when no cell was placed.
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_cols == 0
    }

    /// Owner of the slot at `(row, col)`, if any. Out-of-range slots are free.
    pub fn get(&self, row: usize, col: usize) -> Option<CellHandle> {
        if col >= self.stride {
            return None;
        }
        self.slots.get(row * self.stride + col).copied().flatten()
    }

    /// Distinct cells in row-major order of their top-left slot.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Span of a placed cell as `(col_span, row_span)`.
    pub fn span_of(&self, handle: CellHandle) -> Option<(usize, usize)> {
        self.spans.get(&handle).copied()
    }

    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Store resolved track sizes. Geometry is computed from these.
    pub fn set_track_sizes(&mut self, column_widths: Vec<f64>, row_heights: Vec<f64>) {
        self.column_widths = column_widths;
        self.row_heights = row_heights;
    }

    /// Positioned cells, available after geometry assignment.
    pub fn cells(&self) -> &[GridCellInfo] {
        &self.cells
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Geometry of a specific cell.
    pub fn cell_info(&self, handle: CellHandle) -> Option<&GridCellInfo> {
        self.cells.iter().find(|info| info.handle == handle)
    }

    pub(crate) fn set_geometry(&mut self, cells: Vec<GridCellInfo>, canvas: Size) {
        self.cells = cells;
        self.canvas_width = canvas.width;
        self.canvas_height = canvas.height;
    }

    /// Make sure the slot store can address `rows × cols`.
    fn reserve(&mut self, rows: usize, cols: usize) {
        if cols > self.stride {
            let new_stride = cols.max(self.stride * 2);
            let allocated_rows = self.allocated_rows();
            let mut slots = vec![None; allocated_rows * new_stride];
            for r in 0..allocated_rows {
                let old = &self.slots[r * self.stride..(r + 1) * self.stride];
                slots[r * new_stride..r * new_stride + self.stride].copy_from_slice(old);
            }
            self.slots = slots;
            self.stride = new_stride;
        }

        let allocated_rows = self.allocated_rows();
        if rows > allocated_rows {
            let new_rows = rows.max(allocated_rows * 2);
            self.slots.resize(new_rows * self.stride, None);
        }
    }

    fn allocated_rows(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.slots.len() / self.stride
        }
    }

    /// First free column in `row` at or after `start`.
    fn first_free_column(&self, row: usize, start: usize) -> usize {
        let mut col = start;
        while self.get(row, col).is_some() {
            col += 1;
        }
        col
    }

    /// Reserve the block for `handle`, growing the grid as needed.
    fn claim(&mut self, handle: CellHandle, row: usize, col: usize, row_span: usize, col_span: usize) {
        let row_end = row.saturating_add(row_span);
        let col_end = col.saturating_add(col_span);
        self.reserve(row_end, col_end);

        for r in row..row_end {
            for c in col..col_end {
                let slot = &mut self.slots[r * self.stride + c];
                if let Some(previous) = *slot {
                    if previous != handle {
                        warn!(
                            row = r,
                            col = c,
                            previous = ?previous,
                            claimant = ?handle,
                            "grid slot already occupied; overwriting"
                        );
                    }
                }
                *slot = Some(handle);
            }
        }

        self.num_rows = self.num_rows.max(row_end);
        self.num_cols = self.num_cols.max(col_end);
        self.spans.insert(handle, (col_span, row_span));
    }

    /// Collect distinct cells by scanning slots row-major.
    fn collect_placements(&mut self) {
        let mut seen = HashSet::new();
        let mut placements = Vec::with_capacity(self.spans.len());

        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                let Some(handle) = self.get(row, col) else {
                    continue;
                };
                if !seen.insert(handle) {
                    continue;
                }
                let (col_span, row_span) = self.spans.get(&handle).copied().unwrap_or((1, 1));
                // A cell whose origin was overwritten starts later; keep its
                // block inside the grid.
                placements.push(Placement {
                    handle,
                    row,
                    col,
                    row_span: row_span.min(self.num_rows - row),
                    col_span: col_span.min(self.num_cols - col),
                });
            }
        }

        self.placements = placements;
    }
}

/// Place every cell of `table` on a fresh grid.
///
/// A table with no rows, or only empty rows, yields an empty grid. The grid's
/// dimensions are the tightest bounds around every claimed slot. Spans above
/// [`MAX_SPAN`] are clamped to it.
pub fn place_cells(table: &Table) -> LayoutGrid {
    let mut grid = LayoutGrid::new();

    for (row_index, row) in table.rows.iter().enumerate() {
        let mut cursor = 0;
        for (cell_index, cell) in row.cells.iter().enumerate() {
            let handle = CellHandle::new(row_index, cell_index);
            let col = grid.first_free_column(row_index, cursor);
            if cell.colspan > MAX_SPAN || cell.rowspan > MAX_SPAN {
                warn!(
                    table = %table.id,
                    row = row_index,
                    cell = cell_index,
                    colspan = cell.colspan,
                    rowspan = cell.rowspan,
                    limit = MAX_SPAN,
                    "span exceeds limit; clamping"
                );
            }
            let col_span = cell.col_span();
            grid.claim(handle, row_index, col, cell.row_span(), col_span);
            cursor = col.saturating_add(col_span);
        }
    }

    grid.collect_placements();
    grid
}
