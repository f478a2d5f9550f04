//! Layout computation for Tabula tables.
//!
//! This crate turns a table model into absolute cell geometry.
//!
//! # Architecture
//!
//! 1. **Grid placement**: maps cells and their spans onto an occupancy grid
//! 2. **Size resolution**: column widths, then row heights, from measured content
//! 3. **Geometry assignment**: absolute cell rectangles and canvas size
//! 4. **Inner placement**: scale and offset of embedded tables in their cells
//!
//! Cells referencing other tables are laid out recursively by [`LayoutEngine`].
//!
//! # Example
//!
//! ```ignore
//! use tabula_layout::{EstimatedMeasurer, LayoutEngine};
//!
//! let measurer = EstimatedMeasurer::default();
//! let engine = LayoutEngine::new(&measurer).with_document(&doc);
//! let grid = engine.layout_main()?;
//!
//! for cell in grid.cells() {
//!     println!("{:?}: {:?}", cell.handle, cell.bounds);
//! }
//! ```

mod bounds;
mod engine;
mod geometry;
mod grid;
mod inner;
mod options;
mod sizing;
mod text;

pub use bounds::{Bounds, Size};
pub use engine::{LayoutEngine, ReferenceStack};
pub use geometry::assign_geometry;
pub use grid::{place_cells, CellHandle, GridCellInfo, LayoutGrid, Placement};
pub use inner::{resolve_inner_placement, InnerPlacement};
pub use options::LayoutOptions;
pub use sizing::{
    fallback_content_size, measure_text_content, resolve_column_widths, resolve_row_heights,
    SizingInput,
};
pub use text::{EstimatedMeasurer, TextLine, TextMeasurer, TextMetrics, TextStyle};
