//! Layout orchestration and nested-table recursion.
//!
//! A layout runs grid placement, the width pass, the height pass and
//! geometry assignment in that order. Reference cells are laid out first,
//! recursively and with zero margin, so their canvas sizes can feed the
//! sizing passes of the parent.

use std::collections::HashMap;

use smallvec::SmallVec;
use tabula_core::{Document, LayoutError, Table, TableId, TableRef, TabulaError};
use tracing::{debug, warn};

use crate::bounds::Size;
use crate::geometry::assign_geometry;
use crate::grid::{place_cells, CellHandle, LayoutGrid};
use crate::options::LayoutOptions;
use crate::sizing::{resolve_column_widths, resolve_row_heights, SizingInput};
use crate::text::TextMeasurer;

/// Tables currently being laid out, outermost first.
///
/// Entering a table that is already active is a cycle. The root table does
/// not count towards the nesting depth.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStack {
    root: Option<TableId>,
    active: SmallVec<[TableId; 8]>,
}

impl ReferenceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stack whose outermost table is `root`.
    pub fn with_root(root: &TableId) -> Self {
        Self {
            root: (!root.is_empty()).then(|| root.clone()),
            active: SmallVec::new(),
        }
    }

    /// Number of nested references currently entered.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.chain().any(|active| active == id)
    }

    fn chain(&self) -> impl Iterator<Item = &TableId> {
        self.root.iter().chain(self.active.iter())
    }

    /// Enter `id`. On error the stack is left unchanged.
    pub fn enter(&mut self, id: &TableId, max_depth: usize) -> Result<(), LayoutError> {
        if let Some(start) = self.chain().position(|active| active == id) {
            let cycle = self
                .chain()
                .skip(start)
                .chain(std::iter::once(id))
                .map(TableId::to_string)
                .collect();
            return Err(LayoutError::CyclicReference { cycle });
        }
        if self.active.len() >= max_depth {
            return Err(LayoutError::MaxDepthExceeded { depth: max_depth });
        }
        self.active.push(id.clone());
        Ok(())
    }

    /// Leave the innermost entered table.
    pub fn exit(&mut self) {
        self.active.pop();
    }
}

/// Lays out tables with a given text measurer and options.
///
/// Without a document, every table reference is unresolved and gets the
/// fallback size.
pub struct LayoutEngine<'a, M: TextMeasurer + ?Sized> {
    measurer: &'a M,
    options: LayoutOptions,
    document: Option<&'a Document>,
}

impl<'a, M: TextMeasurer + ?Sized> LayoutEngine<'a, M> {
    pub fn new(measurer: &'a M) -> Self {
        Self {
            measurer,
            options: LayoutOptions::default(),
            document: None,
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve table references against `document`.
    pub fn with_document(mut self, document: &'a Document) -> Self {
        self.document = Some(document);
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn measurer(&self) -> &'a M {
        self.measurer
    }

    pub fn document(&self) -> Option<&'a Document> {
        self.document
    }

    /// Lay out a top-level table with the configured margin.
    pub fn layout(&self, table: &Table) -> LayoutGrid {
        self.layout_with_margin(table, self.options.margin)
    }

    pub fn layout_with_margin(&self, table: &Table, margin: f64) -> LayoutGrid {
        let mut stack = ReferenceStack::with_root(&table.id);
        self.layout_nested(table, margin, &mut stack)
    }

    /// Lay out the document's main table.
    pub fn layout_main(&self) -> Result<LayoutGrid, TabulaError> {
        let document = self.document.ok_or_else(|| LayoutError::UnknownTable {
            id: String::new(),
        })?;
        let table = document.main_table()?;
        Ok(self.layout(table))
    }

    /// Lay out a document table by identifier.
    pub fn layout_id(&self, id: &str) -> Result<LayoutGrid, LayoutError> {
        let table = self
            .document
            .and_then(|doc| doc.get(id))
            .ok_or_else(|| LayoutError::UnknownTable { id: id.to_string() })?;
        Ok(self.layout(table))
    }

    /// Lay out `table` as part of the chain recorded in `stack`.
    pub fn layout_nested(&self, table: &Table, margin: f64, stack: &mut ReferenceStack) -> LayoutGrid {
        let mut grid = place_cells(table);
        debug!(
            table = %table.id,
            rows = grid.num_rows(),
            cols = grid.num_cols(),
            "placed cells"
        );

        let references = self.reference_sizes(table, &grid, stack);
        let input = SizingInput {
            table,
            measurer: self.measurer,
            options: &self.options,
            references: &references,
        };
        let widths = resolve_column_widths(&grid, &input);
        let heights = resolve_row_heights(&grid, &widths, &input);
        grid.set_track_sizes(widths, heights);
        assign_geometry(&mut grid, margin);
        grid
    }

    /// Content sizes of every resolvable reference cell of `table`.
    fn reference_sizes(
        &self,
        table: &Table,
        grid: &LayoutGrid,
        stack: &mut ReferenceStack,
    ) -> HashMap<CellHandle, Size> {
        let mut sizes = HashMap::new();

        for placement in grid.placements() {
            let Some(table_ref) = placement
                .handle
                .resolve(table)
                .and_then(|cell| cell.table_ref.as_ref())
            else {
                continue;
            };

            match self.layout_reference(table_ref, stack) {
                Ok(Some((_, nested))) => {
                    sizes.insert(placement.handle, nested.canvas_size());
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        table = %table.id,
                        reference = %table_ref.id,
                        error = %err,
                        "nested table layout failed; using fallback size"
                    );
                }
            }
        }

        sizes
    }

    /// Lay out the table a reference points at, with zero margin.
    ///
    /// Unresolved references (blank identifier, no document, unknown table)
    /// are logged and give `Ok(None)`. Cycles and excessive nesting are
    /// errors.
    pub fn layout_reference(
        &self,
        table_ref: &TableRef,
        stack: &mut ReferenceStack,
    ) -> Result<Option<(&'a Table, LayoutGrid)>, LayoutError> {
        if table_ref.id.is_empty() {
            warn!("table reference without an identifier");
            return Ok(None);
        }
        let Some(document) = self.document else {
            warn!(reference = %table_ref.id, "no document to resolve table reference");
            return Ok(None);
        };
        let Some(target) = document.get(table_ref.id.as_str()) else {
            warn!(reference = %table_ref.id, "referenced table not found");
            return Ok(None);
        };

        stack.enter(&target.id, self.options.max_nesting_depth)?;
        let grid = self.layout_nested(target, 0.0, stack);
        stack.exit();

        debug!(
            reference = %table_ref.id,
            width = grid.canvas_width(),
            height = grid.canvas_height(),
            "laid out nested table"
        );
        Ok(Some((target, grid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EstimatedMeasurer;
    use tabula_core::Cell;

    fn id(s: &str) -> TableId {
        TableId::from(s)
    }

    #[test]
    fn test_stack_detects_cycle() {
        let mut stack = ReferenceStack::with_root(&id("main"));
        stack.enter(&id("inner"), 16).unwrap();
        let err = stack.enter(&id("main"), 16).unwrap_err();
        assert_eq!(
            err,
            LayoutError::CyclicReference {
                cycle: vec!["main".into(), "inner".into(), "main".into()]
            }
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_stack_depth_limit() {
        let mut stack = ReferenceStack::new();
        stack.enter(&id("a"), 2).unwrap();
        stack.enter(&id("b"), 2).unwrap();
        let err = stack.enter(&id("c"), 2).unwrap_err();
        assert_eq!(err, LayoutError::MaxDepthExceeded { depth: 2 });

        stack.exit();
        assert!(stack.enter(&id("c"), 2).is_ok());
    }

    #[test]
    fn test_simple_table_layout() {
        let measurer = EstimatedMeasurer::default();
        let engine = LayoutEngine::new(&measurer);
        let table = Table::new("t")
            .with_row(vec![Cell::text("A"), Cell::text("B")])
            .with_row(vec![Cell::text("C"), Cell::text("D")]);
        let grid = engine.layout(&table);

        assert_eq!(grid.cells().len(), 4);
        let width: f64 = grid.column_widths().iter().sum();
        assert!((grid.canvas_width() - (width + 30.0)).abs() < 0.001);
        assert_eq!(grid.cells()[0].bounds.x, 15.0);
    }

    #[test]
    fn test_reference_without_document_uses_fallback() {
        let measurer = EstimatedMeasurer::default();
        let engine = LayoutEngine::new(&measurer);
        let table = Table::new("t").with_row(vec![Cell::reference(TableRef::new("other"))]);
        let grid = engine.layout(&table);
        assert_eq!(grid.column_widths(), &[30.0]);
        assert_eq!(grid.row_heights(), &[30.0]);
    }

    #[test]
    fn test_nested_canvas_feeds_parent() {
        let measurer = EstimatedMeasurer::default();
        let inner = Table::new("inner").with_row(vec![
            Cell::text("x").with_fixed_width(100.0).with_fixed_height(40.0),
        ]);
        let main = Table::new("main").with_row(vec![Cell::reference(TableRef::new("inner"))]);
        let doc = Document::from_tables("main", [main, inner]).unwrap();
        let engine = LayoutEngine::new(&measurer).with_document(&doc);

        let grid = engine.layout_main().unwrap();
        assert!((grid.column_widths()[0] - 116.0).abs() < 0.001);
        assert!((grid.row_heights()[0] - 56.0).abs() < 0.001);
    }

    #[test]
    fn test_self_reference_falls_back() {
        let measurer = EstimatedMeasurer::default();
        let main = Table::new("main").with_row(vec![Cell::reference(TableRef::new("main"))]);
        let doc = Document::from_tables("main", [main]).unwrap();
        let engine = LayoutEngine::new(&measurer).with_document(&doc);

        let grid = engine.layout_main().unwrap();
        assert_eq!(grid.column_widths(), &[30.0]);
    }

    #[test]
    fn test_layout_id_unknown() {
        let measurer = EstimatedMeasurer::default();
        let doc = Document::new("main");
        let engine = LayoutEngine::new(&measurer).with_document(&doc);
        assert_eq!(
            engine.layout_id("nope").unwrap_err(),
            LayoutError::UnknownTable { id: "nope".into() }
        );
        assert!(engine.layout_main().is_err());
    }
}
