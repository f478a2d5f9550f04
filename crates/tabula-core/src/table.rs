//! Table model: documents, tables, rows and cells.
//!
//! These values are produced by the parser and consumed read-only by the
//! layout engine. Cells are addressed by position (row index, cell index)
//! rather than copied, so two cells with identical contents stay distinct.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::errors::{ModelError, SpanAxis};
use crate::types::{Color, TableId};

/// Position of an embedded table along one axis of its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Left or top edge
    Start,
    /// Centered
    Center,
    /// Right or bottom edge
    End,
}

/// Where an embedded table sits inside its cell's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InnerAlignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl InnerAlignment {
    /// Horizontal anchor.
    pub fn horizontal(self) -> Anchor {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Anchor::Start,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => Anchor::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Anchor::End,
        }
    }

    /// Vertical anchor.
    pub fn vertical(self) -> Anchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Anchor::Start,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => Anchor::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Anchor::End,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopCenter => "top_center",
            Self::TopRight => "top_right",
            Self::MiddleLeft => "middle_left",
            Self::MiddleCenter => "middle_center",
            Self::MiddleRight => "middle_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomCenter => "bottom_center",
            Self::BottomRight => "bottom_right",
        }
    }
}

impl FromStr for InnerAlignment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top_left" => Ok(Self::TopLeft),
            "top_center" => Ok(Self::TopCenter),
            "top_right" => Ok(Self::TopRight),
            "middle_left" => Ok(Self::MiddleLeft),
            "center" | "middle_center" => Ok(Self::MiddleCenter),
            "middle_right" => Ok(Self::MiddleRight),
            "bottom_left" => Ok(Self::BottomLeft),
            "bottom_center" => Ok(Self::BottomCenter),
            "bottom_right" => Ok(Self::BottomRight),
            other => Err(ModelError::UnknownAlignment {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for InnerAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an embedded table is scaled to its cell's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScaleMode {
    /// Keep the natural size
    #[default]
    None,
    /// Match the content width, keeping aspect ratio
    FitWidth,
    /// Match the content height, keeping aspect ratio
    FitHeight,
    /// Largest size fitting both axes, keeping aspect ratio
    FitBoth,
    /// Match both axes exactly, ignoring aspect ratio
    FillStretch,
}

impl ScaleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FitWidth => "fit_width",
            Self::FitHeight => "fit_height",
            Self::FitBoth => "fit_both",
            Self::FillStretch => "fill_stretch",
        }
    }
}

impl FromStr for ScaleMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Self::None),
            "fit_width" => Ok(Self::FitWidth),
            "fit_height" => Ok(Self::FitHeight),
            "fit_both" => Ok(Self::FitBoth),
            "fill_stretch" => Ok(Self::FillStretch),
            other => Err(ModelError::UnknownScaleMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference from a cell to another table of the same document.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRef {
    /// Identifier of the referenced table
    pub id: TableId,
    /// Placement inside the content box
    pub alignment: InnerAlignment,
    /// Scaling inside the content box
    pub scale: ScaleMode,
}

impl TableRef {
    pub fn new(id: impl Into<TableId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_alignment(mut self, alignment: InnerAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }
}

/// Largest row or column span a cell may claim.
pub const MAX_SPAN: usize = 1000;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Title, drawn in brackets above the content
    pub title: Option<String>,
    /// Body text
    pub content: Option<String>,
    /// Number of grid columns covered (>= 1)
    pub colspan: usize,
    /// Number of grid rows covered (>= 1)
    pub rowspan: usize,
    /// Background override
    pub background: Option<Color>,
    /// Embedded table, replacing text content
    pub table_ref: Option<TableRef>,
    /// Fixed outer width; zero or negative means unset
    pub fixed_width: Option<f64>,
    /// Fixed outer height; zero or negative means unset
    pub fixed_height: Option<f64>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            title: None,
            content: None,
            colspan: 1,
            rowspan: 1,
            background: None,
            table_ref: None,
            fixed_width: None,
            fixed_height: None,
        }
    }
}

fn non_empty(s: impl Into<String>) -> Option<String> {
    let s = s.into();
    (!s.is_empty()).then_some(s)
}

impl Cell {
    /// Create a cell with a title and content. Empty strings mean "absent".
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: non_empty(title),
            content: non_empty(content),
            ..Default::default()
        }
    }

    /// Create an untitled text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new("", content)
    }

    /// Create a cell embedding another table.
    pub fn reference(table_ref: TableRef) -> Self {
        Self {
            table_ref: Some(table_ref),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title);
        self
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }

    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = rowspan;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_fixed_width(mut self, width: f64) -> Self {
        self.fixed_width = Some(width);
        self
    }

    pub fn with_fixed_height(mut self, height: f64) -> Self {
        self.fixed_height = Some(height);
        self
    }

    /// Column span, clamped to `1..=MAX_SPAN`.
    pub fn col_span(&self) -> usize {
        self.colspan.clamp(1, MAX_SPAN)
    }

    /// Row span, clamped to `1..=MAX_SPAN`.
    pub fn row_span(&self) -> usize {
        self.rowspan.clamp(1, MAX_SPAN)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Fixed width override, if set to a positive value.
    pub fn fixed_width(&self) -> Option<f64> {
        self.fixed_width.filter(|w| *w > 0.0)
    }

    /// Fixed height override, if set to a positive value.
    pub fn fixed_height(&self) -> Option<f64> {
        self.fixed_height.filter(|h| *h > 0.0)
    }

    pub fn is_table_ref(&self) -> bool {
        self.table_ref.is_some()
    }

    /// Label used in diagnostics.
    pub fn label(&self) -> &str {
        self.title()
            .or_else(|| self.table_ref.as_ref().map(|r| r.id.as_str()))
            .or_else(|| self.content())
            .unwrap_or("")
    }
}

/// A row of cells, left to right.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

/// Table-wide styling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSettings {
    /// Canvas background
    pub table_background: Option<Color>,
    /// Background for cells without their own
    pub cell_background: Option<Color>,
    /// Cell border color
    pub edge_color: Option<Color>,
    /// Cell border thickness in pixels
    pub edge_thickness: u32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            table_background: None,
            cell_background: None,
            edge_color: None,
            edge_thickness: 1,
        }
    }
}

/// A table: titled rows of cells plus settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    pub id: TableId,
    pub title: String,
    pub rows: Vec<Row>,
    pub settings: TableSettings,
}

impl Table {
    pub fn new(id: impl Into<TableId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a row.
    pub fn with_row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(Row::new(cells));
        self
    }

    pub fn with_settings(mut self, settings: TableSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Look up a cell by row index and position within the row.
    pub fn cell_at(&self, row: usize, index: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.cells.is_empty())
    }

    /// Check the model for values the parser should never produce.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                let zero_axis = if cell.colspan == 0 {
                    Some(SpanAxis::Column)
                } else if cell.rowspan == 0 {
                    Some(SpanAxis::Row)
                } else {
                    None
                };
                if let Some(axis) = zero_axis {
                    return Err(ModelError::ZeroSpan {
                        table: self.id.to_string(),
                        row: r,
                        cell: c,
                        axis,
                    });
                }
                let oversized = if cell.colspan > MAX_SPAN {
                    Some((SpanAxis::Column, cell.colspan))
                } else if cell.rowspan > MAX_SPAN {
                    Some((SpanAxis::Row, cell.rowspan))
                } else {
                    None
                };
                if let Some((axis, span)) = oversized {
                    return Err(ModelError::SpanTooLarge {
                        table: self.id.to_string(),
                        row: r,
                        cell: c,
                        axis,
                        span,
                    });
                }
                if cell.table_ref.as_ref().is_some_and(|t| t.id.is_empty()) {
                    return Err(ModelError::MissingReferenceId {
                        table: self.id.to_string(),
                        row: r,
                        cell: c,
                    });
                }
            }
        }
        Ok(())
    }
}

/// All tables of a parsed document, plus the table to render.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    tables: IndexMap<TableId, Table>,
    main: TableId,
}

impl Document {
    /// Create an empty document rendering `main`.
    pub fn new(main: impl Into<TableId>) -> Self {
        Self {
            tables: IndexMap::new(),
            main: main.into(),
        }
    }

    /// Build a document from tables in definition order.
    pub fn from_tables(
        main: impl Into<TableId>,
        tables: impl IntoIterator<Item = Table>,
    ) -> Result<Self, ModelError> {
        let mut doc = Self::new(main);
        for table in tables {
            doc.insert(table)?;
        }
        Ok(doc)
    }

    /// Add a table. Identifiers must be unique.
    pub fn insert(&mut self, table: Table) -> Result<(), ModelError> {
        if self.tables.contains_key(&table.id) {
            return Err(ModelError::DuplicateTable {
                id: table.id.to_string(),
            });
        }
        self.tables.insert(table.id.clone(), table);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn main_id(&self) -> &TableId {
        &self.main
    }

    /// The table to render.
    pub fn main_table(&self) -> Result<&Table, ModelError> {
        self.get(self.main.as_str())
            .ok_or_else(|| ModelError::UnknownTable {
                id: self.main.to_string(),
            })
    }

    /// Tables in definition order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Validate every table and the main identifier.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.main_table()?;
        self.tables().try_for_each(Table::validate)
    }
}
