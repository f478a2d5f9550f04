//! Layout constants.

/// Options controlling table layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Space between a cell's border and its content, on every side
    pub padding: f64,
    /// Minimum outer width of a cell without a fixed width
    pub min_cell_width: f64,
    /// Minimum outer height of a cell without a fixed height
    pub min_cell_height: f64,
    /// Space around the top-level table
    pub margin: f64,
    /// Gap between title and body, as a fraction of the line height
    pub title_gap_ratio: f64,
    /// Width used to measure a cell's unwrapped content
    pub unbounded_width: f64,
    /// Deepest allowed chain of table references
    pub max_nesting_depth: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 8.0,
            min_cell_width: 30.0,
            min_cell_height: 30.0,
            margin: 15.0,
            title_gap_ratio: 0.25,
            unbounded_width: 10_000.0,
            max_nesting_depth: 16,
        }
    }
}

impl LayoutOptions {
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_min_cell_size(mut self, width: f64, height: f64) -> Self {
        self.min_cell_width = width;
        self.min_cell_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}
