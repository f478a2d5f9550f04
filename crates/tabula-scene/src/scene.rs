//! Scene building from tables and their layouts.

use glam::Vec2;
use tabula_core::{style, Cell, Document, Table, TableRef, TabulaError};
use tabula_layout::{
    resolve_inner_placement, Bounds, LayoutEngine, LayoutGrid, ReferenceStack, TextMeasurer,
};
use tracing::{debug, warn};

use crate::options::SceneOptions;
use crate::primitives::{
    NestedScene, RectPrimitive, RenderCommand, RoundedRectPrimitive, Scene, Stroke, TextPrimitive,
};

/// How far a baseline may sit below the content box and still be drawn.
const BASELINE_TOLERANCE: f64 = 0.1;

/// Build a scene for a standalone table. Table references are unresolved.
pub fn build_scene<M: TextMeasurer + ?Sized>(
    table: &Table,
    measurer: &M,
    options: &SceneOptions,
) -> Scene {
    SceneBuilder::new(measurer, options).build(table)
}

/// Build a scene for a document's main table.
pub fn build_document_scene<M: TextMeasurer + ?Sized>(
    document: &Document,
    measurer: &M,
    options: &SceneOptions,
) -> Result<Scene, TabulaError> {
    SceneBuilder::new(measurer, options)
        .with_document(document)
        .build_main()
}

/// Turns laid-out tables into display lists.
pub struct SceneBuilder<'a, M: TextMeasurer + ?Sized> {
    engine: LayoutEngine<'a, M>,
    options: &'a SceneOptions,
}

impl<'a, M: TextMeasurer + ?Sized> SceneBuilder<'a, M> {
    pub fn new(measurer: &'a M, options: &'a SceneOptions) -> Self {
        Self {
            engine: LayoutEngine::new(measurer).with_options(options.layout.clone()),
            options,
        }
    }

    /// Resolve table references against `document`.
    pub fn with_document(mut self, document: &'a Document) -> Self {
        self.engine = self.engine.with_document(document);
        self
    }

    pub fn engine(&self) -> &LayoutEngine<'a, M> {
        &self.engine
    }

    /// Lay out and draw a top-level table.
    pub fn build(&self, table: &Table) -> Scene {
        let grid = self.engine.layout(table);
        let mut stack = ReferenceStack::with_root(&table.id);

        let mut scene = self.new_scene(&grid);
        scene.clear(style::canvas_background(&table.settings));
        self.draw_cells(&mut scene, table, &grid, &mut stack);
        scene
    }

    /// Lay out and draw the document's main table.
    pub fn build_main(&self) -> Result<Scene, TabulaError> {
        let document = self.engine.document().ok_or_else(|| {
            tabula_core::LayoutError::UnknownTable { id: String::new() }
        })?;
        Ok(self.build(document.main_table()?))
    }

    fn new_scene(&self, grid: &LayoutGrid) -> Scene {
        Scene::new(grid.canvas_width() as f32, grid.canvas_height() as f32)
    }

    /// Draw an embedded table on a transparent canvas of its natural size.
    fn build_nested(&self, table: &Table, grid: &LayoutGrid, stack: &mut ReferenceStack) -> Scene {
        let mut scene = self.new_scene(grid);
        if let Some(background) = table.settings.table_background {
            scene.clear(background);
        }
        self.draw_cells(&mut scene, table, grid, stack);
        scene
    }

    fn draw_cells(
        &self,
        scene: &mut Scene,
        table: &Table,
        grid: &LayoutGrid,
        stack: &mut ReferenceStack,
    ) {
        let settings = &table.settings;
        let edge = Stroke::new(
            style::edge_color(settings),
            style::edge_thickness(settings) as f32,
        );
        let padding = self.engine.options().padding;

        for info in grid.cells() {
            let Some(cell) = info.handle.resolve(table) else {
                continue;
            };

            scene.rounded_rect(
                RoundedRectPrimitive::from_bounds(&info.bounds, self.options.corner_radius)
                    .with_fill(style::cell_background(cell, settings)),
            );
            scene.rounded_rect(
                RoundedRectPrimitive::from_bounds(&info.bounds, self.options.corner_radius)
                    .with_stroke(edge),
            );

            let content = info.bounds.inset(padding);
            if content.size().is_degenerate() {
                debug!(
                    row = info.grid_row,
                    col = info.grid_col,
                    width = content.width,
                    height = content.height,
                    "content box has no area; skipping content"
                );
                continue;
            }

            scene.push_clip(&content);
            match &cell.table_ref {
                Some(table_ref) => {
                    self.draw_reference(scene, table_ref, &content, edge.color, stack)
                }
                None => self.draw_text(scene, cell, &content),
            }
            scene.pop_clip();
        }
    }

    /// Title lines, then body lines, from the top of the content box.
    /// Lines past the bottom are dropped.
    fn draw_text(&self, scene: &mut Scene, cell: &Cell, content: &Bounds) {
        let measurer = self.engine.measurer();
        let line_height = measurer.line_height();
        let limit = content.bottom() + BASELINE_TOLERANCE;
        let mut baseline = content.y + measurer.font_size();

        let mut title_drawn = false;
        if let Some(title) = cell.title() {
            for line in measurer.wrap(&format!("[{title}]"), content.width) {
                if baseline >= limit {
                    break;
                }
                self.text_line(scene, content.x, baseline, line.text);
                baseline += line_height;
                title_drawn = true;
            }
        }

        if let Some(body) = cell.content() {
            if title_drawn && baseline <= limit {
                baseline += self.engine.options().title_gap_ratio * line_height;
            }
            for line in measurer.wrap(body, content.width) {
                if baseline >= limit {
                    break;
                }
                self.text_line(scene, content.x, baseline, line.text);
                baseline += line_height;
            }
        }
    }

    fn text_line(&self, scene: &mut Scene, x: f64, baseline: f64, text: String) {
        scene.text(
            TextPrimitive::new(x as f32, baseline as f32, text)
                .with_font_size(self.engine.measurer().font_size() as f32)
                .with_color(self.options.text_color),
        );
    }

    fn draw_reference(
        &self,
        scene: &mut Scene,
        table_ref: &TableRef,
        content: &Bounds,
        border: tabula_core::Color,
        stack: &mut ReferenceStack,
    ) {
        let (target, grid) = match self.engine.layout_reference(table_ref, stack) {
            Ok(Some(found)) => found,
            Ok(None) => return,
            Err(err) => {
                warn!(reference = %table_ref.id, error = %err, "skipping embedded table");
                return;
            }
        };
        if grid.is_empty() {
            debug!(reference = %table_ref.id, "embedded table is empty");
            return;
        }

        let Some(placement) = resolve_inner_placement(
            grid.canvas_size(),
            content.size(),
            table_ref.scale,
            table_ref.alignment,
        ) else {
            return;
        };

        if let Err(err) = stack.enter(&target.id, self.engine.options().max_nesting_depth) {
            warn!(reference = %table_ref.id, error = %err, "skipping embedded table");
            return;
        }
        let nested = self.build_nested(target, &grid, stack);
        stack.exit();

        let bounds = placement.target(content);
        scene.push(RenderCommand::Nested(NestedScene {
            scene: Box::new(nested),
            target: RectPrimitive::from_bounds(&bounds),
            scale: Vec2::new(placement.scale_x as f32, placement.scale_y as f32),
        }));
        scene.rect(
            RectPrimitive::from_bounds(&bounds)
                .with_stroke(Stroke::new(border, self.options.reference_border_width)),
        );
    }
}
