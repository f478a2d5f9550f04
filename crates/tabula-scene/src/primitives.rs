//! Render primitives for table scenes.
//!
//! Coordinates are canvas pixels as `f32`, the precision drawing backends
//! work in.

use glam::Vec2;
use tabula_core::Color;
use tabula_layout::Bounds;

/// A render command representing something to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the whole canvas
    Clear(Color),
    /// Draw a rectangle
    Rect(RectPrimitive),
    /// Draw a rounded rectangle
    RoundedRect(RoundedRectPrimitive),
    /// Draw one line of text
    Text(TextPrimitive),
    /// Push a clip region
    PushClip(ClipRegion),
    /// Pop clip region
    PopClip,
    /// Draw another scene, scaled into a target rectangle
    Nested(NestedScene),
}

/// A rectangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
        }
    }

    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self::new(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
        )
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// A rounded rectangle primitive with one radius for every corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectPrimitive {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RoundedRectPrimitive {
    pub fn new(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radius,
            fill: None,
            stroke: None,
        }
    }

    pub fn from_bounds(bounds: &Bounds, radius: f32) -> Self {
        Self::new(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
            radius,
        )
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// A line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
    pub color: Color,
}

impl TextPrimitive {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_size: 12.0,
            color: Color::BLACK,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Clip region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// An embedded table's scene placed on its parent's canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedScene {
    /// The embedded table, drawn at its natural size from the origin
    pub scene: Box<Scene>,
    /// Where the scaled scene lands on the parent canvas
    pub target: RectPrimitive,
    /// Factors mapping natural size to target size
    pub scale: Vec2,
}

/// A scene containing all render commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<RenderCommand>,
    pub width: f32,
    pub height: f32,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            commands: Vec::new(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear(color));
    }

    pub fn rect(&mut self, rect: RectPrimitive) {
        self.commands.push(RenderCommand::Rect(rect));
    }

    pub fn rounded_rect(&mut self, rect: RoundedRectPrimitive) {
        self.commands.push(RenderCommand::RoundedRect(rect));
    }

    pub fn text(&mut self, text: TextPrimitive) {
        self.commands.push(RenderCommand::Text(text));
    }

    pub fn push_clip(&mut self, bounds: &Bounds) {
        self.commands.push(RenderCommand::PushClip(ClipRegion {
            x: bounds.x as f32,
            y: bounds.y as f32,
            width: bounds.width as f32,
            height: bounds.height as f32,
        }));
    }

    pub fn pop_clip(&mut self) {
        self.commands.push(RenderCommand::PopClip);
    }

    /// Text primitives of this scene, not descending into nested scenes.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Nested scenes placed directly on this scene.
    pub fn nested(&self) -> impl Iterator<Item = &NestedScene> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Nested(nested) => Some(nested),
            _ => None,
        })
    }
}
