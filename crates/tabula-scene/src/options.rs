//! Scene options.

use tabula_core::Color;
use tabula_layout::LayoutOptions;

/// Options for building a scene.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneOptions {
    /// Corner radius of cell rectangles
    pub corner_radius: f32,
    /// Colour of cell text
    pub text_color: Color,
    /// Width of the border drawn around embedded tables
    pub reference_border_width: f32,
    /// Layout constants
    pub layout: LayoutOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            corner_radius: 6.0,
            text_color: Color::BLACK,
            reference_border_width: 1.0,
            layout: LayoutOptions::default(),
        }
    }
}

impl SceneOptions {
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }
}
