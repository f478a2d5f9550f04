//! Placement of an embedded table's image inside its cell.

use tabula_core::{Anchor, InnerAlignment, ScaleMode};
use tracing::debug;

use crate::bounds::{Bounds, Size};

/// Draw size and offset of an embedded table relative to its content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerPlacement {
    pub width: f64,
    pub height: f64,
    /// Offset from the content box's left edge
    pub offset_x: f64,
    /// Offset from the content box's top edge
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl InnerPlacement {
    /// Absolute target rectangle for a content box whose top-left is `origin`.
    pub fn target(&self, origin: &Bounds) -> Bounds {
        Bounds::new(
            origin.x + self.offset_x,
            origin.y + self.offset_y,
            self.width,
            self.height,
        )
    }
}

fn anchor_factor(anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Start => 0.0,
        Anchor::Center => 0.5,
        Anchor::End => 1.0,
    }
}

/// Per-axis scale factors for `mode`. `natural` must have positive area.
fn scale_factors(natural: Size, content: Size, mode: ScaleMode) -> (f64, f64) {
    let fx = content.width / natural.width;
    let fy = content.height / natural.height;
    match mode {
        ScaleMode::None => (1.0, 1.0),
        ScaleMode::FitWidth => (fx, fx),
        ScaleMode::FitHeight => (fy, fy),
        ScaleMode::FitBoth => {
            let factor = fx.min(fy);
            (factor, factor)
        }
        ScaleMode::FillStretch => (fx, fy),
    }
}

/// Resolve how an image of `natural` size is drawn inside a `content` box.
///
/// Returns `None` when the natural size or the resulting draw size is not
/// positive, in which case nothing should be drawn.
pub fn resolve_inner_placement(
    natural: Size,
    content: Size,
    mode: ScaleMode,
    alignment: InnerAlignment,
) -> Option<InnerPlacement> {
    if natural.is_degenerate() {
        debug!(?natural, "embedded table has no area");
        return None;
    }

    let (scale_x, scale_y) = scale_factors(natural, content, mode);
    let width = natural.width * scale_x;
    let height = natural.height * scale_y;
    if width <= 0.0 || height <= 0.0 {
        debug!(width, height, %mode, "scaled embedded table has no area");
        return None;
    }

    Some(InnerPlacement {
        width,
        height,
        offset_x: (content.width - width) * anchor_factor(alignment.horizontal()),
        offset_y: (content.height - height) * anchor_factor(alignment.vertical()),
        scale_x,
        scale_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(mode: ScaleMode, alignment: InnerAlignment) -> InnerPlacement {
        resolve_inner_placement(Size::new(100.0, 50.0), Size::new(60.0, 60.0), mode, alignment)
            .unwrap()
    }

    #[test]
    fn test_fit_both_uses_smaller_factor() {
        let p = place(ScaleMode::FitBoth, InnerAlignment::TopLeft);
        assert!((p.scale_x - 0.6).abs() < 0.001);
        assert!((p.width - 60.0).abs() < 0.001);
        assert!((p.height - 30.0).abs() < 0.001);
        assert_eq!((p.offset_x, p.offset_y), (0.0, 0.0));
    }

    #[test]
    fn test_none_keeps_natural_size_and_may_overflow() {
        let p = place(ScaleMode::None, InnerAlignment::BottomRight);
        assert_eq!((p.width, p.height), (100.0, 50.0));
        assert!((p.offset_x + 40.0).abs() < 0.001);
        assert!((p.offset_y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_width_and_height() {
        let p = place(ScaleMode::FitWidth, InnerAlignment::TopLeft);
        assert!((p.width - 60.0).abs() < 0.001);
        assert!((p.height - 30.0).abs() < 0.001);

        let p = place(ScaleMode::FitHeight, InnerAlignment::TopLeft);
        assert!((p.width - 120.0).abs() < 0.001);
        assert!((p.height - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_fill_stretch_matches_box() {
        let p = place(ScaleMode::FillStretch, InnerAlignment::TopLeft);
        assert!((p.width - 60.0).abs() < 0.001);
        assert!((p.height - 60.0).abs() < 0.001);
        assert!((p.scale_y - 1.2).abs() < 0.001);
    }

    #[test]
    fn test_center_alignment() {
        let p = place(ScaleMode::FitBoth, InnerAlignment::MiddleCenter);
        assert!((p.offset_x - 0.0).abs() < 0.001);
        assert!((p.offset_y - 15.0).abs() < 0.001);

        let target = p.target(&Bounds::new(10.0, 20.0, 60.0, 60.0));
        assert!((target.y - 35.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_width_box_places_nothing_when_scaling() {
        let natural = Size::new(100.0, 50.0);
        let content = Size::new(0.0, 60.0);
        for mode in [ScaleMode::FitWidth, ScaleMode::FitBoth, ScaleMode::FillStretch] {
            let p = resolve_inner_placement(natural, content, mode, InnerAlignment::TopLeft);
            assert!(p.is_none(), "{mode} placed {p:?}");
        }
    }

    #[test]
    fn test_zero_height_box_places_nothing_when_scaling() {
        let natural = Size::new(100.0, 50.0);
        let content = Size::new(60.0, 0.0);
        for mode in [ScaleMode::FitHeight, ScaleMode::FitBoth, ScaleMode::FillStretch] {
            let p = resolve_inner_placement(natural, content, mode, InnerAlignment::TopLeft);
            assert!(p.is_none(), "{mode} placed {p:?}");
        }
    }

    #[test]
    fn test_negative_box_places_nothing() {
        let p = resolve_inner_placement(
            Size::new(100.0, 50.0),
            Size::new(-10.0, -10.0),
            ScaleMode::FitBoth,
            InnerAlignment::MiddleCenter,
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_unscaled_ignores_degenerate_box() {
        let p = resolve_inner_placement(
            Size::new(100.0, 50.0),
            Size::new(0.0, 0.0),
            ScaleMode::None,
            InnerAlignment::TopLeft,
        )
        .unwrap();
        assert_eq!((p.width, p.height), (100.0, 50.0));
    }

    #[test]
    fn test_degenerate_natural_places_nothing() {
        let p = resolve_inner_placement(
            Size::new(0.0, 50.0),
            Size::new(60.0, 60.0),
            ScaleMode::FitBoth,
            InnerAlignment::TopLeft,
        );
        assert!(p.is_none());
    }
}
