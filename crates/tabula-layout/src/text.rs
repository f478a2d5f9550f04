//! Text measurement for layout.
//!
//! Layout only needs to know how text wraps at a given width. Font loading
//! and glyph metrics belong to the host, which plugs them in through
//! [`TextMeasurer`]. [`EstimatedMeasurer`] is a font-free implementation for
//! headless use and tests.

/// Text measurement configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: f64,
    /// Line height as a multiplier of the font size
    pub line_height: f64,
    /// Average glyph advance as a fraction of the font size
    pub char_width_ratio: f64,
    /// Letter spacing in pixels
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 1.4,
            char_width_ratio: 0.55,
            letter_spacing: 0.0,
        }
    }
}

/// One wrapped line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: f64,
}

/// Measured text metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the widest line
    pub width: f64,
    /// Height of all lines
    pub height: f64,
    /// Number of lines
    pub lines: u32,
}

/// Wraps and measures text for a fixed font.
///
/// Implementations must be deterministic: the same text and width always
/// produce the same lines.
pub trait TextMeasurer {
    /// Break `text` into lines no wider than `max_width` where possible.
    ///
    /// Explicit newlines always break. A single word wider than `max_width`
    /// gets a line of its own. Empty text produces no lines.
    fn wrap(&self, text: &str, max_width: f64) -> Vec<TextLine>;

    /// Distance between consecutive baselines.
    fn line_height(&self) -> f64;

    /// Font size in pixels, used to place the first baseline.
    fn font_size(&self) -> f64;

    /// Measure `text` wrapped at `max_width`.
    fn measure(&self, text: &str, max_width: f64) -> TextMetrics {
        let lines = self.wrap(text, max_width);
        let count = lines.len() as u32;
        TextMetrics {
            width: lines.iter().map(|l| l.width).fold(0.0_f64, f64::max),
            height: count as f64 * self.line_height(),
            lines: count,
        }
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn wrap(&self, text: &str, max_width: f64) -> Vec<TextLine> {
        (**self).wrap(text, max_width)
    }

    fn line_height(&self) -> f64 {
        (**self).line_height()
    }

    fn font_size(&self) -> f64 {
        (**self).font_size()
    }
}

/// Character-count based measurement.
///
/// Every character advances by the same estimated width, which is a rough
/// approximation of a proportional font but fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct EstimatedMeasurer {
    style: TextStyle,
}

impl EstimatedMeasurer {
    pub fn new(style: TextStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Advance of a single character.
    pub fn char_width(&self) -> f64 {
        self.style.font_size * self.style.char_width_ratio + self.style.letter_spacing
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width()
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width: f64, lines: &mut Vec<TextLine>) {
        let space_width = self.char_width();
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = self.text_width(word);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            } else {
                lines.push(TextLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            lines.push(TextLine {
                text: current,
                width: current_width,
            });
        }
    }
}

impl TextMeasurer for EstimatedMeasurer {
    fn wrap(&self, text: &str, max_width: f64) -> Vec<TextLine> {
        let mut lines = Vec::new();
        // Blank paragraphs collapse, so "a\n\nb" is two lines.
        for paragraph in text.lines() {
            self.wrap_paragraph(paragraph, max_width, &mut lines);
        }
        lines
    }

    fn line_height(&self) -> f64 {
        self.style.font_size * self.style.line_height
    }

    fn font_size(&self) -> f64 {
        self.style.font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> EstimatedMeasurer {
        // 10px font, 0.5 ratio: every character is 5px wide, lines are 15px.
        EstimatedMeasurer::new(TextStyle {
            font_size: 10.0,
            line_height: 1.5,
            char_width_ratio: 0.5,
            letter_spacing: 0.0,
        })
    }

    #[test]
    fn test_measure_empty_text() {
        let metrics = measurer().measure("", 100.0);
        assert_eq!(metrics.lines, 0);
        assert!(metrics.width < 0.001);
        assert!(metrics.height < 0.001);
    }

    #[test]
    fn test_measure_single_line() {
        let metrics = measurer().measure("Hello World", 200.0);
        assert_eq!(metrics.lines, 1);
        assert!((metrics.width - 55.0).abs() < 0.001);
        assert!((metrics.height - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_explicit_newlines_break() {
        let lines = measurer().wrap("First line\nSecond line", 200.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "Second line");
        assert!((lines[1].width - 55.0).abs() < 0.001);
    }

    #[test]
    fn test_blank_lines_collapse() {
        let metrics = measurer().measure("Line 1\n\nLine 3", 200.0);
        assert_eq!(metrics.lines, 2);
    }

    #[test]
    fn test_wrapping_at_width() {
        // "aaaa bbbb cccc": each word is 20px, a space is 5px.
        let lines = measurer().wrap("aaaa bbbb cccc", 45.0);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaaa bbbb", "cccc"]);
        assert!((lines[0].width - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = measurer().wrap("a extraordinarily b", 10.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "extraordinarily");
    }

    #[test]
    fn test_zero_width_wraps_every_word() {
        let metrics = measurer().measure("one two three", 0.0);
        assert_eq!(metrics.lines, 3);
    }
}
