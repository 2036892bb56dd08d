//! Page placement: assigns wrapped lines to fixed-size pages.
//!
//! Coordinates follow PDF user space: origin at the bottom-left corner, y grows upward,
//! units are points. The first baseline sits at `height - margin`; each following line
//! drops by `font_size + leading`. A line whose baseline would land below `margin`
//! starts a new page instead.

use serde::{Deserialize, Serialize};

use crate::layout::wrap::wrap_text;

/// Characters per line used when rendering raw text to a document.
pub const RENDER_WRAP_WIDTH: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and typography for generated documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Applied on all four sides.
    pub margin_pt: f32,
    pub font_size_pt: f32,
    /// Extra space between consecutive baselines, on top of the font size.
    pub leading_pt: f32,
    pub wrap_width_chars: usize,
}

impl PageConfig {
    /// Vertical distance between consecutive baselines.
    pub fn line_pitch(&self) -> f32 {
        self.font_size_pt + self.leading_pt
    }

    /// Page height minus the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt
    }

    /// Number of baselines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.usable_height();
        if usable < 0.0 {
            return 1;
        }
        (usable / self.line_pitch()).floor() as usize + 1
    }
}

/// A4 portrait, 50pt margins, 12pt text on a 16pt pitch, 80 characters per line.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_pt: 50.0,
        font_size_pt: 12.0,
        leading_pt: 4.0,
        wrap_width_chars: RENDER_WRAP_WIDTH,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

/// A single line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Lays `lines` top-to-bottom across as many pages as needed.
///
/// Always returns at least one page, so an empty input still renders a blank document.
pub fn layout_pages(lines: &[String], config: &PageConfig) -> Vec<Page> {
    let top = config.height_pt - config.margin_pt;
    let pitch = config.line_pitch();

    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut y = top;

    for line in lines {
        if y < config.margin_pt && !current.lines.is_empty() {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
        current.lines.push(PlacedLine {
            text: line.clone(),
            x: config.margin_pt,
            y,
        });
        y -= pitch;
    }

    pages.push(current);
    pages
}

/// Wraps raw text at `config.wrap_width_chars` and lays the result onto pages.
pub fn layout_text(text: &str, config: &PageConfig) -> Vec<Page> {
    let lines = wrap_text(text, config.wrap_width_chars);
    layout_pages(&lines, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_default_config_matches_a4_geometry() {
        let config = default_page_config();
        assert!((config.width_pt - 595.28).abs() < 1e-3);
        assert!((config.height_pt - 841.89).abs() < 1e-3);
        assert!((config.line_pitch() - 16.0).abs() < 1e-4);
        assert_eq!(config.wrap_width_chars, 80);
    }

    #[test]
    fn test_lines_per_page_for_default_config() {
        // (841.89 - 100) / 16 = 46.36 → 46 gaps → 47 baselines.
        assert_eq!(default_page_config().lines_per_page(), 47);
    }

    #[test]
    fn test_empty_input_yields_single_blank_page() {
        let pages = layout_pages(&[], &default_page_config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_first_line_sits_at_top_margin() {
        let config = default_page_config();
        let pages = layout_pages(&numbered_lines(2), &config);
        let first = &pages[0].lines[0];
        assert!((first.y - (config.height_pt - config.margin_pt)).abs() < 1e-3);
        assert!((first.x - config.margin_pt).abs() < 1e-6);
        let second = &pages[0].lines[1];
        assert!((first.y - second.y - config.line_pitch()).abs() < 1e-3);
    }

    #[test]
    fn test_exactly_one_page_of_lines_fits_on_one_page() {
        let config = default_page_config();
        let per_page = config.lines_per_page();
        assert_eq!(layout_pages(&numbered_lines(per_page), &config).len(), 1);
        assert_eq!(layout_pages(&numbered_lines(per_page + 1), &config).len(), 2);
    }

    #[test]
    fn test_overflowing_height_spills_onto_more_pages_within_margins() {
        let config = default_page_config();
        let lines = numbered_lines(config.lines_per_page() * 3 + 5);
        let pages = layout_pages(&lines, &config);

        assert_eq!(pages.len(), 4);
        let low = config.margin_pt;
        let high = config.height_pt - config.margin_pt;
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(
                    line.y >= low - 1e-3 && line.y <= high + 1e-3,
                    "baseline {} outside [{low}, {high}]",
                    line.y
                );
            }
        }
    }

    #[test]
    fn test_line_order_is_preserved_across_pages() {
        let config = default_page_config();
        let lines = numbered_lines(120);
        let flattened: Vec<String> = layout_pages(&lines, &config)
            .into_iter()
            .flat_map(|p| p.lines.into_iter().map(|l| l.text))
            .collect();
        assert_eq!(flattened, lines);
    }

    #[test]
    fn test_tiny_page_still_places_one_line_per_page() {
        let config = PageConfig {
            height_pt: 60.0,
            ..default_page_config()
        };
        let pages = layout_pages(&numbered_lines(3), &config);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.lines.len() == 1));
    }

    #[test]
    fn test_layout_text_wraps_before_placing() {
        let config = PageConfig {
            wrap_width_chars: 10,
            ..default_page_config()
        };
        let pages = layout_text("alpha beta gamma delta", &config);
        let texts: Vec<&str> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma", "delta"]);
    }
}
