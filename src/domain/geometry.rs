//! Viewport geometry for the scroll-spy band

use serde::{Deserialize, Serialize};

/// Vertical extent of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    /// The part of the viewport left after shrinking top and bottom by
    /// `margin_ratio` of its height each.
    pub fn central_band(&self, margin_ratio: f64) -> Span {
        let margin = self.height * margin_ratio.clamp(0.0, 0.5);
        Span::new(self.scroll_y + margin, self.height - 2.0 * margin)
    }

    /// Whether `span` touches the central band. Edge contact counts as intersecting.
    pub fn band_intersects(&self, margin_ratio: f64, span: Span) -> bool {
        let band = self.central_band(margin_ratio);
        span.top <= band.bottom() && span.bottom() >= band.top
    }
}

/// Change in a section's intersection with the central band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub section_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(section_id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            section_id: section_id.into(),
            is_intersecting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_band_keeps_middle_fifth() {
        let viewport = Viewport {
            scroll_y: 100.0,
            height: 1000.0,
        };
        let band = viewport.central_band(0.4);
        assert_eq!(band.top, 500.0);
        assert_eq!(band.bottom(), 700.0);
    }

    #[test]
    fn test_band_intersection() {
        let viewport = Viewport {
            scroll_y: 0.0,
            height: 1000.0,
        };
        // Band is [400, 600]
        assert!(viewport.band_intersects(0.4, Span::new(350.0, 100.0)));
        assert!(viewport.band_intersects(0.4, Span::new(0.0, 2000.0)));
        assert!(!viewport.band_intersects(0.4, Span::new(0.0, 300.0)));
        assert!(!viewport.band_intersects(0.4, Span::new(650.0, 300.0)));
    }
}
