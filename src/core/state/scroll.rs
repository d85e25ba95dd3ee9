use std::collections::BTreeSet;

use crate::core::{cmd::Cmd, msg::scroll::ScrollMsg};
use crate::domain::geometry::IntersectionEntry;

pub const DEFAULT_HEADER_THRESHOLD: f64 = 50.0;

/// Scroll tracker state
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub header_scrolled: bool,
    pub header_threshold: f64,
    /// Section currently highlighted in the navigation
    pub active_section: Option<String>,
    /// Section ids that have a matching navigation link
    pub nav_targets: BTreeSet<String>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            header_scrolled: false,
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            active_section: None,
            nav_targets: BTreeSet::new(),
        }
    }
}

impl ScrollState {
    pub fn update(&mut self, msg: ScrollMsg) -> Vec<Cmd> {
        match msg {
            ScrollMsg::Scrolled(offset) => {
                self.header_scrolled = offset > self.header_threshold;
                vec![Cmd::SetHeaderScrolled(self.header_scrolled)]
            }

            ScrollMsg::Intersections(entries) => match self.apply_batch(&entries) {
                Some(section) => vec![Cmd::HighlightNavLink(section)],
                None => vec![],
            },
        }
    }

    /// Process entries in delivery order; the last newly intersecting section
    /// with a navigation link wins.
    fn apply_batch(&mut self, entries: &[IntersectionEntry]) -> Option<String> {
        let winner = entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter(|entry| self.nav_targets.contains(&entry.section_id))
            .last()
            .map(|entry| entry.section_id.clone())?;

        self.active_section = Some(winner.clone());
        Some(winner)
    }
}
