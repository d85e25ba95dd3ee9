//! Section visibility observation for the scroll-spy
//!
//! Behaves like an intersection observer whose root margin shrinks the
//! viewport by `margin_ratio` at the top and at the bottom: the first batch
//! reports every observed section, later batches only report sections whose
//! intersecting state changed.

use std::collections::HashMap;

use crate::domain::geometry::IntersectionEntry;
use crate::infrastructure::dom::{Dom, NodeId};

pub const DEFAULT_MARGIN_RATIO: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct SpyObserver {
    margin_ratio: f64,
    targets: Vec<(NodeId, String)>,
    last_seen: HashMap<String, bool>,
}

impl SpyObserver {
    pub fn new(margin_ratio: f64) -> Self {
        Self {
            margin_ratio,
            targets: Vec::new(),
            last_seen: HashMap::new(),
        }
    }

    /// Start observing a section; entries are delivered in observation order
    pub fn observe(&mut self, node: NodeId, section_id: impl Into<String>) {
        self.targets.push((node, section_id.into()));
    }

    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    /// Compute the next batch for the document's current viewport.
    /// Sections without layout never intersect.
    pub fn take_records<D: Dom>(&mut self, dom: &D) -> Vec<IntersectionEntry> {
        let viewport = dom.viewport();
        let mut batch = Vec::new();
        for (node, section_id) in &self.targets {
            let intersecting = dom
                .layout(*node)
                .is_some_and(|span| viewport.band_intersects(self.margin_ratio, span));
            let previous = self.last_seen.insert(section_id.clone(), intersecting);
            if previous != Some(intersecting) {
                batch.push(IntersectionEntry::new(section_id.clone(), intersecting));
            }
        }
        batch
    }
}

impl Default for SpyObserver {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_RATIO)
    }
}
