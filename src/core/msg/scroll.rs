use serde::{Deserialize, Serialize};

use crate::domain::geometry::IntersectionEntry;

/// Scroll tracker messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScrollMsg {
    /// Vertical scroll offset changed
    Scrolled(f64),
    /// One observation batch, in delivery order
    Intersections(Vec<IntersectionEntry>),
}
