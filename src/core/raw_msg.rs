use serde::{Deserialize, Serialize};

use crate::core::msg::form::SubmissionOutcome;
use crate::domain::geometry::IntersectionEntry;
use crate::infrastructure::dom::NodeId;

/// Raw external events as delivered by the page host, the timer and the
/// submission task. Translated into domain messages by the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    /// Window `load`
    Load,
    /// Click whose innermost target is this element
    Click(NodeId),
    /// Document-level keydown carrying the key name (`Escape`, `ArrowLeft`, ...)
    KeyDown(String),
    /// Window scrolled to this vertical offset
    Scroll(f64),
    /// Observation batch from the visibility observer
    Intersections(Vec<IntersectionEntry>),
    PointerEnter(NodeId),
    PointerLeave(NodeId),
    /// The user edited a form control
    Input { node: NodeId, value: String },
    /// Submit event on a form element
    Submit(NodeId),

    // Internal events
    AutoplayTick,
    SubmissionFinished(SubmissionOutcome),
}

impl RawMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(
            self,
            RawMsg::Scroll(_) | RawMsg::Intersections(_) | RawMsg::AutoplayTick
        )
    }
}
