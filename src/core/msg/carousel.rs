use serde::{Deserialize, Serialize};

/// Testimonial carousel messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselMsg {
    /// Initial render followed by autoplay
    Start,
    Previous,
    Next,
    GoTo(usize),
    AutoplayTick,
    PointerEntered,
    PointerLeft,
}
