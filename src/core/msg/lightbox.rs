use serde::{Deserialize, Serialize};

/// Lightbox messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightboxMsg {
    /// Open on the image at this position of the image set
    Open(usize),
    Previous,
    Next,
    Close,
}
