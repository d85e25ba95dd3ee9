use serde::{Deserialize, Serialize};

/// Navigation controller messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavMsg {
    ToggleMenu,
    /// A link inside the navigation container was clicked
    LinkActivated,
    /// An in-page anchor was clicked; carries the target id without `#`
    AnchorActivated(String),
}
