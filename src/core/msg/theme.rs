use serde::{Deserialize, Serialize};

/// Theme controller messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMsg {
    /// Apply the persisted preference read at startup (`None` when absent or unreadable)
    Restore(Option<String>),
    Toggle,
}
