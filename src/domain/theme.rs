use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Colour scheme of the page
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse a stored or attribute value, falling back to [`Theme::Light`]
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Accessible label for the toggle control, naming the theme it switches to
    pub fn toggle_label(self) -> String {
        format!("Switch to {} theme", self.opposite())
    }
}
