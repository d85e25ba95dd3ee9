use serde::{Deserialize, Serialize};

use crate::domain::{media::ImageRef, theme::Theme};

/// Elm-like command definitions
/// Represents side effects on the document, the preference store, the
/// autoplay timer and the submission endpoint.
/// Commands name what should happen to the page; the executor decides how
/// that maps onto bound elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cmd {
    // Theme
    ApplyTheme(Theme),
    PersistTheme(Theme),

    // Navigation
    SetMenuOpen(bool),
    ScrollToSection(String),

    // Scroll tracking
    SetHeaderScrolled(bool),
    HighlightNavLink(String),
    RevealAll,

    // Lightbox
    RenderLightboxImage(ImageRef),
    ShowLightbox,
    HideLightbox,

    // Carousel
    RenderCarousel {
        index: usize,
    },
    StartAutoplay,
    StopAutoplay,

    // Contact form
    ClearFieldErrors,
    ShowFieldError {
        field: String,
        message: String,
    },
    SetFormStatus(String),
    SubmitForm {
        body: String,
    },
    ResetForm,

    // Logging related
    LogError {
        message: String,
    },
}

impl Cmd {
    /// Short name used in execution logs
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::ApplyTheme(_) => "ApplyTheme",
            Cmd::PersistTheme(_) => "PersistTheme",
            Cmd::SetMenuOpen(_) => "SetMenuOpen",
            Cmd::ScrollToSection(_) => "ScrollToSection",
            Cmd::SetHeaderScrolled(_) => "SetHeaderScrolled",
            Cmd::HighlightNavLink(_) => "HighlightNavLink",
            Cmd::RevealAll => "RevealAll",
            Cmd::RenderLightboxImage(_) => "RenderLightboxImage",
            Cmd::ShowLightbox => "ShowLightbox",
            Cmd::HideLightbox => "HideLightbox",
            Cmd::RenderCarousel { .. } => "RenderCarousel",
            Cmd::StartAutoplay => "StartAutoplay",
            Cmd::StopAutoplay => "StopAutoplay",
            Cmd::ClearFieldErrors => "ClearFieldErrors",
            Cmd::ShowFieldError { .. } => "ShowFieldError",
            Cmd::SetFormStatus(_) => "SetFormStatus",
            Cmd::SubmitForm { .. } => "SubmitForm",
            Cmd::ResetForm => "ResetForm",
            Cmd::LogError { .. } => "LogError",
        }
    }
}
