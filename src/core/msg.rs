use serde::{Deserialize, Serialize};

pub mod carousel;
pub mod form;
pub mod lightbox;
pub mod nav;
pub mod scroll;
pub mod theme;

use carousel::CarouselMsg;
use form::FormMsg;
use lightbox::LightboxMsg;
use nav::NavMsg;
use scroll::ScrollMsg;
use theme::ThemeMsg;

/// Domain messages representing user intent on the page.
/// These are processed by the update function; each widget handles its own variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    Theme(ThemeMsg),
    Nav(NavMsg),
    Scroll(ScrollMsg),
    Lightbox(LightboxMsg),
    Carousel(CarouselMsg),
    Form(FormMsg),

    /// The page finished loading
    Loaded,
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(
            self,
            Msg::Scroll(ScrollMsg::Scrolled(_)) | Msg::Carousel(CarouselMsg::AutoplayTick)
        )
    }
}
