pub mod carousel;
pub mod form;
pub mod lightbox;
pub mod nav;
pub mod scroll;
pub mod theme;

use std::collections::BTreeSet;

use crate::domain::media::ImageRef;
use crate::infrastructure::config::Config;

use carousel::CarouselState;
use form::FormState;
use lightbox::LightboxState;
use nav::NavState;
use scroll::ScrollState;
use theme::ThemeState;

/// Unified page state. Each widget owns its own slice; no slice reads another.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub theme: ThemeState,
    pub nav: NavState,
    pub scroll: ScrollState,
    pub lightbox: LightboxState,
    pub carousel: CarouselState,
    pub form: FormState,
}

impl AppState {
    /// State with widget settings taken from configuration and no bound content
    pub fn new(config: &Config) -> Self {
        Self {
            scroll: ScrollState {
                header_threshold: config.scroll.header_threshold,
                ..Default::default()
            },
            form: FormState::new(config.form.rules.clone(), config.form.messages.clone()),
            ..Default::default()
        }
    }

    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        self.lightbox = LightboxState::new(images);
        self
    }

    pub fn with_slide_count(mut self, count: usize) -> Self {
        self.carousel = CarouselState::new(count);
        self
    }

    pub fn with_nav_targets(mut self, targets: impl IntoIterator<Item = String>) -> Self {
        self.scroll.nav_targets = targets.into_iter().collect::<BTreeSet<_>>();
        self
    }
}
