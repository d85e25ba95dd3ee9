use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{cmd::Cmd, msg::form::SubmissionOutcome, raw_msg::RawMsg},
    domain::{media::ImageRef, theme::Theme},
    infrastructure::{
        autoplay::AutoplayTimer,
        config::Config,
        dom::{Dom, NodeId},
        storage::PreferenceStore,
        transport::FormTransport,
    },
    integration::bindings::PageBindings,
};

/// Settings the executor needs from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorSettings {
    pub storage_key: String,
    pub endpoint: String,
    pub autoplay_period: Duration,
}

impl From<&Config> for ExecutorSettings {
    fn from(config: &Config) -> Self {
        Self {
            storage_key: config.theme.storage_key.clone(),
            endpoint: config.form.endpoint.clone(),
            autoplay_period: config.carousel.autoplay_period(),
        }
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Command executor that applies Elm commands to the bound page and the
/// injected capabilities
#[derive(Debug)]
pub struct CmdExecutor<D: Dom> {
    dom: D,
    bindings: PageBindings,
    store: Box<dyn PreferenceStore>,
    transport: Arc<dyn FormTransport>,
    autoplay: AutoplayTimer,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    liveness: CancellationToken,
    settings: ExecutorSettings,
}

impl<D: Dom> CmdExecutor<D> {
    pub fn new(
        dom: D,
        bindings: PageBindings,
        store: Box<dyn PreferenceStore>,
        transport: Arc<dyn FormTransport>,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
        liveness: CancellationToken,
        settings: ExecutorSettings,
    ) -> Self {
        Self {
            dom,
            bindings,
            store,
            transport,
            autoplay: AutoplayTimer::new(),
            raw_tx,
            liveness,
            settings,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn bindings(&self) -> &PageBindings {
        &self.bindings
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Stop background work owned by the page
    pub fn shutdown(&mut self) {
        self.autoplay.stop();
        self.liveness.cancel();
    }

    /// Execute multiple commands in order
    pub fn execute_commands(&mut self, commands: &[Cmd]) -> Result<()> {
        for cmd in commands {
            self.execute_command(cmd)?;
        }
        Ok(())
    }

    /// Execute a single command against the page
    pub fn execute_command(&mut self, cmd: &Cmd) -> Result<()> {
        tracing::trace!(cmd = cmd.name(), "executing");
        match cmd {
            // Theme
            Cmd::ApplyTheme(theme) => self.apply_theme(*theme),
            Cmd::PersistTheme(theme) => {
                if let Err(err) = self.store.set(&self.settings.storage_key, theme.as_ref()) {
                    tracing::warn!(%err, %theme, "theme preference not persisted");
                }
            }

            // Navigation
            Cmd::SetMenuOpen(open) => {
                if let Some(nav) = &self.bindings.nav {
                    self.dom.toggle_class(nav.container, "nav-active", *open);
                    self.dom
                        .set_attribute(nav.hamburger, "aria-expanded", &open.to_string());
                }
            }
            Cmd::ScrollToSection(section) => self.scroll_to_section(section)?,

            // Scroll tracking
            Cmd::SetHeaderScrolled(scrolled) => {
                if let Some(header) = self.bindings.scroll.header {
                    self.dom.toggle_class(header, "scrolled", *scrolled);
                }
            }
            Cmd::HighlightNavLink(section) => self.highlight_nav_link(section),
            Cmd::RevealAll => {
                for node in &self.bindings.scroll.reveal {
                    self.dom.add_class(*node, "revealed");
                }
            }

            // Lightbox
            Cmd::RenderLightboxImage(image) => self.render_lightbox_image(image),
            Cmd::ShowLightbox => self.set_lightbox_visible(true),
            Cmd::HideLightbox => self.set_lightbox_visible(false),

            // Carousel
            Cmd::RenderCarousel { index } => self.render_carousel(*index),
            Cmd::StartAutoplay => {
                if self.bindings.carousel.is_some() {
                    self.autoplay
                        .start(self.settings.autoplay_period, self.raw_tx.clone());
                }
            }
            Cmd::StopAutoplay => self.autoplay.stop(),

            // Contact form
            Cmd::ClearFieldErrors => self.clear_field_errors(),
            Cmd::ShowFieldError { field, message } => self.show_field_error(field, message),
            Cmd::SetFormStatus(status) => {
                if let Some(node) = self.bindings.form.as_ref().and_then(|form| form.status) {
                    self.dom.set_text(node, status);
                }
            }
            Cmd::SubmitForm { body } => self.submit_form(body.clone()),
            Cmd::ResetForm => self.reset_form(),

            // Logging
            Cmd::LogError { message } => tracing::error!("{message}"),
        }
        Ok(())
    }

    fn apply_theme(&mut self, theme: Theme) {
        let root = self.bindings.theme.root;
        self.dom.set_attribute(root, "data-theme", theme.as_ref());
        if let Some(toggle) = self.bindings.theme.toggle {
            self.dom
                .set_attribute(toggle, "aria-label", &theme.toggle_label());
            self.dom
                .toggle_class(toggle, "dark-active", theme == Theme::Dark);
        }
    }

    fn scroll_to_section(&mut self, section: &str) -> Result<()> {
        let Some(target) = self.dom.element_by_id(section) else {
            tracing::debug!(section, "anchor target missing");
            return Ok(());
        };
        if let Some(offset) = self.dom.scroll_into_view(target) {
            self.raw_tx.send(RawMsg::Scroll(offset))?;
        }
        Ok(())
    }

    fn highlight_nav_link(&mut self, section: &str) {
        let Some(active) = self.bindings.scroll.link_for_section(section) else {
            return;
        };
        for (link, _) in &self.bindings.scroll.nav_links {
            self.dom.remove_class(*link, "active");
        }
        self.dom.add_class(active, "active");
    }

    fn render_lightbox_image(&mut self, image: &ImageRef) {
        let Some(lightbox) = &self.bindings.lightbox else {
            return;
        };
        let content = lightbox.content;
        self.dom.clear_children(content);
        let img = self.dom.create_element("img");
        self.dom.set_attribute(img, "src", &image.src);
        self.dom.set_attribute(img, "alt", &image.alt);
        self.dom.append_child(content, img);
    }

    fn set_lightbox_visible(&mut self, visible: bool) {
        let Some(lightbox) = &self.bindings.lightbox else {
            return;
        };
        let (overlay, prev) = (lightbox.overlay, lightbox.prev);
        self.dom.toggle_class(overlay, "show", visible);
        self.dom
            .set_attribute(overlay, "aria-hidden", &(!visible).to_string());
        if visible {
            self.dom.focus(prev);
        }
        if let Some(body) = self.bindings.body {
            self.dom
                .set_style(body, "overflow", if visible { "hidden" } else { "" });
        }
    }

    fn render_carousel(&mut self, index: usize) {
        let Some(carousel) = &self.bindings.carousel else {
            return;
        };
        self.dom.set_style(
            carousel.stage,
            "transform",
            &format!("translateX(-{}%)", index * 100),
        );
        for (position, dot) in carousel.dots.iter().enumerate() {
            self.dom.toggle_class(*dot, "active", position == index);
        }
    }

    fn form_fields(&self) -> Vec<(String, NodeId)> {
        self.bindings
            .form
            .as_ref()
            .map(|form| form.fields.clone())
            .unwrap_or_default()
    }

    fn clear_field_errors(&mut self) {
        let Some(form) = self.bindings.form.as_ref().map(|form| form.form) else {
            return;
        };
        for error in self.dom.descendants_with_class(form, "field-error") {
            self.dom.set_text(error, "");
        }
        for node in self.dom.descendants(form) {
            if self.dom.attribute(node, "aria-invalid").is_some() {
                self.dom.remove_attribute(node, "aria-invalid");
            }
        }
    }

    fn show_field_error(&mut self, field: &str, message: &str) {
        let Some(control) = self
            .bindings
            .form
            .as_ref()
            .and_then(|form| form.field(field))
        else {
            tracing::debug!(field, "no control for field error");
            return;
        };
        let slot = self
            .dom
            .closest(control, |d, node| d.has_class(node, "form-group"))
            .and_then(|group| self.dom.first_with_class(group, "field-error"));
        if let Some(slot) = slot {
            self.dom.set_text(slot, message);
        }
        self.dom.set_attribute(control, "aria-invalid", "true");
    }

    /// Post in the background; the outcome comes back as a raw event while
    /// the page is alive
    fn submit_form(&self, body: String) {
        let request = self.transport.post_form(&self.settings.endpoint, body);
        let tx = self.raw_tx.clone();
        let liveness = self.liveness.clone();
        tokio::spawn(async move {
            let outcome = match request.await {
                Ok(status) => SubmissionOutcome::Responded(status),
                Err(err) => SubmissionOutcome::Failed(err.to_string()),
            };
            if liveness.is_cancelled() {
                tracing::debug!(?outcome, "page gone, submission outcome dropped");
                return;
            }
            if tx.send(RawMsg::SubmissionFinished(outcome)).is_err() {
                tracing::debug!("event channel closed, submission outcome dropped");
            }
        });
    }

    /// Restore every control to its markup value
    fn reset_form(&mut self) {
        for (_, control) in self.form_fields() {
            let initial = self.dom.attribute(control, "value").unwrap_or_default();
            self.dom.set_value(control, &initial);
        }
    }
}
