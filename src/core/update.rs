use crate::core::{cmd::Cmd, msg::Msg, state::AppState};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    if !msg.is_frequent() {
        tracing::debug!(?msg, "update");
    }

    let commands = match msg {
        Msg::Theme(theme_msg) => state.theme.update(theme_msg),
        Msg::Nav(nav_msg) => state.nav.update(nav_msg),
        Msg::Scroll(scroll_msg) => state.scroll.update(scroll_msg),
        Msg::Lightbox(lightbox_msg) => state.lightbox.update(lightbox_msg),
        Msg::Carousel(carousel_msg) => state.carousel.update(carousel_msg),
        Msg::Form(form_msg) => state.form.update(form_msg),
        Msg::Loaded => vec![Cmd::RevealAll],
    };

    (state, commands)
}
