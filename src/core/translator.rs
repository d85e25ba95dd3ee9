use crate::{
    core::{
        msg::{
            carousel::CarouselMsg, form::FormMsg, lightbox::LightboxMsg, nav::NavMsg,
            scroll::ScrollMsg, theme::ThemeMsg, Msg,
        },
        raw_msg::RawMsg,
        state::AppState,
    },
    domain::form::FormFields,
    infrastructure::dom::{Dom, NodeId},
    integration::bindings::PageBindings,
};

/// Translates raw page events into domain messages
/// This function is pure: it only reads the document and the bindings
pub fn translate_raw_to_domain<D: Dom>(
    raw: RawMsg,
    state: &AppState,
    bindings: &PageBindings,
    dom: &D,
) -> Vec<Msg> {
    match raw {
        RawMsg::Load => vec![Msg::Loaded],

        // A click reaches every handler on its path, in registration order
        RawMsg::Click(target) => translate_click(target, bindings, dom),

        RawMsg::KeyDown(key) => translate_key(&key, state, bindings),

        RawMsg::Scroll(offset) => vec![Msg::Scroll(ScrollMsg::Scrolled(offset))],
        RawMsg::Intersections(entries) => vec![Msg::Scroll(ScrollMsg::Intersections(entries))],

        RawMsg::PointerEnter(node) => match &bindings.carousel {
            Some(carousel) if carousel.viewport == node => {
                vec![Msg::Carousel(CarouselMsg::PointerEntered)]
            }
            _ => vec![],
        },
        RawMsg::PointerLeave(node) => match &bindings.carousel {
            Some(carousel) if carousel.viewport == node => {
                vec![Msg::Carousel(CarouselMsg::PointerLeft)]
            }
            _ => vec![],
        },

        RawMsg::Submit(node) => match &bindings.form {
            Some(form) if form.form == node => {
                let fields: FormFields = form
                    .fields
                    .iter()
                    .map(|(name, field)| (name.clone(), dom.value(*field)))
                    .collect();
                vec![Msg::Form(FormMsg::Submit(fields))]
            }
            _ => vec![],
        },

        RawMsg::AutoplayTick if bindings.carousel.is_some() => {
            vec![Msg::Carousel(CarouselMsg::AutoplayTick)]
        }
        RawMsg::AutoplayTick => vec![],

        RawMsg::SubmissionFinished(outcome) => {
            vec![Msg::Form(FormMsg::SubmissionFinished(outcome))]
        }

        // Typing changes the document only; the runtime writes the value
        RawMsg::Input { .. } => vec![],
    }
}

fn translate_click<D: Dom>(target: NodeId, bindings: &PageBindings, dom: &D) -> Vec<Msg> {
    let mut msgs = Vec::new();

    if let Some(nav) = &bindings.nav {
        if dom.contains(nav.hamburger, target) {
            msgs.push(Msg::Nav(NavMsg::ToggleMenu));
        }
    }

    let link = dom.closest(target, |d, node| d.tag(node) == Some("a"));
    if let Some(link) = link {
        if let Some(nav) = &bindings.nav {
            if dom.contains(nav.container, link) {
                msgs.push(Msg::Nav(NavMsg::LinkActivated));
            }
        }
        if let Some(section) = dom
            .attribute(link, "href")
            .and_then(|href| href.strip_prefix('#').map(String::from))
        {
            // A bare "#" names no element
            if !section.is_empty() {
                msgs.push(Msg::Nav(NavMsg::AnchorActivated(section)));
            }
        }
    }

    if let Some(toggle) = bindings.theme.toggle {
        if dom.contains(toggle, target) {
            msgs.push(Msg::Theme(ThemeMsg::Toggle));
        }
    }

    if let Some(lightbox) = &bindings.lightbox {
        if dom.contains(lightbox.gallery, target) {
            let item = dom.closest(target, |d, node| d.has_class(node, "gallery-item"));
            let position = item
                .and_then(|item| dom.descendants_with_tag(item, "img").into_iter().next())
                .and_then(|img| lightbox.thumbnails.iter().position(|t| *t == img));
            if let Some(index) = position {
                msgs.push(Msg::Lightbox(LightboxMsg::Open(index)));
            }
        }
        if dom.contains(lightbox.prev, target) {
            msgs.push(Msg::Lightbox(LightboxMsg::Previous));
        } else if dom.contains(lightbox.next, target) {
            msgs.push(Msg::Lightbox(LightboxMsg::Next));
        } else if dom.contains(lightbox.close, target) || target == lightbox.overlay {
            msgs.push(Msg::Lightbox(LightboxMsg::Close));
        }
    }

    if let Some(carousel) = &bindings.carousel {
        if carousel.prev.is_some_and(|prev| dom.contains(prev, target)) {
            msgs.push(Msg::Carousel(CarouselMsg::Previous));
        } else if carousel.next.is_some_and(|next| dom.contains(next, target)) {
            msgs.push(Msg::Carousel(CarouselMsg::Next));
        } else if let Some(index) = carousel
            .dots
            .iter()
            .position(|dot| dom.contains(*dot, target))
        {
            msgs.push(Msg::Carousel(CarouselMsg::GoTo(index)));
        }
    }

    msgs
}

/// Keyboard shortcuts only apply while the lightbox is open
fn translate_key(key: &str, state: &AppState, bindings: &PageBindings) -> Vec<Msg> {
    if bindings.lightbox.is_none() || !state.lightbox.is_open() {
        return vec![];
    }

    match key {
        "Escape" => vec![Msg::Lightbox(LightboxMsg::Close)],
        "ArrowLeft" => vec![Msg::Lightbox(LightboxMsg::Previous)],
        "ArrowRight" => vec![Msg::Lightbox(LightboxMsg::Next)],
        _ => vec![],
    }
}
