//! One-time resolution of the markup contract into bound widgets
//!
//! Every widget resolves its own elements. A widget whose required elements
//! are missing is left unbound and the rest of the page keeps working.

use crate::domain::media::ImageRef;
use crate::infrastructure::dom::{Dom, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeBindings {
    /// Element carrying `data-theme`
    pub root: NodeId,
    pub toggle: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBindings {
    pub hamburger: NodeId,
    pub container: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollBindings {
    pub header: Option<NodeId>,
    /// Observed sections with their ids, in document order
    pub sections: Vec<(NodeId, String)>,
    /// Navigation links with their `href`
    pub nav_links: Vec<(NodeId, String)>,
    pub reveal: Vec<NodeId>,
}

impl ScrollBindings {
    /// Section ids a navigation link points at
    pub fn nav_targets(&self) -> Vec<String> {
        self.nav_links
            .iter()
            .filter_map(|(_, href)| href.strip_prefix('#'))
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn link_for_section(&self, section_id: &str) -> Option<NodeId> {
        self.nav_links
            .iter()
            .find(|(_, href)| href.strip_prefix('#') == Some(section_id))
            .map(|(node, _)| *node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxBindings {
    pub gallery: NodeId,
    /// Gallery `img` elements in order; positions match `images`
    pub thumbnails: Vec<NodeId>,
    pub images: Vec<ImageRef>,
    pub overlay: NodeId,
    pub content: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
    pub close: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselBindings {
    pub viewport: NodeId,
    pub stage: NodeId,
    pub slide_count: usize,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub dots: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBindings {
    pub form: NodeId,
    pub status: Option<NodeId>,
    /// Named controls in document order
    pub fields: Vec<(String, NodeId)>,
}

impl FormBindings {
    pub fn field(&self, name: &str) -> Option<NodeId> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, node)| *node)
    }
}

/// Resolved markup for every widget on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBindings {
    pub body: Option<NodeId>,
    pub theme: ThemeBindings,
    pub nav: Option<NavBindings>,
    pub scroll: ScrollBindings,
    pub lightbox: Option<LightboxBindings>,
    pub carousel: Option<CarouselBindings>,
    pub form: Option<FormBindings>,
}

impl PageBindings {
    /// Resolve every widget once. The carousel restructures its markup here:
    /// slides move into a `.testimonial-stage` and one `button.test-dot` is
    /// created per slide.
    pub fn resolve<D: Dom>(dom: &mut D) -> Self {
        let bindings = Self {
            body: dom.body(),
            theme: resolve_theme(dom),
            nav: resolve_nav(dom),
            scroll: resolve_scroll(dom),
            lightbox: resolve_lightbox(dom),
            carousel: resolve_carousel(dom),
            form: resolve_form(dom),
        };
        tracing::info!(
            nav = bindings.nav.is_some(),
            lightbox = bindings.lightbox.is_some(),
            carousel = bindings.carousel.is_some(),
            form = bindings.form.is_some(),
            sections = bindings.scroll.sections.len(),
            "page bound"
        );
        bindings
    }

    pub fn images(&self) -> Vec<ImageRef> {
        self.lightbox
            .as_ref()
            .map(|lightbox| lightbox.images.clone())
            .unwrap_or_default()
    }

    pub fn slide_count(&self) -> usize {
        self.carousel
            .as_ref()
            .map_or(0, |carousel| carousel.slide_count)
    }
}

fn required<D: Dom>(dom: &D, widget: &str, id: &str) -> Option<NodeId> {
    let node = dom.element_by_id(id);
    if node.is_none() {
        tracing::debug!(widget, id, "required element missing, widget disabled");
    }
    node
}

fn resolve_theme<D: Dom>(dom: &D) -> ThemeBindings {
    let toggle = dom.element_by_id("theme-toggle");
    if toggle.is_none() {
        tracing::debug!("theme toggle missing, theme applies without a control");
    }
    ThemeBindings {
        root: dom.root(),
        toggle,
    }
}

fn resolve_nav<D: Dom>(dom: &D) -> Option<NavBindings> {
    Some(NavBindings {
        hamburger: required(dom, "nav", "hamburger-menu")?,
        container: required(dom, "nav", "nav-links")?,
    })
}

fn resolve_scroll<D: Dom>(dom: &D) -> ScrollBindings {
    let root = dom.root();
    let header = dom.descendants_with_tag(root, "header").into_iter().next();
    if header.is_none() {
        tracing::debug!("header missing, scrolled state is not shown");
    }

    let sections = dom
        .descendants_with_tag(root, "section")
        .into_iter()
        .filter_map(|node| dom.attribute(node, "id").map(|id| (node, id)))
        .collect();

    let nav_links = dom
        .descendants_with_class(root, "nav-links")
        .into_iter()
        .flat_map(|container| dom.descendants_with_tag(container, "a"))
        .map(|link| (link, dom.attribute(link, "href").unwrap_or_default()))
        .collect();

    ScrollBindings {
        header,
        sections,
        nav_links,
        reveal: dom.descendants_with_class(root, "reveal"),
    }
}

fn resolve_lightbox<D: Dom>(dom: &D) -> Option<LightboxBindings> {
    let gallery = required(dom, "lightbox", "gallery")?;
    let overlay = required(dom, "lightbox", "lightbox")?;
    let content = required(dom, "lightbox", "lightbox-content")?;
    let prev = required(dom, "lightbox", "lightbox-prev")?;
    let next = required(dom, "lightbox", "lightbox-next")?;
    let close = required(dom, "lightbox", "lightbox-close")?;

    let thumbnails = dom.descendants_with_tag(gallery, "img");
    let images = thumbnails
        .iter()
        .map(|img| {
            ImageRef::new(
                dom.attribute(*img, "src").unwrap_or_default(),
                dom.attribute(*img, "alt").unwrap_or_default(),
            )
        })
        .collect();

    Some(LightboxBindings {
        gallery,
        thumbnails,
        images,
        overlay,
        content,
        prev,
        next,
        close,
    })
}

fn resolve_carousel<D: Dom>(dom: &mut D) -> Option<CarouselBindings> {
    let viewport = required(dom, "carousel", "testimonial-viewport")?;

    let slides = dom.descendants_with_class(viewport, "testimonial-slide");
    let stage = dom.create_element("div");
    dom.add_class(stage, "testimonial-stage");
    for slide in &slides {
        dom.append_child(stage, *slide);
    }
    dom.clear_children(viewport);
    dom.append_child(viewport, stage);

    let root = dom.root();
    let prev = dom.first_with_class(root, "test-prev");
    let next = dom.first_with_class(root, "test-next");

    let dots = match dom.element_by_id("testimonial-dots") {
        Some(container) => {
            dom.clear_children(container);
            (0..slides.len())
                .map(|_| {
                    let dot = dom.create_element("button");
                    dom.add_class(dot, "test-dot");
                    dom.append_child(container, dot);
                    dot
                })
                .collect()
        }
        None => {
            tracing::debug!("carousel dots container missing");
            Vec::new()
        }
    };

    Some(CarouselBindings {
        viewport,
        stage,
        slide_count: slides.len(),
        prev,
        next,
        dots,
    })
}

fn resolve_form<D: Dom>(dom: &D) -> Option<FormBindings> {
    let form = required(dom, "form", "contact-form")?;
    let status = dom.element_by_id("form-status");
    let fields = dom
        .descendants(form)
        .into_iter()
        .filter(|node| matches!(dom.tag(*node), Some("input" | "textarea" | "select")))
        .filter_map(|node| dom.attribute(node, "name").map(|name| (name, node)))
        .collect();

    Some(FormBindings {
        form,
        status,
        fields,
    })
}
