//! Serializable description of the page markup
//!
//! The widgets bind to a fixed structure of ids and classes. [`PageMarkup`]
//! describes the variable parts of that structure (sections, links, gallery
//! images, testimonials, form fields) and [`build_document`] lays it out as
//! a [`MemoryDom`] with the ids and classes the bindings expect.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{geometry::Span, media::ImageRef};
use crate::infrastructure::dom::{Dom, MemoryDom, NodeId};

#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("failed to read markup file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid markup description: {0}")]
    Parse(#[from] json5::Error),

    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMarkup {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default)]
    pub nav_links: Vec<LinkMarkup>,
    #[serde(default)]
    pub sections: Vec<SectionMarkup>,
}

fn default_viewport_height() -> f64 {
    800.0
}

fn default_header_height() -> f64 {
    80.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMarkup {
    pub href: String,
    pub label: String,
}

impl LinkMarkup {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMarkup {
    pub id: String,
    #[serde(default = "default_section_height")]
    pub height: f64,
    /// Fades in once the page has loaded
    #[serde(default)]
    pub reveal: bool,
    /// Links rendered inside the section (e.g. call-to-action anchors)
    #[serde(default)]
    pub links: Vec<LinkMarkup>,
    #[serde(default)]
    pub content: Option<SectionContent>,
}

fn default_section_height() -> f64 {
    900.0
}

impl SectionMarkup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            height: default_section_height(),
            reveal: false,
            links: Vec::new(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: SectionContent) -> Self {
        self.content = Some(content);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Gallery { images: Vec<ImageRef> },
    Testimonials { quotes: Vec<String> },
    ContactForm { fields: Vec<FieldMarkup> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Input,
    Textarea,
    Select,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMarkup {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Initial value, restored on form reset
    #[serde(default)]
    pub value: String,
}

impl FieldMarkup {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
        }
    }
}

impl PageMarkup {
    pub fn from_json5(raw: &str) -> Result<Self, MarkupError> {
        Ok(json5::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, MarkupError> {
        Self::from_json5(&std::fs::read_to_string(path)?)
    }

    /// The studio landing page: hero, services, gallery, testimonials, contact
    pub fn sample() -> Self {
        let sections = vec![
            SectionMarkup {
                reveal: true,
                links: vec![LinkMarkup::new("#contact", "Start a project")],
                ..SectionMarkup::new("home")
            },
            SectionMarkup {
                reveal: true,
                ..SectionMarkup::new("services")
            },
            SectionMarkup::new("gallery-section").with_content(SectionContent::Gallery {
                images: vec![
                    ImageRef::new("/img/work-1.jpg", "Brand identity for a coffee roaster"),
                    ImageRef::new("/img/work-2.jpg", "Storefront signage"),
                    ImageRef::new("/img/work-3.jpg", "Packaging system"),
                ],
            }),
            SectionMarkup::new("testimonials").with_content(SectionContent::Testimonials {
                quotes: vec![
                    "They understood our brand better than we did.".to_string(),
                    "Fast, thoughtful and a pleasure to work with.".to_string(),
                    "Our bookings doubled after the relaunch.".to_string(),
                ],
            }),
            SectionMarkup::new("contact").with_content(SectionContent::ContactForm {
                fields: vec![
                    FieldMarkup {
                        value: "contact".to_string(),
                        ..FieldMarkup::new("form-name", FieldKind::Hidden)
                    },
                    FieldMarkup::new("name", FieldKind::Input),
                    FieldMarkup::new("email", FieldKind::Input),
                    FieldMarkup::new("service", FieldKind::Select),
                    FieldMarkup::new("message", FieldKind::Textarea),
                ],
            }),
        ];

        Self {
            viewport_height: default_viewport_height(),
            header_height: default_header_height(),
            nav_links: vec![
                LinkMarkup::new("#home", "Home"),
                LinkMarkup::new("#services", "Services"),
                LinkMarkup::new("#gallery-section", "Work"),
                LinkMarkup::new("#testimonials", "Clients"),
                LinkMarkup::new("#contact", "Contact"),
            ],
            sections,
        }
    }
}

/// Lay out `markup` as a document. Sections stack from the top of the page.
pub fn build_document(markup: &PageMarkup) -> Result<MemoryDom, MarkupError> {
    let mut seen = std::collections::HashSet::new();
    for section in &markup.sections {
        if !seen.insert(section.id.as_str()) {
            return Err(MarkupError::DuplicateSection(section.id.clone()));
        }
    }

    let mut dom = MemoryDom::new();
    dom.set_viewport_height(markup.viewport_height);
    let body = dom.body().unwrap_or(dom.root());

    let header = dom.append_element(body, "header", None, &[]);
    dom.set_layout(header, Span::new(0.0, markup.header_height));
    let nav = dom.append_element(header, "nav", None, &[]);
    let hamburger = dom.append_element(nav, "button", Some("hamburger-menu"), &["hamburger"]);
    dom.set_attribute(hamburger, "aria-expanded", "false");
    let list = dom.append_element(nav, "ul", Some("nav-links"), &["nav-links"]);
    for link in &markup.nav_links {
        let item = dom.append_element(list, "li", None, &[]);
        append_link(&mut dom, item, link);
    }
    let toggle = dom.append_element(header, "button", Some("theme-toggle"), &["theme-toggle"]);
    dom.set_attribute(toggle, "aria-label", "Switch to dark theme");

    let main = dom.append_element(body, "main", None, &[]);
    let mut top = 0.0;
    let mut has_gallery = false;
    for section in &markup.sections {
        let node = dom.append_element(main, "section", Some(&section.id), &[]);
        if section.reveal {
            dom.add_class(node, "reveal");
        }
        dom.set_layout(node, Span::new(top, section.height));
        top += section.height;

        for link in &section.links {
            append_link(&mut dom, node, link);
        }

        match &section.content {
            Some(SectionContent::Gallery { images }) => {
                append_gallery(&mut dom, node, images);
                has_gallery = true;
            }
            Some(SectionContent::Testimonials { quotes }) => {
                append_testimonials(&mut dom, node, quotes);
            }
            Some(SectionContent::ContactForm { fields }) => {
                append_contact_form(&mut dom, node, fields);
            }
            None => {}
        }
    }

    if has_gallery {
        append_lightbox(&mut dom, body);
    }

    Ok(dom)
}

fn append_link(dom: &mut MemoryDom, parent: NodeId, link: &LinkMarkup) -> NodeId {
    let anchor = dom.append_element(parent, "a", None, &[]);
    dom.set_attribute(anchor, "href", &link.href);
    dom.set_text(anchor, &link.label);
    anchor
}

fn append_gallery(dom: &mut MemoryDom, parent: NodeId, images: &[ImageRef]) {
    let gallery = dom.append_element(parent, "div", Some("gallery"), &["gallery"]);
    for image in images {
        let item = dom.append_element(gallery, "figure", None, &["gallery-item"]);
        let img = dom.append_element(item, "img", None, &[]);
        dom.set_attribute(img, "src", &image.src);
        dom.set_attribute(img, "alt", &image.alt);
    }
}

fn append_lightbox(dom: &mut MemoryDom, body: NodeId) {
    let overlay = dom.append_element(body, "div", Some("lightbox"), &["lightbox"]);
    dom.set_attribute(overlay, "aria-hidden", "true");
    dom.append_element(overlay, "button", Some("lightbox-close"), &["lightbox-close"]);
    dom.append_element(overlay, "button", Some("lightbox-prev"), &["lightbox-prev"]);
    dom.append_element(overlay, "div", Some("lightbox-content"), &["lightbox-content"]);
    dom.append_element(overlay, "button", Some("lightbox-next"), &["lightbox-next"]);
}

fn append_testimonials(dom: &mut MemoryDom, parent: NodeId, quotes: &[String]) {
    let carousel = dom.append_element(parent, "div", None, &["testimonial-carousel"]);
    dom.append_element(carousel, "button", None, &["test-prev"]);
    let viewport = dom.append_element(
        carousel,
        "div",
        Some("testimonial-viewport"),
        &["testimonial-viewport"],
    );
    for quote in quotes {
        let slide = dom.append_element(viewport, "blockquote", None, &["testimonial-slide"]);
        dom.set_text(slide, quote);
    }
    dom.append_element(carousel, "button", None, &["test-next"]);
    dom.append_element(carousel, "div", Some("testimonial-dots"), &["testimonial-dots"]);
}

fn append_contact_form(dom: &mut MemoryDom, parent: NodeId, fields: &[FieldMarkup]) {
    let form = dom.append_element(parent, "form", Some("contact-form"), &["contact-form"]);
    for field in fields {
        let (container, tag) = match field.kind {
            FieldKind::Hidden => (form, "input"),
            FieldKind::Input => (dom.append_element(form, "div", None, &["form-group"]), "input"),
            FieldKind::Textarea => (
                dom.append_element(form, "div", None, &["form-group"]),
                "textarea",
            ),
            FieldKind::Select => (
                dom.append_element(form, "div", None, &["form-group"]),
                "select",
            ),
        };
        let control = dom.append_element(container, tag, None, &[]);
        dom.set_attribute(control, "name", &field.name);
        if field.kind == FieldKind::Hidden {
            dom.set_attribute(control, "type", "hidden");
        }
        if !field.value.is_empty() {
            dom.set_attribute(control, "value", &field.value);
        }
        dom.set_value(control, &field.value);
        if container != form {
            dom.append_element(container, "span", None, &["field-error"]);
        }
    }
    let submit = dom.append_element(form, "button", None, &[]);
    dom.set_attribute(submit, "type", "submit");
    dom.append_element(form, "p", Some("form-status"), &["form-status"]);
}
