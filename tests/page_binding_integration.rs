use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;

use pagewire::{
    core::raw_msg::RawMsg,
    domain::theme::Theme,
    infrastructure::{
        config::Config,
        dom::{Dom, MemoryDom},
        markup::{build_document, PageMarkup, SectionMarkup},
        storage::MemoryStore,
    },
    integration::{event_source::EventSource, script::parse_script},
    test_helpers::{node, runtime_for, started_sample_runtime, MockTransport},
    PageRuntime,
};

/// Only a hero section: no gallery, carousel or form in the markup
fn bare_page() -> PageMarkup {
    PageMarkup {
        sections: vec![SectionMarkup::new("home")],
        ..PageMarkup::sample()
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_widgets_leave_the_rest_working() -> Result<()> {
    let mut runtime = runtime_for(&bare_page(), MemoryStore::new(), MockTransport::responding(200))?;
    runtime.start()?;

    assert!(runtime.bindings().lightbox.is_none());
    assert!(runtime.bindings().carousel.is_none());
    assert!(runtime.bindings().form.is_none());
    assert!(!runtime.is_autoplaying());

    // Keys and ticks addressed to absent widgets are harmless
    runtime.dispatch_raw(RawMsg::KeyDown("Escape".to_string()))?;
    runtime.dispatch_raw(RawMsg::AutoplayTick)?;
    runtime.run_for(Duration::from_millis(6_000)).await?;

    let toggle = node(runtime.dom(), "theme-toggle");
    runtime.dispatch_raw(RawMsg::Click(toggle))?;
    assert_eq!(runtime.state().theme.current, Theme::Dark);

    let hamburger = node(runtime.dom(), "hamburger-menu");
    runtime.dispatch_raw(RawMsg::Click(hamburger))?;
    assert!(runtime.state().nav.menu_open);
    Ok(())
}

#[tokio::test]
async fn test_page_without_nav_still_binds_theme() -> Result<()> {
    let mut dom = build_document(&PageMarkup::sample())?;
    // Drop the hamburger: navigation is disabled, the rest binds
    let hamburger = node(&dom, "hamburger-menu");
    let parent = dom.parent(hamburger).expect("nav");
    let detached = dom.create_element("div");
    dom.append_child(detached, hamburger);
    assert!(dom.children(parent).iter().all(|child| *child != hamburger));

    let mut runtime: PageRuntime<MemoryDom> = PageRuntime::new(
        dom,
        &Config::default(),
        Box::new(MemoryStore::new()),
        Arc::new(MockTransport::responding(200)),
    );
    runtime.start()?;

    assert!(runtime.bindings().nav.is_none());
    assert!(runtime.bindings().lightbox.is_some());
    let toggle = node(runtime.dom(), "theme-toggle");
    runtime.dispatch_raw(RawMsg::Click(toggle))?;
    assert_eq!(runtime.state().theme.current, Theme::Dark);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_replay_script_end_to_end() -> Result<()> {
    let transport = MockTransport::responding(204);
    let mut runtime = started_sample_runtime(transport.clone())?;
    let script = parse_script(
        r##"[
            { event: "load" },
            { event: "click", target: "#theme-toggle" },
            { event: "click", target: ".gallery-item", index: 2 },
            { event: "key", key: "ArrowRight" },
            { event: "key", key: "Escape" },
            { event: "input", target: "[name=name]", value: "Grace" },
            { event: "input", target: "[name=email]", value: "grace@example.com" },
            { event: "input", target: "[name=service]", value: "web" },
            { event: "input", target: "[name=message]", value: "Hi" },
            { event: "submit", target: "#contact-form" },
            { event: "wait", ms: 50 },
        ]"##,
    )?;

    runtime.run(EventSource::script(script)).await?;

    assert_eq!(runtime.state().theme.current, Theme::Dark);
    assert!(!runtime.state().lightbox.is_open());
    assert_eq!(runtime.state().lightbox.current_index(), 0);
    assert_eq!(transport.request_count(), 1);

    let status = node(runtime.dom(), "form-status");
    assert_eq!(
        runtime.dom().text(status),
        "Thanks! Your message has been sent."
    );

    let snapshot = serde_json::to_string(&runtime.dom().snapshot())?;
    assert!(snapshot.contains("\"data-theme\":\"dark\""));
    assert!(snapshot.contains("revealed"));
    Ok(())
}
