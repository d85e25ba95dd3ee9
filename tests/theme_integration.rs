use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;

use pagewire::{
    core::raw_msg::RawMsg,
    domain::theme::Theme,
    infrastructure::{
        dom::{Dom, MemoryDom},
        storage::{FileStore, MemoryStore, PreferenceStore},
    },
    test_helpers::{node, sample_runtime, FailingStore, MockTransport},
    PageRuntime,
};

fn toggle_label(runtime: &PageRuntime<MemoryDom>) -> String {
    let toggle = node(runtime.dom(), "theme-toggle");
    runtime
        .dom()
        .attribute(toggle, "aria-label")
        .unwrap_or_default()
}

fn data_theme(runtime: &PageRuntime<MemoryDom>) -> Option<String> {
    let dom = runtime.dom();
    dom.attribute(dom.root(), "data-theme")
}

#[tokio::test]
async fn test_toggle_twice_returns_to_original() -> Result<()> {
    let mut runtime = sample_runtime(MemoryStore::new(), MockTransport::responding(200))?;
    runtime.start()?;
    assert_eq!(runtime.state().theme.current, Theme::Light);
    assert_eq!(data_theme(&runtime).as_deref(), Some("light"));
    assert_eq!(toggle_label(&runtime), "Switch to dark theme");

    let toggle = node(runtime.dom(), "theme-toggle");
    runtime.dispatch_raw(RawMsg::Click(toggle))?;
    assert_eq!(runtime.state().theme.current, Theme::Dark);
    assert_eq!(toggle_label(&runtime), "Switch to light theme");
    assert!(runtime.dom().has_class(toggle, "dark-active"));

    runtime.dispatch_raw(RawMsg::Click(toggle))?;
    assert_eq!(runtime.state().theme.current, Theme::Light);
    assert_eq!(data_theme(&runtime).as_deref(), Some("light"));
    assert_eq!(toggle_label(&runtime), "Switch to dark theme");
    assert!(!runtime.dom().has_class(toggle, "dark-active"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_stored_value_falls_back_to_light() -> Result<()> {
    let store = MemoryStore::new().with_value("theme", "sepia");
    let mut runtime = sample_runtime(store, MockTransport::responding(200))?;
    runtime.start()?;
    assert_eq!(runtime.state().theme.current, Theme::Light);
    Ok(())
}

#[tokio::test]
async fn test_unavailable_storage_still_applies_theme() -> Result<()> {
    let mut runtime = sample_runtime(FailingStore, MockTransport::responding(200))?;
    runtime.start()?;

    let toggle = node(runtime.dom(), "theme-toggle");
    runtime.dispatch_raw(RawMsg::Click(toggle))?;
    assert_eq!(data_theme(&runtime).as_deref(), Some("dark"));
    Ok(())
}

#[tokio::test]
async fn test_choice_survives_restart_with_file_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("preferences.json");

    {
        let mut runtime =
            sample_runtime(FileStore::new(path.clone()), MockTransport::responding(200))?;
        runtime.start()?;
        let toggle = node(runtime.dom(), "theme-toggle");
        runtime.dispatch_raw(RawMsg::Click(toggle))?;
    }

    assert_eq!(
        FileStore::new(path.clone()).get("theme")?.as_deref(),
        Some("dark")
    );

    let mut runtime = sample_runtime(FileStore::new(path), MockTransport::responding(200))?;
    runtime.start()?;
    assert_eq!(runtime.state().theme.current, Theme::Dark);
    assert_eq!(toggle_label(&runtime), "Switch to light theme");
    Ok(())
}
