use std::time::Duration;

use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;

use pagewire::{
    core::raw_msg::RawMsg,
    infrastructure::dom::{Dom, MemoryDom},
    test_helpers::{
        field_error, fill_field, form_status, node, started_sample_runtime, MockTransport,
    },
    PageRuntime,
};

const REQUIRED: [&str; 4] = ["name", "email", "service", "message"];

fn submit(runtime: &mut PageRuntime<MemoryDom>) -> Result<()> {
    let form = node(runtime.dom(), "contact-form");
    runtime.dispatch_raw(RawMsg::Submit(form))
}

fn fill_valid(runtime: &mut PageRuntime<MemoryDom>) -> Result<()> {
    fill_field(runtime, "name", "Ada Lovelace")?;
    fill_field(runtime, "email", "ada@example.com")?;
    fill_field(runtime, "service", "branding")?;
    fill_field(runtime, "message", "Hello & welcome")?;
    Ok(())
}

fn value(runtime: &PageRuntime<MemoryDom>, name: &str) -> String {
    let field = runtime
        .bindings()
        .form
        .as_ref()
        .and_then(|form| form.field(name))
        .expect("field bound");
    runtime.dom().value(field)
}

fn aria_invalid(runtime: &PageRuntime<MemoryDom>, name: &str) -> Option<String> {
    let field = runtime
        .bindings()
        .form
        .as_ref()
        .and_then(|form| form.field(name))
        .expect("field bound");
    runtime.dom().attribute(field, "aria-invalid")
}

/// Let the background submission report back
async fn settle(runtime: &mut PageRuntime<MemoryDom>) -> Result<()> {
    runtime.run_for(Duration::from_millis(10)).await
}

#[tokio::test(start_paused = true)]
async fn test_all_required_blank_shows_four_errors_without_request() -> Result<()> {
    let transport = MockTransport::responding(200);
    let mut runtime = started_sample_runtime(transport.clone())?;

    submit(&mut runtime)?;
    settle(&mut runtime).await?;

    for name in REQUIRED {
        assert_eq!(field_error(&runtime, name), "This field is required.");
        assert_eq!(aria_invalid(&runtime, name).as_deref(), Some("true"));
    }
    assert_eq!(runtime.state().form.errors.len(), 4);
    assert_eq!(form_status(&runtime), "");
    assert_eq!(transport.request_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_malformed_email_is_the_only_error() -> Result<()> {
    let transport = MockTransport::responding(200);
    let mut runtime = started_sample_runtime(transport.clone())?;
    fill_valid(&mut runtime)?;
    fill_field(&mut runtime, "email", "not-an-email")?;

    submit(&mut runtime)?;
    settle(&mut runtime).await?;

    assert_eq!(runtime.state().form.errors.len(), 1);
    assert_eq!(
        field_error(&runtime, "email"),
        "Please enter a valid email address."
    );
    assert_eq!(field_error(&runtime, "name"), "");
    assert_eq!(transport.request_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_errors_clear_on_next_attempt() -> Result<()> {
    let transport = MockTransport::responding(200);
    let mut runtime = started_sample_runtime(transport.clone())?;

    submit(&mut runtime)?;
    fill_valid(&mut runtime)?;
    submit(&mut runtime)?;

    for name in REQUIRED {
        assert_eq!(field_error(&runtime, name), "");
        assert_eq!(aria_invalid(&runtime, name), None);
    }
    assert_eq!(form_status(&runtime), "Sending...");
    settle(&mut runtime).await?;
    assert_eq!(transport.request_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_success_posts_encoded_body_and_resets() -> Result<()> {
    let transport = MockTransport::responding(200);
    let mut runtime = started_sample_runtime(transport.clone())?;
    fill_valid(&mut runtime)?;

    submit(&mut runtime)?;
    assert_eq!(form_status(&runtime), "Sending...");
    settle(&mut runtime).await?;

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/");
    assert_eq!(
        requests[0].body,
        "form-name=contact&name=Ada+Lovelace&email=ada%40example.com&service=branding&message=Hello+%26+welcome"
    );

    assert_eq!(form_status(&runtime), "Thanks! Your message has been sent.");
    for name in REQUIRED {
        assert_eq!(value(&runtime, name), "");
    }
    // Reset restores markup values, not blanks
    assert_eq!(value(&runtime, "form-name"), "contact");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_server_error_keeps_fields() -> Result<()> {
    let transport = MockTransport::responding(500);
    let mut runtime = started_sample_runtime(transport.clone())?;
    fill_valid(&mut runtime)?;

    submit(&mut runtime)?;
    settle(&mut runtime).await?;

    assert_eq!(transport.request_count(), 1);
    assert_eq!(
        form_status(&runtime),
        "Sorry, there was an error. Please try again."
    );
    assert_eq!(value(&runtime, "name"), "Ada Lovelace");
    assert_eq!(value(&runtime, "email"), "ada@example.com");
    assert!(!runtime.state().form.in_flight);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_reports_generic_status() -> Result<()> {
    let transport = MockTransport::failing("connection refused");
    let mut runtime = started_sample_runtime(transport.clone())?;
    fill_valid(&mut runtime)?;

    submit(&mut runtime)?;
    settle(&mut runtime).await?;

    assert_eq!(
        form_status(&runtime),
        "Sorry, there was an error. Please try again."
    );
    assert_eq!(value(&runtime, "message"), "Hello & welcome");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_outcome_after_shutdown_is_dropped() -> Result<()> {
    let transport = MockTransport::responding(200);
    let mut runtime = started_sample_runtime(transport.clone())?;
    fill_valid(&mut runtime)?;

    submit(&mut runtime)?;
    runtime.shutdown();
    settle(&mut runtime).await?;

    assert_eq!(transport.request_count(), 1);
    assert_eq!(form_status(&runtime), "Sending...");
    assert_eq!(value(&runtime, "name"), "Ada Lovelace");
    Ok(())
}
