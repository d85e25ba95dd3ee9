//! Test doubles and page fixtures shared by unit and integration tests

use std::sync::{Arc, Mutex};

use color_eyre::eyre::Result;
use futures::future::{self, BoxFuture, FutureExt};

use crate::{
    core::raw_msg::RawMsg,
    infrastructure::{
        config::Config,
        dom::{Dom, MemoryDom, NodeId},
        markup::{build_document, PageMarkup},
        storage::{MemoryStore, PreferenceStore, StoreError},
        transport::{FormTransport, TransportError},
    },
    integration::page_runtime::PageRuntime,
};

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
enum Reply {
    Status(u16),
    Failure(String),
}

/// Transport that records every post and answers with a canned reply
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn responding(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Arc::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Reply::Failure(reason.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

impl FormTransport for MockTransport {
    fn post_form(&self, path: &str, body: String) -> BoxFuture<'static, Result<u16, TransportError>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                path: path.to_string(),
                body,
            });
        }
        let reply = match &self.reply {
            Reply::Status(status) => Ok(*status),
            Reply::Failure(reason) => Err(TransportError::Unreachable(reason.clone())),
        };
        future::ready(reply).boxed()
    }
}

/// Store whose every operation fails, like storage disabled by the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

/// Runtime over the sample page, not yet started
pub fn sample_runtime(
    store: impl PreferenceStore + 'static,
    transport: MockTransport,
) -> Result<PageRuntime<MemoryDom>> {
    runtime_for(&PageMarkup::sample(), store, transport)
}

pub fn runtime_for(
    markup: &PageMarkup,
    store: impl PreferenceStore + 'static,
    transport: MockTransport,
) -> Result<PageRuntime<MemoryDom>> {
    let dom = build_document(markup)?;
    Ok(PageRuntime::new(
        dom,
        &Config::default(),
        Box::new(store),
        Arc::new(transport),
    ))
}

/// Started runtime over the sample page with an empty memory store
pub fn started_sample_runtime(transport: MockTransport) -> Result<PageRuntime<MemoryDom>> {
    let mut runtime = sample_runtime(MemoryStore::new(), transport)?;
    runtime.start()?;
    Ok(runtime)
}

/// Element by id, failing the test when absent
pub fn node(dom: &MemoryDom, id: &str) -> NodeId {
    match dom.element_by_id(id) {
        Some(node) => node,
        None => panic!("no element with id {id}"),
    }
}

/// Type into a named contact form field
pub fn fill_field(runtime: &mut PageRuntime<MemoryDom>, name: &str, value: &str) -> Result<()> {
    let Some(field) = runtime
        .bindings()
        .form
        .as_ref()
        .and_then(|form| form.field(name))
    else {
        panic!("no form field named {name}");
    };
    runtime.dispatch_raw(RawMsg::Input {
        node: field,
        value: value.to_string(),
    })
}

/// Text of the inline error slot next to a named field
pub fn field_error(runtime: &PageRuntime<MemoryDom>, name: &str) -> String {
    let dom = runtime.dom();
    runtime
        .bindings()
        .form
        .as_ref()
        .and_then(|form| form.field(name))
        .and_then(|field| dom.closest(field, |d, n| d.has_class(n, "form-group")))
        .and_then(|group| dom.first_with_class(group, "field-error"))
        .map(|slot| dom.text(slot))
        .unwrap_or_default()
}

pub fn form_status(runtime: &PageRuntime<MemoryDom>) -> String {
    runtime
        .bindings()
        .form
        .as_ref()
        .and_then(|form| form.status)
        .map(|status| runtime.dom().text(status))
        .unwrap_or_default()
}
