//! Integration layer
//!
//! This module wires the core loop to a concrete page:
//! - Markup binding
//! - Event sources (live channel or replay script)
//! - The page runtime

pub mod bindings;
pub mod event_source;
pub mod page_runtime;
pub mod script;
