//! Core Elm Architecture implementation
//!
//! This module contains the core components of the Elm architecture:
//! - Raw page events and domain messages
//! - Per-widget state and the update function
//! - Commands and their execution against the page
//! - Message translation layer

pub mod cmd;
pub mod cmd_executor;
pub mod msg;
pub mod raw_msg;
pub mod state;
pub mod translator;
pub mod update;
