//! Infrastructure layer
//!
//! This module handles the capabilities the widgets depend on:
//! - Document access and markup construction
//! - Preference persistence
//! - Autoplay timing
//! - Form submission transport
//! - Section visibility detection
//! - CLI argument processing and configuration

pub mod autoplay;
pub mod cli;
pub mod config;
pub mod dom;
pub mod markup;
pub mod storage;
pub mod transport;
pub mod visibility;
