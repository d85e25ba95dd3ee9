//! # Pagewire - interaction layer for a marketing page
//!
//! Theme persistence, mobile navigation, scroll-spy, an image lightbox, a
//! testimonial carousel and contact form validation/submission, bound to one
//! fixed page structure. This library implements an Elm-like architecture for
//! predictable state management.
//!
//! ## Architecture Overview
//!
//! - **Raw events** (`core::raw_msg`): what the page host reports
//! - **Translation** (`core::translator`): raw events to domain messages
//! - **Message** (`core::msg`): per-widget intent
//! - **Model** (`core::state`): one small state struct per widget
//! - **Update** (`core::update`): pure transitions producing commands
//! - **Command** (`core::cmd`): side effects on the document, the preference
//!   store, the autoplay timer and the submission endpoint
//!
//! ## Example Usage
//!
//! ```rust
//! use pagewire::core::{
//!     cmd::Cmd,
//!     msg::{lightbox::LightboxMsg, Msg},
//!     state::AppState,
//!     update::update,
//! };
//! use pagewire::domain::media::ImageRef;
//!
//! let state = AppState::default().with_images(vec![
//!     ImageRef::new("a.jpg", "First"),
//!     ImageRef::new("b.jpg", "Second"),
//! ]);
//!
//! let (state, cmds) = update(Msg::Lightbox(LightboxMsg::Open(1)), state);
//! assert!(state.lightbox.is_open());
//! assert!(cmds.contains(&Cmd::ShowLightbox));
//!
//! // Index arithmetic wraps around
//! let (state, _) = update(Msg::Lightbox(LightboxMsg::Next), state);
//! assert_eq!(state.lightbox.current_index(), 0);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Elm architecture: messages, state, update, commands
//! - [`domain`] - Widget-independent values and rules
//! - [`infrastructure`] - Document, storage, timer, transport and config
//! - [`integration`] - Markup binding and the page runtime
//! - [`utils`] - Logging, panic handling and paths

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod test_helpers;
pub mod utils;

// Re-exports for convenience
pub use crate::core::cmd::Cmd;
pub use crate::core::msg::Msg;
pub use crate::core::raw_msg::RawMsg;
pub use crate::core::state::AppState;
pub use crate::core::translator::translate_raw_to_domain;
pub use crate::core::update::update;
pub use crate::integration::page_runtime::PageRuntime;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
