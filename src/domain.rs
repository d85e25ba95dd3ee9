//! Domain logic
//!
//! This module contains the widget-independent building blocks:
//! - Wraparound indexing shared by the lightbox and the carousel
//! - Theme values
//! - Contact form fields and validation rules
//! - Viewport geometry used by the scroll-spy
//! - Gallery image references

pub mod cycle;
pub mod form;
pub mod geometry;
pub mod media;
pub mod theme;
