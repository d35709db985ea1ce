//! Foundation types for LECTERN.
//!
//! This crate contains the toolkit-agnostic types shared by the LECTERN
//! crates: container-local geometry, the outline tree, document and chrome
//! event enums, configuration, and error types.

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod outline;
