//! Infrastructure layer - external integrations and utilities.
//!
//! - FLTK buffer access without leaking
//! - Platform theme detection
//! - Error types

pub mod buffer;
pub mod error;
pub mod platform;
