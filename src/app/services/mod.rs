//! Services layer - business operations and utilities.
//!
//! - File reading and writing
//! - The correction service client
//! - Span marking over an editing surface
//! - Text offsets and word boundaries

pub mod files;
pub mod spell_api;
pub mod spell_check;
pub mod text_ops;
