//! Controllers layer - orchestration and coordination.
//!
//! Controllers coordinate between domain models, services and the UI:
//! - Spell checking (whole-document correction, underlines, suggestions)

pub mod spelling;
