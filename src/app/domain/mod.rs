//! Domain layer - core data structures and types.
//!
//! - Document (the editable surface) and spelling types
//! - Correction service results
//! - Application settings
//! - Message types for the event system

pub mod correction;
pub mod document;
pub mod messages;
pub mod settings;
pub mod spelling;

pub use correction::CorrectionResult;
pub use document::Document;
pub use messages::Message;
pub use settings::{AppSettings, SpellCheckConfig, ThemeMode};
pub use spelling::{ErrorSet, Span, SpellError};
