//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, spelling errors, Settings, Messages)
//! - `controllers/` - Orchestration (spell check, suggestions)
//! - `services/` - Business operations (files, correction client, text_ops)
//! - `infrastructure/` - External integrations (FLTK buffer, platform, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::spelling::{SpellCheckOutcome, SpellController, SuggestionGate};
pub use domain::{AppSettings, CorrectionResult, Document, ErrorSet, Message, ThemeMode};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::{detect_system_dark_mode, resolve_dark_mode};
pub use services::spell_api::{CorrectionSource, HttpCorrectionSource};
pub use services::spell_check::{EditSurface, Notifier};
