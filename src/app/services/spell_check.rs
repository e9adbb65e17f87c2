//! Span marking and replacement over an abstract editing surface.
//!
//! The FLTK-backed `Document` implements `EditSurface`; tests use an
//! in-memory surface so none of this needs a display.

use crate::app::domain::spelling::{ErrorSet, Span};

pub const SPELL_CHECK_TITLE: &str = "Spell Check";
pub const API_ERROR_TITLE: &str = "API Error";
pub const NO_CORRECTIONS_MESSAGE: &str = "No corrections made or error in spell checking.";

/// The editable text plus its presentation layer.
pub trait EditSurface {
    fn text(&self) -> String;

    /// Replace the whole document. Drops every mark.
    fn set_text(&mut self, text: &str);

    /// Bumped on every modification of the text.
    fn revision(&self) -> u64;

    /// Style `[span.start, span.end)` as misspelled. Presentation only.
    fn mark_span(&mut self, span: Span);

    /// Style several spans in one pass.
    fn mark_spans(&mut self, spans: &[Span]) {
        for span in spans {
            self.mark_span(*span);
        }
    }

    fn clear_marks(&mut self);

    /// Replace the characters in `span` with `replacement` as one edit.
    fn replace_span(&mut self, span: Span, replacement: &str);
}

/// User-facing messages.
pub trait Notifier {
    fn info(&mut self, title: &str, message: &str);
    fn warn(&mut self, title: &str, message: &str);
}

/// Mark every error of a current set, in order. A set computed against an
/// older revision is left alone.
pub fn highlight_errors<S: EditSurface + ?Sized>(surface: &mut S, errors: &ErrorSet) -> usize {
    if !errors.is_current(surface.revision()) {
        tracing::warn!(
            set_revision = errors.revision(),
            document_revision = surface.revision(),
            "not highlighting stale spelling errors"
        );
        return 0;
    }
    let spans: Vec<Span> = errors.errors().iter().map(|e| e.span()).collect();
    surface.mark_spans(&spans);
    errors.len()
}

pub fn failure_message(error: &impl std::fmt::Display) -> String {
    format!("API request failed: {}", error)
}
