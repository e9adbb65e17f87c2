use std::cell::Cell;
use std::rc::Rc;

use crate::app::domain::correction::CorrectionResult;
use crate::app::domain::spelling::{ErrorSet, Span};
use crate::app::services::spell_api::CorrectionSource;
use crate::app::services::spell_check::{
    API_ERROR_TITLE, EditSurface, NO_CORRECTIONS_MESSAGE, Notifier, SPELL_CHECK_TITLE,
    failure_message, highlight_errors,
};
use crate::app::services::text_ops::word_at;

#[derive(Debug, Clone, PartialEq)]
pub enum SpellCheckOutcome {
    /// The document text was replaced by the corrected version.
    Corrected,
    /// Errors were underlined; the count is how many.
    Flagged(usize),
    NothingToCorrect,
    Failed(String),
}

/// Suggestions for the word under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestions {
    pub span: Span,
    pub word: String,
    pub choices: Vec<String>,
}

/// Holds the errors from the last per-word check and drives the spell
/// check flows against an `EditSurface`.
#[derive(Debug, Default)]
pub struct SpellController {
    errors: Option<ErrorSet>,
}

impl SpellController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_set(&self) -> Option<&ErrorSet> {
        self.errors.as_ref()
    }

    /// Forget the current errors, e.g. when the document is replaced.
    pub fn discard(&mut self) {
        self.errors = None;
    }

    /// Remove all underlines and forget the errors behind them.
    pub fn clear<S: EditSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_marks();
        self.errors = None;
    }

    /// Send the whole document to `source` and apply whatever comes back.
    /// Blocks until the source answers.
    pub fn run_spell_check<S: EditSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        source: &dyn CorrectionSource,
        notifier: &mut dyn Notifier,
    ) -> SpellCheckOutcome {
        let text = surface.text();
        match source.check(&text) {
            Ok(CorrectionResult::WholeTextCorrection(corrected)) => {
                surface.set_text(&corrected);
                self.errors = None;
                SpellCheckOutcome::Corrected
            }
            Ok(CorrectionResult::ErrorList(records)) => {
                surface.clear_marks();
                let set = ErrorSet::from_records(&records, surface.revision());
                if set.is_empty() {
                    self.errors = None;
                    notifier.info(SPELL_CHECK_TITLE, "No spelling errors found.");
                    return SpellCheckOutcome::NothingToCorrect;
                }
                let count = highlight_errors(surface, &set);
                self.errors = Some(set);
                notifier.info(
                    SPELL_CHECK_TITLE,
                    &format!(
                        "{} possible spelling error(s) underlined.\nRight-click a word for suggestions.",
                        count
                    ),
                );
                SpellCheckOutcome::Flagged(count)
            }
            Ok(CorrectionResult::NoCorrection) => {
                notifier.info(SPELL_CHECK_TITLE, NO_CORRECTIONS_MESSAGE);
                SpellCheckOutcome::NothingToCorrect
            }
            Err(e) => {
                tracing::warn!(error = %e, "spell check request failed");
                notifier.warn(API_ERROR_TITLE, &failure_message(&e));
                SpellCheckOutcome::Failed(e.to_string())
            }
        }
    }

    /// Look up the word at character position `char_pos`. Only the first
    /// record with a matching `bad` text is consulted. Returns `None` when
    /// there is nothing to offer, including when the document has changed
    /// since the errors were computed.
    pub fn suggestions_at<S: EditSurface + ?Sized>(&self, surface: &S, char_pos: usize) -> Option<Suggestions> {
        let set = self.errors.as_ref()?;
        if !set.is_current(surface.revision()) {
            tracing::debug!(
                set_revision = set.revision(),
                document_revision = surface.revision(),
                "spelling errors are stale, no suggestions"
            );
            return None;
        }

        let text = surface.text();
        let (span, word) = word_at(&text, char_pos)?;
        let record = set.first_match(&word)?;
        if record.better.is_empty() {
            return None;
        }

        Some(Suggestions {
            span,
            word,
            choices: record.better.clone(),
        })
    }

    /// Replace `span` with the chosen suggestion and keep the remaining
    /// errors aligned with the edited text.
    pub fn apply_suggestion<S: EditSurface + ?Sized>(&mut self, surface: &mut S, span: Span, replacement: &str) {
        let was_current = self
            .errors
            .as_ref()
            .is_some_and(|set| set.is_current(surface.revision()));

        surface.replace_span(span, replacement);

        if let Some(set) = self.errors.as_mut() {
            if was_current {
                set.rebase_after_replace(span, replacement.chars().count(), surface.revision());
            }
        }
    }
}

/// Whether a right click can offer suggestions right now. Cheap to clone
/// into FLTK event handlers, which cannot reach the controller.
#[derive(Debug, Clone)]
pub struct SuggestionGate {
    set_revision: Rc<Cell<Option<u64>>>,
    document_revision: Rc<Cell<u64>>,
}

impl SuggestionGate {
    pub fn new(document_revision: Rc<Cell<u64>>) -> Self {
        Self {
            set_revision: Rc::new(Cell::new(None)),
            document_revision,
        }
    }

    /// Call after anything that may have replaced or dropped the error set.
    pub fn track(&self, spell: &SpellController) {
        self.set_revision.set(spell.error_set().map(ErrorSet::revision));
    }

    pub fn is_open(&self) -> bool {
        self.set_revision.get() == Some(self.document_revision.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::spell_check::testing::{MemorySurface, RecordingNotifier, StubSource};
    use serde_json::json;

    fn error_list_reply() -> serde_json::Value {
        json!({
            "status": true,
            "response": {
                "result": true,
                "errors": [
                    { "offset": 0, "bad": "Teh", "better": ["The", "Ten"] },
                    { "offset": 10, "bad": "jumpd", "better": ["jumped", "jump"] },
                    { "bad": "orphan", "better": [] }
                ]
            }
        })
    }

    #[test]
    fn test_well_formed_success_replaces_document_silently() {
        let mut surface = MemorySurface::new("I has a apple");
        let source = StubSource::replying(json!({
            "status": true,
            "response": { "corrected": "fixed text" }
        }));
        let mut notifier = RecordingNotifier::default();
        let mut spell = SpellController::new();

        let outcome = spell.run_spell_check(&mut surface, &source, &mut notifier);

        assert_eq!(outcome, SpellCheckOutcome::Corrected);
        assert_eq!(surface.text(), "fixed text");
        assert!(notifier.infos.is_empty());
        assert!(notifier.warnings.is_empty());
        assert_eq!(source.seen.borrow().as_slice(), ["I has a apple"]);
    }

    #[test]
    fn test_missing_corrected_leaves_document_and_informs() {
        let mut surface = MemorySurface::new("I has a apple");
        let source = StubSource::replying(json!({ "status": true, "response": {} }));
        let mut notifier = RecordingNotifier::default();
        let mut spell = SpellController::new();

        let outcome = spell.run_spell_check(&mut surface, &source, &mut notifier);

        assert_eq!(outcome, SpellCheckOutcome::NothingToCorrect);
        assert_eq!(surface.text(), "I has a apple");
        assert_eq!(notifier.infos.len(), 1);
        assert_eq!(notifier.infos[0].1, NO_CORRECTIONS_MESSAGE);
        assert!(notifier.warnings.is_empty());
    }

    #[test]
    fn test_status_false_leaves_document_and_informs() {
        let mut surface = MemorySurface::new("I has a apple");
        let source = StubSource::replying(json!({
            "status": false,
            "response": { "corrected": "I have an apple" }
        }));
        let mut notifier = RecordingNotifier::default();

        let outcome = SpellController::new().run_spell_check(&mut surface, &source, &mut notifier);

        assert_eq!(outcome, SpellCheckOutcome::NothingToCorrect);
        assert_eq!(surface.text(), "I has a apple");
        assert_eq!(notifier.infos.len(), 1);
    }

    #[test]
    fn test_transport_failure_warns_with_reason() {
        let mut surface = MemorySurface::new("I has a apple");
        let source = StubSource::failing("Connection refused (os error 111)");
        let mut notifier = RecordingNotifier::default();

        let outcome = SpellController::new().run_spell_check(&mut surface, &source, &mut notifier);

        assert!(matches!(outcome, SpellCheckOutcome::Failed(_)));
        assert_eq!(surface.text(), "I has a apple");
        assert_eq!(surface.revision(), 0);
        assert!(notifier.infos.is_empty());
        assert_eq!(notifier.warnings.len(), 1);
        assert_eq!(notifier.warnings[0].0, API_ERROR_TITLE);
        assert!(notifier.warnings[0].1.contains("Connection refused (os error 111)"));
    }

    #[test]
    fn test_error_list_highlights_well_formed_records() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let source = StubSource::replying(error_list_reply());
        let mut notifier = RecordingNotifier::default();
        let mut spell = SpellController::new();

        let outcome = spell.run_spell_check(&mut surface, &source, &mut notifier);

        assert_eq!(outcome, SpellCheckOutcome::Flagged(2));
        assert_eq!(surface.text(), "Teh quick jumpd over");
        assert_eq!(surface.marked_ranges(), vec![Span::new(0, 3), Span::new(10, 15)]);
        assert_eq!(spell.error_set().map(ErrorSet::len), Some(2));
        assert_eq!(notifier.infos.len(), 1);
    }

    #[test]
    fn test_empty_error_list_informs() {
        let mut surface = MemorySurface::new("All good here");
        let source = StubSource::replying(json!({ "status": true, "response": { "errors": [] } }));
        let mut notifier = RecordingNotifier::default();
        let mut spell = SpellController::new();

        let outcome = spell.run_spell_check(&mut surface, &source, &mut notifier);

        assert_eq!(outcome, SpellCheckOutcome::NothingToCorrect);
        assert!(spell.error_set().is_none());
        assert_eq!(notifier.infos.len(), 1);
    }

    #[test]
    fn test_whole_text_correction_discards_previous_errors() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut notifier = RecordingNotifier::default();
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut notifier);
        assert!(spell.error_set().is_some());

        let fix = StubSource::replying(json!({
            "status": true,
            "response": { "corrected": "The quick jumped over" }
        }));
        spell.run_spell_check(&mut surface, &fix, &mut notifier);

        assert!(spell.error_set().is_none());
        assert!(surface.marked_ranges().is_empty());
    }

    #[test]
    fn test_suggestions_for_word_under_cursor() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut RecordingNotifier::default());

        let found = spell.suggestions_at(&surface, 12).unwrap();
        assert_eq!(found.word, "jumpd");
        assert_eq!(found.span, Span::new(10, 15));
        assert_eq!(found.choices, vec!["jumped", "jump"]);

        assert!(spell.suggestions_at(&surface, 6).is_none());
        assert!(spell.suggestions_at(&surface, 3).is_some());
    }

    #[test]
    fn test_no_errors_no_suggestions() {
        let surface = MemorySurface::new("Teh quick");
        assert!(SpellController::new().suggestions_at(&surface, 1).is_none());
    }

    #[test]
    fn test_duplicate_bad_uses_first_record() {
        let mut surface = MemorySurface::new("teh cat and teh dog");
        let source = StubSource::replying(json!([
            { "offset": 0, "bad": "teh", "better": ["the"] },
            { "offset": 12, "bad": "teh", "better": ["tea"] }
        ]));
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &source, &mut RecordingNotifier::default());

        let found = spell.suggestions_at(&surface, 13).unwrap();
        assert_eq!(found.span, Span::new(12, 15));
        assert_eq!(found.choices, vec!["the"]);
    }

    #[test]
    fn test_apply_suggestion_is_single_edit_with_length_delta() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut RecordingNotifier::default());

        let found = spell.suggestions_at(&surface, 11).unwrap();
        let before = surface.text().chars().count();
        spell.apply_suggestion(&mut surface, found.span, "jumped");

        assert_eq!(surface.text(), "Teh quick jumped over");
        assert_eq!(surface.text().chars().count(), before + "jumped".len() - "jumpd".len());
        assert_eq!(surface.edits.len(), 1);
    }

    #[test]
    fn test_apply_suggestion_keeps_other_errors_reachable() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut RecordingNotifier::default());

        let first = spell.suggestions_at(&surface, 1).unwrap();
        spell.apply_suggestion(&mut surface, first.span, "The");
        assert_eq!(surface.text(), "The quick jumpd over");

        let second = spell.suggestions_at(&surface, 12).unwrap();
        assert_eq!(second.word, "jumpd");
        spell.apply_suggestion(&mut surface, second.span, "jumped");
        assert_eq!(surface.text(), "The quick jumped over");
        assert!(spell.error_set().unwrap().is_empty());
    }

    #[test]
    fn test_user_edit_makes_errors_stale() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut RecordingNotifier::default());

        // A keystroke the controller did not make
        surface.replace_span(Span::new(0, 0), "Oh ");

        assert!(spell.suggestions_at(&surface, 14).is_none());
        assert!(spell.suggestions_at(&surface, 4).is_none());
    }

    #[test]
    fn test_clear_removes_marks_and_errors() {
        let mut surface = MemorySurface::new("Teh quick jumpd over");
        let mut spell = SpellController::new();
        spell.run_spell_check(&mut surface, &StubSource::replying(error_list_reply()), &mut RecordingNotifier::default());

        spell.clear(&mut surface);

        assert!(surface.marked_ranges().is_empty());
        assert!(spell.error_set().is_none());
        assert_eq!(surface.text(), "Teh quick jumpd over");
    }

    #[test]
    fn test_suggestion_gate_follows_error_set_and_edits() {
        let mut surface = MemorySurface::new("Teh fox jumpd");
        let revision = Rc::new(Cell::new(surface.revision()));
        let gate = SuggestionGate::new(revision.clone());
        let mut spell = SpellController::new();
        assert!(!gate.is_open());

        let source = StubSource::replying(error_list_reply());
        spell.run_spell_check(&mut surface, &source, &mut RecordingNotifier::default());
        gate.track(&spell);
        assert!(gate.is_open());

        let found = spell.suggestions_at(&surface, 1).unwrap();
        spell.apply_suggestion(&mut surface, found.span, "The");
        revision.set(surface.revision());
        assert!(!gate.is_open());
        gate.track(&spell);
        assert!(gate.is_open());

        surface.set_text("typed over");
        revision.set(surface.revision());
        assert!(!gate.is_open());

        spell.clear(&mut surface);
        gate.track(&spell);
        assert!(!gate.is_open());
    }
}
