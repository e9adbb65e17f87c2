use std::cell::Cell;
use std::rc::Rc;

use fltk::{prelude::*, text::TextBuffer};

use super::spelling::Span;
use crate::app::infrastructure::buffer::buffer_text_no_leak;
use crate::app::services::spell_check::EditSurface;
use crate::app::services::text_ops::{extract_filename, span_to_bytes, spans_to_bytes};

/// Style byte for ordinary text in the style buffer.
pub const STYLE_PLAIN: char = 'A';
/// Style byte for a misspelled range.
pub const STYLE_MISSPELLED: char = 'B';

fn style_run(style: char, len: usize) -> String {
    std::iter::repeat_n(style, len).collect()
}

/// The single open document: text buffer, a parallel style buffer holding
/// one style byte per text byte, and bookkeeping for saving.
pub struct Document {
    pub buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    pub file_path: Option<String>,
    pub display_name: String,
    has_unsaved_changes: Rc<Cell<bool>>,
    revision: Rc<Cell<u64>>,
}

impl Document {
    pub fn new() -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));
        let revision = Rc::new(Cell::new(0u64));

        let changes = has_unsaved_changes.clone();
        let rev = revision.clone();
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
                rev.set(rev.get() + 1);
                // A replace reports both counts at the same position; drop the
                // old styles before making room for the new text.
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                if inserted > 0 {
                    style_buf.insert(pos, &style_run(STYLE_PLAIN, inserted as usize));
                }
            }
        });

        Self {
            buffer,
            style_buffer,
            file_path: None,
            display_name: "Untitled".to_string(),
            has_unsaved_changes,
            revision,
        }
    }

    /// Replace the contents with a file that was just read from `path`.
    pub fn load(&mut self, path: String, content: &str) {
        self.buffer.set_text(content);
        self.file_path = Some(path);
        self.update_display_name();
        self.mark_clean();
    }

    /// Back to an empty, unnamed document.
    pub fn reset(&mut self) {
        self.buffer.set_text("");
        self.file_path = None;
        self.display_name = "Untitled".to_string();
        self.mark_clean();
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    /// Shared counter that follows every text modification.
    pub fn revision_handle(&self) -> Rc<Cell<u64>> {
        self.revision.clone()
    }

    /// Current selection as byte positions, if any.
    pub fn selection(&self) -> Option<(i32, i32)> {
        self.buffer.selection_position()
    }

    pub fn restore_selection(&mut self, selection: Option<(i32, i32)>) {
        match selection {
            Some((start, end)) => self.buffer.select(start, end),
            None => self.buffer.unselect(),
        }
    }

    pub fn update_display_name(&mut self) {
        if let Some(ref path) = self.file_path {
            self.display_name = extract_filename(path);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSurface for Document {
    fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    fn revision(&self) -> u64 {
        self.revision.get()
    }

    fn mark_span(&mut self, span: Span) {
        self.mark_spans(&[span]);
    }

    fn mark_spans(&mut self, spans: &[Span]) {
        let text = self.text();
        for (start, end) in spans_to_bytes(&text, spans) {
            if start < end {
                self.style_buffer
                    .replace(start as i32, end as i32, &style_run(STYLE_MISSPELLED, end - start));
            }
        }
    }

    fn clear_marks(&mut self) {
        let len = self.buffer.length().max(0) as usize;
        self.style_buffer.set_text(&style_run(STYLE_PLAIN, len));
    }

    fn replace_span(&mut self, span: Span, replacement: &str) {
        let (start, end) = span_to_bytes(&self.text(), span);
        self.buffer.select(start as i32, end as i32);
        // One replace is one modify callback and one native undo step.
        self.buffer.replace(start as i32, end as i32, replacement);
        self.buffer.unselect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // FLTK is not thread-safe; buffer tests run one at a time.
    static FLTK: Mutex<()> = Mutex::new(());

    fn fltk_lock() -> std::sync::MutexGuard<'static, ()> {
        FLTK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn styles(doc: &Document) -> String {
        buffer_text_no_leak(&doc.style_buffer)
    }

    fn loaded(text: &str) -> Document {
        let mut doc = Document::new();
        doc.load("/tmp/letter.txt".to_string(), text);
        doc
    }

    #[test]
    fn test_style_buffer_tracks_text_length() {
        let _guard = fltk_lock();
        let mut doc = loaded("teh cat");
        assert_eq!(styles(&doc), "AAAAAAA");

        doc.buffer.insert(3, " fat");
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());

        doc.buffer.remove(0, 4);
        assert_eq!(doc.text(), "fat cat");
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());

        doc.buffer.replace(0, 3, "naïve");
        assert_eq!(doc.text(), "naïve cat");
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());

        doc.set_text("");
        assert_eq!(doc.style_buffer.length(), 0);
    }

    #[test]
    fn test_revision_and_dirty_follow_text_changes_only() {
        let _guard = fltk_lock();
        let mut doc = loaded("teh cat");
        assert!(!doc.is_dirty());
        let start = doc.revision();

        doc.buffer.select(0, 3);
        doc.buffer.unselect();
        assert_eq!(doc.revision(), start);
        assert!(!doc.is_dirty());

        doc.buffer.insert(7, "s");
        assert_eq!(doc.revision(), start + 1);
        assert!(doc.is_dirty());

        doc.mark_clean();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_mark_spans_changes_presentation_only() {
        let _guard = fltk_lock();
        let mut doc = loaded("naïve teh cat");
        let revision = doc.revision();

        doc.mark_spans(&[Span::new(6, 9), Span::new(10, 40), Span::new(usize::MAX, usize::MAX)]);

        assert_eq!(doc.text(), "naïve teh cat");
        assert_eq!(doc.revision(), revision);
        assert!(!doc.is_dirty());
        // One style byte per text byte; "ï" takes two.
        assert_eq!(styles(&doc), "AAAAAAABBBABBB");
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());

        doc.clear_marks();
        assert_eq!(styles(&doc), "A".repeat(14));
    }

    #[test]
    fn test_replace_span_is_one_undo_step() {
        let _guard = fltk_lock();
        let mut doc = loaded("I recieved it");
        let revision = doc.revision();

        doc.replace_span(Span::new(2, 10), "got");
        assert_eq!(doc.text(), "I got it");
        assert_eq!(doc.revision(), revision + 1);
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());

        assert!(doc.buffer.undo().is_ok());
        assert_eq!(doc.text(), "I recieved it");
        assert_eq!(doc.style_buffer.length(), doc.buffer.length());
    }

    #[test]
    fn test_restore_selection() {
        let _guard = fltk_lock();
        let mut doc = loaded("teh cat");
        doc.buffer.select(4, 7);
        let saved = doc.selection();
        assert_eq!(saved, Some((4, 7)));

        doc.buffer.select(0, 3);
        doc.restore_selection(saved);
        assert_eq!(doc.selection(), Some((4, 7)));

        doc.restore_selection(None);
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn test_reset_forgets_path() {
        let _guard = fltk_lock();
        let mut doc = loaded("teh cat");
        assert_eq!(doc.display_name, "letter.txt");
        doc.reset();
        assert_eq!(doc.text(), "");
        assert_eq!(doc.file_path, None);
        assert_eq!(doc.display_name, "Untitled");
        assert!(!doc.is_dirty());
    }
}
