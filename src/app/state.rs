use fltk::{
    app,
    dialog,
    enums::Cursor,
    menu::MenuBar,
    prelude::*,
    text::{TextEditor, WrapMode},
    window::Window,
};

use super::controllers::spelling::{SpellController, SuggestionGate};
use super::domain::document::Document;
use super::domain::settings::AppSettings;
use super::infrastructure::platform::resolve_dark_mode;
use super::services::files::{read_text_file, write_text_file};
use super::services::spell_api::HttpCorrectionSource;
use super::services::spell_check::{API_ERROR_TITLE, EditSurface, Notifier, failure_message};
use super::services::text_ops::{byte_to_char, char_to_byte, span_to_bytes};
use crate::ui::dialogs::notify::DialogNotifier;
use crate::ui::dialogs::settings_dialog::show_settings_dialog;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::suggestion_popup::pick_suggestion;
use crate::ui::theme::{apply_theme, style_table};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

pub struct AppState {
    pub document: Document,
    pub spell: SpellController,
    suggestion_gate: SuggestionGate,
    pub editor: TextEditor,
    pub window: Window,
    pub menu: MenuBar,
    pub settings: AppSettings,
    pub dark_mode: bool,
    pub show_linenumbers: bool,
    pub word_wrap: bool,
    /// Last directory used in a file open/save dialog.
    pub last_open_directory: Option<String>,
    shown_dirty: Option<bool>,
}

impl AppState {
    pub fn new(editor: TextEditor, window: Window, menu: MenuBar, settings: AppSettings, dark_mode: bool) -> Self {
        let show_linenumbers = settings.line_numbers_enabled;
        let word_wrap = settings.word_wrap_enabled;

        let document = Document::new();
        let suggestion_gate = SuggestionGate::new(document.revision_handle());

        let mut state = Self {
            document,
            spell: SpellController::new(),
            suggestion_gate,
            editor,
            window,
            menu,
            settings,
            dark_mode,
            show_linenumbers,
            word_wrap,
            last_open_directory: None,
            shown_dirty: None,
        };

        state.editor.set_buffer(state.document.buffer.clone());
        apply_theme(&mut state.editor, &mut state.window, &mut state.menu, dark_mode);
        state.refresh_styles();
        state.apply_wrap_mode();
        state.update_linenumber_width();
        state.update_window_title();
        state
    }

    /// Re-attach the style buffer with a table for the current theme and size.
    fn refresh_styles(&mut self) {
        let table = style_table(self.dark_mode, self.settings.font_size as i32);
        self.editor
            .set_highlight_data_ext(self.document.style_buffer.clone(), table);
        self.editor.set_text_size(self.settings.font_size as i32);
        self.editor.redraw();
    }

    pub fn update_window_title(&mut self) {
        let dirty = self.document.is_dirty();
        let prefix = if dirty { "*" } else { "" };
        self.window
            .set_label(&format!("{}{} - NextGenEdit", prefix, self.document.display_name));
        self.shown_dirty = Some(dirty);
    }

    /// Typing does not go through the message loop; catch the dirty flag
    /// flipping here.
    pub fn sync_title(&mut self) {
        if self.shown_dirty != Some(self.document.is_dirty()) {
            self.update_window_title();
        }
    }

    /// Handle for the editor's right-click handler.
    pub fn suggestion_gate(&self) -> SuggestionGate {
        self.suggestion_gate.clone()
    }

    fn remember_directory(&mut self, path: &str) {
        if let Some(parent) = std::path::Path::new(path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
    }

    // --- File operations ---

    pub fn file_new(&mut self) {
        self.document.reset();
        self.spell.discard();
        self.suggestion_gate.track(&self.spell);
        self.update_linenumber_width();
        self.update_window_title();
    }

    pub fn file_open(&mut self) {
        if let Some(path) = native_open_dialog(self.last_open_directory.as_deref()) {
            self.open_file(path);
        }
    }

    pub fn open_file(&mut self, path: String) {
        self.remember_directory(&path);
        match read_text_file(&path) {
            Ok(content) => {
                self.document.load(path, &content);
                self.spell.discard();
                self.suggestion_gate.track(&self.spell);
                self.editor.set_insert_position(0);
                self.editor.show_insert_position();
                self.update_linenumber_width();
                self.update_window_title();
            }
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    pub fn file_save(&mut self) {
        match self.document.file_path.clone() {
            Some(path) => self.save_to(path),
            None => self.file_save_as(),
        }
    }

    pub fn file_save_as(&mut self) {
        if let Some(path) = native_save_dialog(self.last_open_directory.as_deref()) {
            self.remember_directory(&path);
            self.save_to(path);
        }
    }

    fn save_to(&mut self, path: String) {
        match write_text_file(&path, &self.document.text()) {
            Ok(()) => {
                self.document.file_path = Some(path);
                self.document.update_display_name();
                self.document.mark_clean();
                self.update_window_title();
            }
            Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
        }
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        if !self.document.is_dirty() {
            return true;
        }

        let choice = dialog::choice2_default(
            "You have unsaved changes.",
            "Save",
            "Quit Without Saving",
            "Cancel",
        );

        match choice {
            Some(0) => {
                self.file_save();
                !self.document.is_dirty()
            }
            Some(1) => true,
            _ => false,
        }
    }

    // --- Edit ---

    pub fn undo(&mut self) {
        let _ = self.editor.undo();
    }

    pub fn redo(&mut self) {
        let _ = self.editor.redo();
    }

    pub fn cut(&mut self) {
        let _ = self.editor.cut();
    }

    pub fn copy(&mut self) {
        let _ = self.editor.copy();
    }

    pub fn paste(&mut self) {
        let _ = self.editor.paste();
    }

    pub fn select_all(&mut self) {
        let len = self.document.buffer.length();
        self.document.buffer.select(0, len);
        self.editor.redraw();
    }

    // --- Spelling ---

    /// Send the document to the correction service. Blocks the UI until the
    /// service answers.
    pub fn spell_check(&mut self) {
        let mut notifier = DialogNotifier;
        let source = match HttpCorrectionSource::from_config(&self.settings.spell_check) {
            Ok(source) => source,
            Err(e) => {
                notifier.warn(API_ERROR_TITLE, &failure_message(&e));
                return;
            }
        };

        self.window.set_cursor(Cursor::Wait);
        app::flush();
        let outcome = {
            let mut restore_cursor = CursorRestoringNotifier {
                window: &mut self.window,
                inner: notifier,
            };
            self.spell
                .run_spell_check(&mut self.document, &source, &mut restore_cursor)
        };
        self.window.set_cursor(Cursor::Default);
        self.suggestion_gate.track(&self.spell);
        tracing::debug!(?outcome, "spell check finished");

        self.update_linenumber_width();
        self.update_window_title();
        self.editor.redraw();
    }

    /// Right click at buffer byte `pos`: offer replacements for the word
    /// there, if it was flagged.
    pub fn show_suggestions(&mut self, pos: i32, x: i32, y: i32) {
        let text = self.document.text();
        let char_pos = byte_to_char(&text, pos.max(0) as usize);
        let Some(found) = self.spell.suggestions_at(&self.document, char_pos) else {
            return;
        };

        let previous_selection = self.document.selection();
        let (start, end) = span_to_bytes(&text, found.span);
        self.document.buffer.select(start as i32, end as i32);
        self.editor.redraw();

        match pick_suggestion(&found.choices, x, y) {
            Some(choice) => {
                self.spell.apply_suggestion(&mut self.document, found.span, &choice);
                self.suggestion_gate.track(&self.spell);
                let caret = char_to_byte(&self.document.text(), found.span.start + choice.chars().count());
                self.editor.set_insert_position(caret as i32);
            }
            None => self.document.restore_selection(previous_selection),
        }
        self.editor.redraw();
    }

    pub fn clear_spelling_marks(&mut self) {
        self.spell.clear(&mut self.document);
        self.suggestion_gate.track(&self.spell);
        self.editor.redraw();
    }

    // --- View toggles ---

    pub fn update_linenumber_width(&mut self) {
        if !self.show_linenumbers {
            self.editor.set_linenumber_width(0);
            return;
        }
        let buffer = &self.document.buffer;
        let line_count = buffer.count_lines(0, buffer.length());
        let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
        let width = (digits * 8 + 16).max(40);
        self.editor.set_linenumber_width(width);
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_linenumbers = !self.show_linenumbers;
        self.update_linenumber_width();
        self.editor.redraw();
    }

    fn apply_wrap_mode(&mut self) {
        if self.word_wrap {
            self.editor.wrap_mode(WrapMode::AtBounds, 0);
        } else {
            self.editor.wrap_mode(WrapMode::None, 0);
        }
    }

    pub fn toggle_word_wrap(&mut self) {
        self.word_wrap = !self.word_wrap;
        self.apply_wrap_mode();
        self.editor.redraw();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.apply_dark_mode();
    }

    fn apply_dark_mode(&mut self) {
        apply_theme(&mut self.editor, &mut self.window, &mut self.menu, self.dark_mode);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, self.dark_mode);
        self.refresh_styles();
    }

    // --- Format ---

    pub fn set_font_size(&mut self, size: i32) {
        self.settings.font_size = size.max(1) as u32;
        self.refresh_styles();
    }

    // --- Settings ---

    pub fn open_settings(&mut self) {
        if let Some(new_settings) = show_settings_dialog(&self.settings) {
            if let Err(e) = new_settings.save() {
                dialog::alert_default(&format!("Failed to save settings: {}", e));
                return;
            }
            self.apply_settings(new_settings);
        }
    }

    pub fn apply_settings(&mut self, new_settings: AppSettings) {
        self.dark_mode = resolve_dark_mode(new_settings.theme_mode);
        self.update_menu_checkbox("View/Toggle Dark Mode", self.dark_mode);

        self.show_linenumbers = new_settings.line_numbers_enabled;
        self.update_menu_checkbox("View/Toggle Line Numbers", self.show_linenumbers);

        self.word_wrap = new_settings.word_wrap_enabled;
        self.update_menu_checkbox("View/Toggle Word Wrap", self.word_wrap);

        self.settings = new_settings;

        self.apply_dark_mode();
        self.update_linenumber_width();
        self.apply_wrap_mode();
        self.editor.redraw();
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.menu.find_index(path);
        if idx >= 0 {
            if let Some(mut item) = self.menu.at(idx) {
                if checked {
                    item.set();
                } else {
                    item.clear();
                }
            }
        }
    }
}

/// Puts the normal cursor back before any dialog appears mid-request.
struct CursorRestoringNotifier<'a, N: Notifier> {
    window: &'a mut Window,
    inner: N,
}

impl<N: Notifier> Notifier for CursorRestoringNotifier<'_, N> {
    fn info(&mut self, title: &str, message: &str) {
        self.window.set_cursor(Cursor::Default);
        self.inner.info(title, message);
    }

    fn warn(&mut self, title: &str, message: &str) {
        self.window.set_cursor(Cursor::Default);
        self.inner.warn(title, message);
    }
}
