#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use fltk::{app, prelude::*};
use tracing_subscriber::EnvFilter;

use next_gen_edit::app::domain::messages::Message;
use next_gen_edit::app::domain::settings::AppSettings;
use next_gen_edit::app::infrastructure::platform::resolve_dark_mode;
use next_gen_edit::app::state::AppState;
use next_gen_edit::ui::dialogs::about::show_about_dialog;
use next_gen_edit::ui::main_window::{build_main_window, install_suggestion_handler};
use next_gen_edit::ui::menu::build_menu;
#[cfg(target_os = "windows")]
use next_gen_edit::ui::theme::set_windows_titlebar_theme;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let dark_mode = resolve_dark_mode(settings.theme_mode);

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, &settings, dark_mode);

    let mut state = AppState::new(
        widgets.text_editor,
        widgets.wind,
        widgets.menu,
        settings,
        dark_mode,
    );
    let mut editor = state.editor.clone();
    install_suggestion_handler(&mut editor, sender, state.suggestion_gate());

    state.window.show();
    #[cfg(target_os = "windows")]
    set_windows_titlebar_theme(&state.window, state.dark_mode);

    if let Some(path) = std::env::args().nth(1) {
        state.open_file(path);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "NextGenEdit started");

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::FileNew => state.file_new(),
                Message::FileOpen => state.file_open(),
                Message::FileSave => state.file_save(),
                Message::FileSaveAs => state.file_save_as(),
                Message::FileQuit | Message::WindowClose => {
                    if state.file_quit() {
                        app.quit();
                    }
                }

                Message::EditUndo => state.undo(),
                Message::EditRedo => state.redo(),
                Message::EditCut => state.cut(),
                Message::EditCopy => state.copy(),
                Message::EditPaste => state.paste(),
                Message::SelectAll => state.select_all(),

                Message::SpellCheck => state.spell_check(),
                Message::ClearSpellingMarks => state.clear_spelling_marks(),
                Message::ShowSuggestions { pos, x, y } => state.show_suggestions(pos, x, y),

                Message::ToggleLineNumbers => state.toggle_line_numbers(),
                Message::ToggleWordWrap => state.toggle_word_wrap(),
                Message::ToggleDarkMode => state.toggle_dark_mode(),
                Message::SetFontSize(size) => state.set_font_size(size),

                Message::OpenSettings => state.open_settings(),
                Message::ShowAbout => show_about_dialog(),
            }
        }
        state.sync_title();
    }
}
