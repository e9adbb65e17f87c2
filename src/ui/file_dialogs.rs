use fltk::dialog;

/// Any file can be opened as text.
pub const ALL_FILES: &str = "*";

fn start_dir(dir: Option<&str>) -> &str {
    dir.unwrap_or(".")
}

pub fn native_open_dialog(dir: Option<&str>) -> Option<String> {
    dialog::file_chooser("Open File", ALL_FILES, start_dir(dir), false)
}

pub fn native_save_dialog(dir: Option<&str>) -> Option<String> {
    dialog::file_chooser("Save File", ALL_FILES, start_dir(dir), false)
}
