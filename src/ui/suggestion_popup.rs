use fltk::{
    enums::Shortcut,
    menu::{MenuButton, MenuFlag},
    prelude::*,
};

/// Pop up the suggestions at window coordinates `(x, y)` and return the one
/// the user picked, if any.
pub fn pick_suggestion(choices: &[String], x: i32, y: i32) -> Option<String> {
    if choices.is_empty() {
        return None;
    }

    // 1x1 anchor so Wayland has a valid rectangle
    let mut menu = MenuButton::new(x, y, 1, 1, None);
    for choice in choices {
        menu.add(&escape_label(choice), Shortcut::None, MenuFlag::Normal, |_| {});
    }

    let picked = menu.popup().map(|_| menu.value());
    MenuButton::delete(menu);

    let index = usize::try_from(picked?).ok()?;
    choices.get(index).cloned()
}

/// Menu labels treat '&' as a shortcut marker and '/' as a submenu path.
fn escape_label(choice: &str) -> String {
    choice
        .replace('\\', "\\\\")
        .replace('&', "&&")
        .replace('/', "\\/")
}
