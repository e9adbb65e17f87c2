use fltk::{
    button::{Button, CheckButton, RadioRoundButton},
    enums::{Align, Color},
    frame::Frame,
    group::Group,
    input::{Input, IntInput, SecretInput},
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::settings::{AppSettings, SpellCheckConfig, ThemeMode};

fn section_label(x: i32, y: i32, label: &str) {
    Frame::default()
        .with_pos(x, y)
        .with_size(320, 25)
        .with_label(label)
        .with_align(Align::Left | Align::Inside);
}

/// Empty input means "not set".
fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Show settings dialog and return updated settings if user clicked Save.
pub fn show_settings_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(350, 560)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    // Theme section
    section_label(15, 15, "Theme:");
    let theme_group = Group::default().with_pos(30, 45).with_size(280, 75);
    let mut theme_light = RadioRoundButton::default().with_pos(30, 45).with_size(280, 25).with_label("Light");
    let mut theme_dark = RadioRoundButton::default().with_pos(30, 70).with_size(280, 25).with_label("Dark");
    let mut theme_system = RadioRoundButton::default().with_pos(30, 95).with_size(280, 25).with_label("System Default");
    theme_group.end();

    match current_settings.theme_mode {
        ThemeMode::Light => theme_light.set_value(true),
        ThemeMode::Dark => theme_dark.set_value(true),
        ThemeMode::SystemDefault => theme_system.set_value(true),
    }

    // Font size section
    section_label(15, 130, "Font Size:");
    let size_group = Group::default().with_pos(30, 160).with_size(280, 75);
    let mut size_12 = RadioRoundButton::default().with_pos(30, 160).with_size(280, 25).with_label("Small (12)");
    let mut size_16 = RadioRoundButton::default().with_pos(30, 185).with_size(280, 25).with_label("Medium (16)");
    let mut size_20 = RadioRoundButton::default().with_pos(30, 210).with_size(280, 25).with_label("Large (20)");
    size_group.end();

    match current_settings.font_size {
        12 => size_12.set_value(true),
        20 => size_20.set_value(true),
        _ => size_16.set_value(true),
    }

    // View options section
    section_label(15, 245, "View Options:");
    let mut check_line_numbers = CheckButton::default().with_pos(30, 275).with_size(280, 25).with_label("Show Line Numbers");
    check_line_numbers.set_value(current_settings.line_numbers_enabled);
    let mut check_word_wrap = CheckButton::default().with_pos(30, 300).with_size(280, 25).with_label("Word Wrap");
    check_word_wrap.set_value(current_settings.word_wrap_enabled);

    // Spell check service section
    let spell = &current_settings.spell_check;
    section_label(15, 335, "Spell Check Service:");
    let mut endpoint_input = Input::default().with_pos(110, 365).with_size(220, 25).with_label("Endpoint:");
    endpoint_input.set_value(&spell.endpoint);
    let mut host_input = Input::default().with_pos(110, 395).with_size(220, 25).with_label("API host:");
    host_input.set_value(&spell.api_host);
    let mut key_input = SecretInput::default().with_pos(110, 425).with_size(220, 25).with_label("API key:");
    key_input.set_value(spell.api_key.as_deref().unwrap_or(""));
    let mut timeout_input = IntInput::default().with_pos(110, 455).with_size(80, 25).with_label("Timeout (s):");
    timeout_input.set_value(&spell.timeout_secs.map(|t| t.to_string()).unwrap_or_default());

    let mut info_frame = Frame::default().with_pos(30, 485).with_size(300, 30);
    info_frame.set_label("NEXTGENEDIT_API_KEY overrides the stored key.");
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(Align::Left | Align::Inside | Align::Wrap);

    let mut save_btn = Button::default().with_pos(150, 520).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(250, 520).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();

    let dialog_save = dialog.clone();
    let current = current_settings.clone();
    save_btn.set_callback(move |_| {
        let new_settings = AppSettings {
            theme_mode: if theme_light.value() {
                ThemeMode::Light
            } else if theme_dark.value() {
                ThemeMode::Dark
            } else {
                ThemeMode::SystemDefault
            },
            font_size: if size_12.value() {
                12
            } else if size_20.value() {
                20
            } else {
                16
            },
            line_numbers_enabled: check_line_numbers.value(),
            word_wrap_enabled: check_word_wrap.value(),
            spell_check: SpellCheckConfig {
                endpoint: non_blank(endpoint_input.value()).unwrap_or_else(|| current.spell_check.endpoint.clone()),
                api_host: non_blank(host_input.value()).unwrap_or_else(|| current.spell_check.api_host.clone()),
                api_key: non_blank(key_input.value()),
                timeout_secs: non_blank(timeout_input.value()).and_then(|t| t.parse().ok()).filter(|t| *t > 0),
            },
        };

        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(move |w| {
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
