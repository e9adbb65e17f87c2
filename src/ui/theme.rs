use fltk::{
    enums::{Color, Font},
    menu::MenuBar,
    prelude::*,
    text::{StyleTableEntryExt, TextAttr, TextEditor},
    window::Window,
};

/// Styles indexed by the style buffer bytes: 'A' plain, 'B' misspelled.
/// Misspelled text keeps the plain colour and gains FLTK's red squiggly
/// spelling underline.
pub fn style_table(is_dark: bool, font_size: i32) -> Vec<StyleTableEntryExt> {
    let (text, background) = if is_dark {
        (Color::from_rgb(220, 220, 220), Color::from_rgb(30, 30, 30))
    } else {
        (Color::Black, Color::White)
    };

    vec![
        StyleTableEntryExt {
            color: text,
            font: Font::Courier,
            size: font_size,
            attr: TextAttr::None,
            bgcolor: background,
        },
        StyleTableEntryExt {
            color: text,
            font: Font::Courier,
            size: font_size,
            attr: TextAttr::Spelling,
            bgcolor: background,
        },
    ]
}

pub fn apply_theme(editor: &mut TextEditor, window: &mut Window, menu: &mut MenuBar, is_dark: bool) {
    if is_dark {
        editor.set_color(Color::from_rgb(30, 30, 30));
        editor.set_text_color(Color::from_rgb(220, 220, 220));
        editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        editor.set_selection_color(Color::from_rgb(70, 70, 100));
        editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
        editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        window.set_color(Color::from_rgb(25, 25, 25));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60));
    } else {
        editor.set_color(Color::White);
        editor.set_text_color(Color::Black);
        editor.set_cursor_color(Color::Black);
        editor.set_selection_color(Color::from_rgb(173, 216, 230));
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        window.set_color(Color::from_rgb(240, 240, 240));
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200));
    }

    editor.redraw();
    window.redraw();
    menu.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    let on: i32 = if is_dark { 1 } else { 0 };
    // SAFETY: the HWND comes from a shown FLTK window and `on` outlives the call.
    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        // 20 is DWMWA_USE_IMMERSIVE_DARK_MODE; 19 is its pre-20H1 value.
        for attribute in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
