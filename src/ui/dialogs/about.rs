use fltk::{
    button::Button,
    dialog,
    enums::{Align, Color, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

const SERVICE_URL: &str = "https://textgears.com/api";

/// Show About dialog
pub fn show_about_dialog() {
    let version = env!("CARGO_PKG_VERSION");
    let mut dialog = Window::default()
        .with_size(420, 300)
        .with_label("About NextGenEdit")
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 400, 280, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut title = Frame::default();
    title.set_label("NextGenEdit");
    title.set_label_size(24);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 40);

    let mut version_frame = Frame::default();
    version_frame.set_label(&format!("Version {}", version));
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 25);

    let mut desc_frame = Frame::default();
    desc_frame.set_label("A plain text editor with one-click spell checking");
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(Color::from_rgb(100, 100, 100));
    flex.fixed(&desc_frame, 25);

    let mut info_frame = Frame::default();
    info_frame.set_label(
        "Spell checking sends the whole document to the\n\
         TextGears correction service over RapidAPI.\n\n\
         Built with Rust and FLTK",
    );
    info_frame.set_label_size(12);
    info_frame.set_align(Align::Center | Align::Inside);

    let mut buttons = Flex::default();
    buttons.set_type(fltk::group::FlexType::Row);
    let mut service_btn = Button::default().with_label("Service Website");
    let mut close_btn = Button::default().with_label("Close");
    buttons.end();
    flex.fixed(&buttons, 35);

    flex.end();
    dialog.end();

    service_btn.set_callback(|_| {
        if let Err(e) = open::that(SERVICE_URL) {
            dialog::alert_default(&format!("Failed to open browser: {}", e));
        }
    });

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    super::run_dialog(&dialog);
}
