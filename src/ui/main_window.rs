use fltk::{
    app::{self, MouseButton, Sender},
    enums::{Color, Event},
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{PositionType, TextEditor},
    window::Window,
};

use crate::app::controllers::spelling::SuggestionGate;
use crate::app::domain::messages::Message;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub text_editor: TextEditor,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(300, 300, 600, 400, "Untitled - NextGenEdit");
    wind.set_xclass("NextGenEdit");

    let mut flex = Flex::new(0, 0, 600, 400, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
    text_editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));

    flex.end();
    wind.resizable(&flex);
    wind.end();

    // Closing the window goes through the same unsaved-changes check as Quit.
    let s = *sender;
    wind.set_callback(move |_| {
        if app::event() == Event::Close {
            s.send(Message::WindowClose);
        }
    });

    MainWidgets {
        wind,
        menu,
        text_editor,
    }
}

/// Right click asks for spelling suggestions at the clicked position while
/// the gate is open. Every other event keeps the editor's default handling.
pub fn install_suggestion_handler(editor: &mut TextEditor, sender: Sender<Message>, gate: SuggestionGate) {
    editor.handle(move |ed, ev| {
        if ev == Event::Push && app::event_mouse_button() == MouseButton::Right && gate.is_open() {
            let (x, y) = (app::event_x(), app::event_y());
            let pos = ed.xy_to_position(x, y, PositionType::Cursor);
            sender.send(Message::ShowSuggestions { pos, x, y });
            return true;
        }
        false
    });
}
