use fltk::dialog;

use crate::app::services::spell_check::Notifier;

/// Shows notices as FLTK message boxes, titled.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn info(&mut self, title: &str, message: &str) {
        dialog::message_title(title);
        dialog::message_default(message);
    }

    fn warn(&mut self, title: &str, message: &str) {
        dialog::message_title(title);
        dialog::alert_default(message);
    }
}
