/// All messages that can be sent through the FLTK channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileQuit,
    WindowClose,

    // Edit
    EditUndo,
    EditRedo,
    EditCut,
    EditCopy,
    EditPaste,
    SelectAll,

    // Spelling
    SpellCheck,
    ClearSpellingMarks,
    /// Right-click in the editor: buffer byte position plus window coordinates
    /// for the popup.
    ShowSuggestions { pos: i32, x: i32, y: i32 },

    // View
    ToggleLineNumbers,
    ToggleWordWrap,
    ToggleDarkMode,

    // Format
    SetFontSize(i32),

    // Settings & Help
    OpenSettings,
    ShowAbout,
}
