use fltk::text::TextBuffer;

/// Copy the whole contents of an FLTK `TextBuffer` into a Rust `String`.
///
/// `TextBuffer::text()` in fltk-rs never frees the `malloc()`'d C string that
/// `Fl_Text_Buffer_text()` hands back, so every call leaks a copy of the
/// document. The spell checker reads the full text on every request and
/// every right-click, which makes that leak grow quickly; this calls the C
/// API directly and releases the copy.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live Fl_Text_Buffer owned by `buf`.
    // Fl_Text_Buffer_text returns either null or a NUL-terminated malloc'd
    // copy, which is read once and then released with the matching free().
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}
