use std::fs;
use std::path::Path;

use crate::app::infrastructure::error::Result;

/// Read a whole file as text for the editor.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write the document verbatim, replacing whatever was there.
pub fn write_text_file(path: impl AsRef<Path>, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}
