use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Half-open character range `[start, end)` within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One misspelling reported by the correction service.
///
/// `offset` counts characters, not bytes, from the start of the text that
/// was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellError {
    pub bad: String,
    pub offset: usize,
    #[serde(default)]
    pub better: Vec<String>,
}

impl SpellError {
    /// The range `bad` is expected to occupy: `[offset, offset + chars(bad))`.
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset.saturating_add(self.bad.chars().count()))
    }

    /// Parse a single record. Only JSON objects with an unsigned integer
    /// `offset` and a string `bad` are accepted.
    pub fn from_record(record: &Value) -> Option<Self> {
        if !record.is_object() {
            return None;
        }
        serde_json::from_value(record.clone()).ok()
    }
}

/// Spelling errors tied to the document revision they were computed against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSet {
    revision: u64,
    errors: Vec<SpellError>,
}

impl ErrorSet {
    pub fn new(revision: u64, errors: Vec<SpellError>) -> Self {
        Self { revision, errors }
    }

    /// Build a set from raw service records, skipping anything malformed.
    pub fn from_records(records: &[Value], revision: u64) -> Self {
        let errors = records
            .iter()
            .filter_map(|record| {
                let parsed = SpellError::from_record(record);
                if parsed.is_none() {
                    tracing::warn!(%record, "skipping malformed spelling record");
                }
                parsed
            })
            .collect();
        Self { revision, errors }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn errors(&self) -> &[SpellError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Offsets are only meaningful against the exact revision they came from.
    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }

    /// First record whose `bad` text equals `word`. Later duplicates are
    /// never returned.
    pub fn first_match(&self, word: &str) -> Option<&SpellError> {
        self.errors.iter().find(|e| e.bad == word)
    }

    /// Keep the set usable after `replaced` was overwritten by
    /// `replacement_len` characters, producing document revision `revision`.
    pub fn rebase_after_replace(&mut self, replaced: Span, replacement_len: usize, revision: u64) {
        self.errors.retain(|e| !e.span().overlaps(&replaced));
        for error in &mut self.errors {
            if error.offset >= replaced.end {
                error.offset = (error.offset - replaced.len()).saturating_add(replacement_len);
            }
        }
        self.revision = revision;
    }
}
