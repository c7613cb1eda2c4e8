//! Entry segmentation: groups body lines under the header line that precedes them.

use super::patterns::match_header;
use crate::{BoardError, BoardResult};

/// One patient block of a DSEO export, before field extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Header colour word, upper-cased.
    pub color_word: String,
    /// Header remainder, trimmed.
    pub patient_name: String,
    /// Trimmed body lines in source order, blank lines included.
    pub body_lines: Vec<String>,
}

/// Splits normalised lines into entries.
///
/// Lines before the first header are discarded.
///
/// # Errors
///
/// Returns [`BoardError::StructureNotRecognized`] if no header line is found.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> BoardResult<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for line in lines {
        let line = line.as_ref().trim();

        if let Some(header) = match_header(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(Entry {
                color_word: header.word.to_uppercase(),
                patient_name: header.remainder.to_string(),
                body_lines: Vec::new(),
            });
            continue;
        }

        if let Some(entry) = current.as_mut() {
            entry.body_lines.push(line.to_string());
        }
    }

    if let Some(done) = current {
        entries.push(done);
    }

    if entries.is_empty() {
        return Err(BoardError::StructureNotRecognized);
    }

    Ok(entries)
}
