//! Line normalisation.

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("static line break regex is valid"));

/// Splits `text` on any line ending (`\r\n`, `\r`, `\n`) and trims trailing whitespace from each
/// line. Leading whitespace and empty lines are kept.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    LINE_BREAK.split(text).map(str::trim_end).collect()
}
