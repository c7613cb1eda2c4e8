//! Pathology extraction from an entry body.
//!
//! Two candidates are considered, in this precedence:
//! 1. the first non-empty line that is neither tab-separated nor matched by an ignore rule
//!    (the clinical description as typed by the triage nurse);
//! 2. the last non-empty column of the first tab-separated line (the registration desk
//!    summary row).
//!
//! The prose line wins even when the tabbed row comes first in the body.

use super::patterns::ignore_rule;

/// Returns the pathology text of an entry body, or an empty string.
pub fn extract_pathology<S: AsRef<str>>(body_lines: &[S]) -> String {
    let tabbed = tabbed_candidate(body_lines);

    for line in body_lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.contains('\t') {
            continue;
        }
        match ignore_rule(line) {
            Some(rule) => tracing::trace!(rule, line, "pathology: line ignored"),
            None => return line.to_string(),
        }
    }

    tabbed.unwrap_or_default()
}

/// Last non-empty column of the first line containing a tab.
fn tabbed_candidate<S: AsRef<str>>(body_lines: &[S]) -> Option<String> {
    let line = body_lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| line.contains('\t'))?;

    line.split('\t')
        .map(str::trim)
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_beats_tabbed_and_timestamp() {
        let body = [
            "07/01 12:38",
            "Mal di schiena acuto",
            "REG\tTriage\tMal di pancia",
        ];
        assert_eq!(extract_pathology(&body), "Mal di schiena acuto");
    }

    #[test]
    fn prose_wins_even_after_tabbed_line() {
        let body = ["REG\tTriage\tMal di pancia", "Febbre alta"];
        assert_eq!(extract_pathology(&body), "Febbre alta");
    }

    #[test]
    fn tabbed_fallback_when_only_ignored_lines() {
        let body = [
            "Prendi in Carico",
            "15/01/1980",
            "SALA OT1",
            "A\tB\tLombalgia",
            "Allergie: nessuna",
        ];
        assert_eq!(extract_pathology(&body), "Lombalgia");
    }

    #[test]
    fn tabbed_fallback_skips_trailing_empty_columns() {
        let body = ["A\tCefalea\t \t"];
        assert_eq!(extract_pathology(&body), "Cefalea");
    }

    #[test]
    fn only_first_tabbed_line_is_used() {
        let body = ["A\tPrima", "B\tSeconda"];
        assert_eq!(extract_pathology(&body), "Prima");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let body = ["", "   ", "Vertigini"];
        assert_eq!(extract_pathology(&body), "Vertigini");
    }

    #[test]
    fn empty_when_nothing_survives() {
        assert_eq!(extract_pathology(&["SALA OT1", "Referto"]), "");
        let empty: [&str; 0] = [];
        assert_eq!(extract_pathology(&empty), "");
    }
}
