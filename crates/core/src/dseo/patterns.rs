//! Line patterns recognised in a DSEO export.
//!
//! Every pattern is matched against a line that has already been trimmed on both sides. The
//! ignore rules are kept as an ordered, named table so each rule can be checked on its own and
//! so the rule that discarded a line can be logged.

use regex::Regex;
use std::sync::LazyLock;

/// Header words accepted at the start of a patient block. Two of them are synonyms of a
/// canonical colour (see [`super::color`]).
pub const HEADER_WORDS: [&str; 7] = [
    "ROSSO", "GIALLO", "BLU", "VERDE", "BIANCO", "ARANCIONE", "AZZURRO",
];

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({})\s+(.+)$", HEADER_WORDS.join("|")))
        .expect("static header regex is valid")
});

static ROOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bSALA\s+(OBI1|OBI2|OBI3|OT1|OT2|COR|ACQ|TRI)\b")
        .expect("static room regex is valid")
});

/// A named line pattern.
#[derive(Debug)]
pub struct NamedPattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl NamedPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("static ignore regex is valid"),
        }
    }
}

/// Lines that never carry the clinical description, in the order they are tested.
pub static IGNORE_RULES: LazyLock<Vec<NamedPattern>> = LazyLock::new(|| {
    vec![
        NamedPattern::new("take-in-charge", r"(?i)^prendi in carico"),
        NamedPattern::new("report", r"(?i)^referto"),
        NamedPattern::new("allergies", r"(?i)^allergie"),
        NamedPattern::new("room", r"(?i)^sala"),
        NamedPattern::new("date", r"^\d{2}/\d{2}/\d{4}"),
        NamedPattern::new("short-timestamp", r"^\d{2}/\d{2} "),
    ]
});

/// A matched header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Colour word as written in the source.
    pub word: &'a str,
    /// Everything after the colour word, trimmed.
    pub remainder: &'a str,
}

/// Matches `<colour word> <name>`; the colour word is case-insensitive.
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    let caps = HEADER.captures(line)?;
    let word = caps.get(1)?.as_str();
    let remainder = caps.get(2)?.as_str().trim();
    if remainder.is_empty() {
        return None;
    }
    Some(HeaderMatch { word, remainder })
}

/// Returns the room code following `SALA`, if the line names one.
pub fn match_room(line: &str) -> Option<&str> {
    ROOM.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the name of the first ignore rule matching `line`.
pub fn ignore_rule(line: &str) -> Option<&'static str> {
    IGNORE_RULES
        .iter()
        .find(|rule| rule.regex.is_match(line))
        .map(|rule| rule.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_every_word_in_any_case() {
        for word in HEADER_WORDS {
            for variant in [
                word.to_string(),
                word.to_lowercase(),
                format!("{}{}", &word[..1], word[1..].to_lowercase()),
            ] {
                let line = format!("{variant} Mario Rossi");
                let m = match_header(&line).unwrap_or_else(|| panic!("no match for {line}"));
                assert_eq!(m.word, variant);
                assert_eq!(m.remainder, "Mario Rossi");
            }
        }
    }

    #[test]
    fn header_requires_whitespace_and_name() {
        assert!(match_header("ROSSO").is_none());
        assert!(match_header("BLUE Mario").is_none());
        assert!(match_header("ROSSOMario").is_none());
        assert!(match_header("Codice ROSSO Mario").is_none());
    }

    #[test]
    fn header_accepts_tab_separator() {
        let m = match_header("VERDE\tLuca Verdi").unwrap();
        assert_eq!(m.remainder, "Luca Verdi");
    }

    #[test]
    fn room_codes_case_insensitive() {
        assert_eq!(match_room("SALA OT2"), Some("OT2"));
        assert_eq!(match_room("sala obi1"), Some("obi1"));
        assert_eq!(match_room("Paziente in SALA COR dalle 10"), Some("COR"));
        assert_eq!(match_room("SALA  ACQ"), Some("ACQ"));
    }

    #[test]
    fn room_code_must_be_whole_word() {
        assert_eq!(match_room("SALA TRIAGE"), None);
        assert_eq!(match_room("SALA OT3"), None);
        assert_eq!(match_room("SALAOT1"), None);
        assert_eq!(match_room("OT1"), None);
    }

    #[test]
    fn each_ignore_rule_matches_independently() {
        let cases = [
            ("Prendi in Carico", "take-in-charge"),
            ("prendi in carico da Dr. X", "take-in-charge"),
            ("Referto RX torace", "report"),
            ("Allergie: nessuna", "allergies"),
            ("SALA TRI", "room"),
            ("15/01/1980", "date"),
            ("15/01/1980 10:22", "date"),
            ("07/01 12:38", "short-timestamp"),
        ];
        for (line, expected) in cases {
            assert_eq!(ignore_rule(line), Some(expected), "line {line:?}");
        }
    }

    #[test]
    fn ignore_rules_leave_prose_alone() {
        for line in [
            "Dolore toracico acuto",
            "07/01",
            "1/1/2024",
            "Mal di schiena, referto in attesa",
        ] {
            assert_eq!(ignore_rule(line), None, "line {line:?}");
        }
    }
}
