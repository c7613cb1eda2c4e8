//! Header colour word → canonical triage colour.

use crate::card::TriageColor;

/// Maps a header colour word to its triage colour, ignoring case.
///
/// `ARANCIONE` (orange) counts as yellow and `AZZURRO` (light blue) as blue. Unknown words map to
/// white.
pub fn normalize_color(word: &str) -> TriageColor {
    match word.to_uppercase().as_str() {
        "ROSSO" => TriageColor::Rosso,
        "GIALLO" | "ARANCIONE" => TriageColor::Giallo,
        "BLU" | "AZZURRO" => TriageColor::Blu,
        "VERDE" => TriageColor::Verde,
        "BIANCO" => TriageColor::Bianco,
        _ => TriageColor::Bianco,
    }
}
