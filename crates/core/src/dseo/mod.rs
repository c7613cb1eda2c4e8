//! DSEO clipboard import.
//!
//! DSEO is the emergency department triage system. Its patient list can be copied as plain text;
//! this module turns that text into one [`CardRecord`] per patient block.
//!
//! ## Input shape
//!
//! ```text
//! ROSSO Mario Rossi          <- header: colour word + patient name
//! 15/01/1980                 <- body lines, in any order
//! SALA TRI
//! Dolore toracico acuto
//! GIALLO Anna Bianchi        <- next header closes the previous block
//! SALA OT1
//! ```
//!
//! ## Pipeline
//! 1. [`lines::normalize_lines`] splits on any line ending and trims line ends.
//! 2. [`segment::segment`] groups body lines under their header.
//! 3. [`color`], [`location`] and [`pathology`] extract one field each from an entry.
//! 4. [`assemble::assemble`] builds the card.
//!
//! The parser is pure: no clipboard access, no user prompts. Either at least one patient block
//! is recognised and every block becomes a card, or the call fails with
//! [`BoardError::StructureNotRecognized`](crate::BoardError::StructureNotRecognized).

pub mod assemble;
pub mod color;
pub mod lines;
pub mod location;
pub mod pathology;
pub mod patterns;
pub mod segment;

use crate::card::CardRecord;
use crate::BoardResult;

pub use segment::Entry;

/// Parses a DSEO text export into cards, in source order.
///
/// # Errors
///
/// Returns [`BoardError::StructureNotRecognized`](crate::BoardError::StructureNotRecognized) if
/// the text contains no header line.
pub fn parse_dseo(text: &str) -> BoardResult<Vec<CardRecord>> {
    let lines = lines::normalize_lines(text);
    let entries = segment::segment(&lines)?;

    let cards: Vec<CardRecord> = entries
        .iter()
        .map(|entry| {
            let card = assemble::assemble(entry);
            tracing::debug!(
                color = card.color.as_wire(),
                location = card.location.as_wire(),
                body_lines = entry.body_lines.len(),
                "dseo: entry recognised"
            );
            card
        })
        .collect();

    tracing::info!(
        lines = lines.len(),
        cards = cards.len(),
        "dseo: clipboard text parsed"
    );
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Location, TriageColor};
    use crate::BoardError;

    fn fields(card: &CardRecord) -> (TriageColor, &str, Location, &str) {
        (
            card.color,
            card.patient_name.as_str(),
            card.location,
            card.pathology.as_str(),
        )
    }

    #[test]
    fn parses_two_patient_export() {
        let text = "ROSSO Mario Rossi\n\
                    15/01/1980\n\
                    SALA TRI\n\
                    Dolore toracico acuto\n\
                    GIALLO Anna Bianchi\n\
                    SALA OT1\n";

        let cards = parse_dseo(text).expect("two entries");

        assert_eq!(cards.len(), 2);
        assert_eq!(
            fields(&cards[0]),
            (
                TriageColor::Rosso,
                "Mario Rossi",
                Location::Tri,
                "Dolore toracico acuto"
            )
        );
        assert_eq!(
            fields(&cards[1]),
            (TriageColor::Giallo, "Anna Bianchi", Location::Ot1, "")
        );
    }

    #[test]
    fn windows_line_endings_and_preamble() {
        let text = "Lista PS\r\n\r\nazzurro Paolo Neri\r\n07/01 12:38\r\nREG\tTriage\tMal di pancia\r\n";

        let cards = parse_dseo(text).expect("one entry");

        assert_eq!(cards.len(), 1);
        assert_eq!(
            fields(&cards[0]),
            (TriageColor::Blu, "Paolo Neri", Location::Unset, "Mal di pancia")
        );
    }

    #[test]
    fn body_does_not_leak_between_entries() {
        let text = "VERDE Uno\nVERDE Due\nSALA COR\nTosse";

        let cards = parse_dseo(text).expect("two entries");

        assert_eq!(
            fields(&cards[0]),
            (TriageColor::Verde, "Uno", Location::Unset, "")
        );
        assert_eq!(
            fields(&cards[1]),
            (TriageColor::Verde, "Due", Location::Cor, "Tosse")
        );
    }

    #[test]
    fn ids_are_unique_within_one_parse() {
        let cards = parse_dseo("ROSSO A\nROSSO A\nROSSO A").expect("three entries");

        assert_ne!(cards[0].id, cards[1].id);
        assert_ne!(cards[1].id, cards[2].id);
        assert_ne!(cards[0].id, cards[2].id);
    }

    #[test]
    fn unrecognised_text_fails() {
        for text in ["", "   \n\n", "Mario Rossi\nSALA TRI\nDolore"] {
            assert!(
                matches!(parse_dseo(text), Err(BoardError::StructureNotRecognized)),
                "text {text:?}"
            );
        }
    }

    #[test]
    fn parsing_is_deterministic_apart_from_ids() {
        let text = "BIANCO Lia\nSALA ACQ\nPrurito";
        let a = parse_dseo(text).unwrap();
        let b = parse_dseo(text).unwrap();

        assert_eq!(fields(&a[0]), fields(&b[0]));
    }
}
