//! Card assembly from a segmented entry.

use super::color::normalize_color;
use super::location::extract_location;
use super::pathology::extract_pathology;
use super::segment::Entry;
use crate::card::CardRecord;

/// Builds a card from one entry. Every field the export does not carry keeps its default.
pub fn assemble(entry: &Entry) -> CardRecord {
    let mut card = CardRecord::new();
    card.color = normalize_color(&entry.color_word);
    card.patient_name = entry.patient_name.clone();
    card.location = extract_location(&entry.body_lines);
    card.pathology = extract_pathology(&entry.body_lines);
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Location, Moved, TriageColor};

    #[test]
    fn fills_extracted_fields_and_defaults() {
        let entry = Entry {
            color_word: "ARANCIONE".into(),
            patient_name: "Giulia Neri".into(),
            body_lines: vec!["SALA OBI1".into(), "Dispnea".into()],
        };

        let card = assemble(&entry);

        assert!(card.id.is_generated());
        assert_eq!(card.color, TriageColor::Giallo);
        assert_eq!(card.patient_name, "Giulia Neri");
        assert_eq!(card.location, Location::Obi1);
        assert_eq!(card.pathology, "Dispnea");
        assert_eq!(card.moved, Moved::Unset);
        assert!(card.moved_to.is_empty());
        assert!(card.content.is_empty());
        assert!(!card.collapsed);
    }

    #[test]
    fn each_card_gets_its_own_id() {
        let entry = Entry {
            color_word: "BLU".into(),
            patient_name: "X".into(),
            body_lines: vec![],
        };

        assert_ne!(assemble(&entry).id, assemble(&entry).id);
    }
}
