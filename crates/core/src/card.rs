//! Card record: the persisted and exchanged unit of the whiteboard.
//!
//! Field names and enum spellings in this module are the wire contract shared with the
//! whiteboard front end and with exported files. Do not rename them.
//!
//! The `unset` state of [`Location`] and [`Moved`] is written as a single space (`" "`), which is
//! what the whiteboard stores for an empty select box.

use erflow_uuid::CardId;
use serde::{Deserialize, Serialize};

/// Wire spelling of the unset location / moved state.
pub const UNSET_WIRE: &str = " ";

/// Canonical triage colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Rosso,
    Giallo,
    Blu,
    Verde,
    #[default]
    Bianco,
}

impl TriageColor {
    pub const ALL: [TriageColor; 5] = [
        TriageColor::Rosso,
        TriageColor::Giallo,
        TriageColor::Blu,
        TriageColor::Verde,
        TriageColor::Bianco,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            TriageColor::Rosso => "rosso",
            TriageColor::Giallo => "giallo",
            TriageColor::Blu => "blu",
            TriageColor::Verde => "verde",
            TriageColor::Bianco => "bianco",
        }
    }

    /// Parse the exact wire spelling. Case-sensitive.
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_wire() == s)
    }

    /// Capitalised Italian name, as printed on the card header.
    pub fn display_name(self) -> &'static str {
        match self {
            TriageColor::Rosso => "Rosso",
            TriageColor::Giallo => "Giallo",
            TriageColor::Blu => "Blu",
            TriageColor::Verde => "Verde",
            TriageColor::Bianco => "Bianco",
        }
    }
}

/// Room / ward where the patient currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Location {
    #[serde(rename = "OT1")]
    Ot1,
    #[serde(rename = "OT2")]
    Ot2,
    #[serde(rename = "COR")]
    Cor,
    #[serde(rename = "ACQ")]
    Acq,
    #[serde(rename = "TRI")]
    Tri,
    #[serde(rename = "OBI1")]
    Obi1,
    #[serde(rename = "OBI2")]
    Obi2,
    #[serde(rename = "OBI3")]
    Obi3,
    #[default]
    #[serde(rename = " ", alias = "", alias = "empty", alias = "unset")]
    Unset,
}

impl Location {
    /// Every room code, in the order the whiteboard lists them.
    pub const ROOMS: [Location; 8] = [
        Location::Ot1,
        Location::Ot2,
        Location::Cor,
        Location::Acq,
        Location::Tri,
        Location::Obi1,
        Location::Obi2,
        Location::Obi3,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            Location::Ot1 => "OT1",
            Location::Ot2 => "OT2",
            Location::Cor => "COR",
            Location::Acq => "ACQ",
            Location::Tri => "TRI",
            Location::Obi1 => "OBI1",
            Location::Obi2 => "OBI2",
            Location::Obi3 => "OBI3",
            Location::Unset => UNSET_WIRE,
        }
    }

    /// Parse a wire value. Room codes are case-sensitive; the unset state also accepts the
    /// spellings older whiteboard builds wrote (`""`, `"empty"`, `"unset"`).
    pub fn from_wire(s: &str) -> Option<Self> {
        if is_unset_spelling(s) {
            return Some(Location::Unset);
        }
        Self::ROOMS.into_iter().find(|l| l.as_wire() == s)
    }

    /// Parse a room code regardless of letter case (`"obi2"` → `Obi2`).
    pub fn from_room_code(code: &str) -> Option<Self> {
        Self::ROOMS
            .into_iter()
            .find(|l| l.as_wire().eq_ignore_ascii_case(code))
    }
}

/// Whether the patient was sent elsewhere: `R` (ricoverato) or `D` (dimesso).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Moved {
    R,
    D,
    #[default]
    #[serde(rename = " ", alias = "", alias = "empty", alias = "unset")]
    Unset,
}

impl Moved {
    pub fn as_wire(self) -> &'static str {
        match self {
            Moved::R => "R",
            Moved::D => "D",
            Moved::Unset => UNSET_WIRE,
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "R" => Some(Moved::R),
            "D" => Some(Moved::D),
            s if is_unset_spelling(s) => Some(Moved::Unset),
            _ => None,
        }
    }
}

fn is_unset_spelling(s: &str) -> bool {
    matches!(s, UNSET_WIRE | "" | "empty" | "unset")
}

/// One patient card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: CardId,
    pub color: TriageColor,
    pub patient_name: String,
    #[serde(alias = "patology")]
    pub pathology: String,
    pub location: Location,
    pub moved: Moved,
    pub moved_to: String,
    /// Rich-text (HTML) notes.
    pub content: String,
    pub collapsed: bool,
}

impl Default for CardRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRecord {
    /// A blank card with a freshly generated id.
    pub fn new() -> Self {
        Self::with_id(CardId::generate())
    }

    /// A blank card with the given id.
    pub fn with_id(id: CardId) -> Self {
        Self {
            id,
            color: TriageColor::default(),
            patient_name: String::new(),
            pathology: String::new(),
            location: Location::default(),
            moved: Moved::default(),
            moved_to: String::new(),
            content: String::new(),
            collapsed: false,
        }
    }

    /// One-line header used when a card is printed:
    /// `Colore - name - pathology - location - moved - movedTo`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} - {} - {} - {} - {} - {}",
            self.color.display_name(),
            self.patient_name,
            self.pathology,
            self.location.as_wire(),
            self.moved.as_wire(),
            self.moved_to
        )
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: CardPatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(name) = patch.patient_name {
            self.patient_name = name;
        }
        if let Some(pathology) = patch.pathology {
            self.pathology = pathology;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(moved) = patch.moved {
            self.moved = moved;
        }
        if let Some(moved_to) = patch.moved_to {
            self.moved_to = moved_to;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(collapsed) = patch.collapsed {
            self.collapsed = collapsed;
        }
    }
}

/// Partial update of a card. Absent fields are left as they are; the id cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CardPatch {
    pub color: Option<TriageColor>,
    pub patient_name: Option<String>,
    #[serde(alias = "patology")]
    pub pathology: Option<String>,
    pub location: Option<Location>,
    pub moved: Option<Moved>,
    pub moved_to: Option<String>,
    pub content: Option<String>,
    pub collapsed: Option<bool>,
}

/// Number of cards per triage colour, plus the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ColorCounts {
    pub rosso: usize,
    pub giallo: usize,
    pub blu: usize,
    pub verde: usize,
    pub bianco: usize,
    pub total: usize,
}

impl ColorCounts {
    pub fn from_cards(cards: &[CardRecord]) -> Self {
        let mut counts = Self::default();
        for card in cards {
            match card.color {
                TriageColor::Rosso => counts.rosso += 1,
                TriageColor::Giallo => counts.giallo += 1,
                TriageColor::Blu => counts.blu += 1,
                TriageColor::Verde => counts.verde += 1,
                TriageColor::Bianco => counts.bianco += 1,
            }
        }
        counts.total = cards.len();
        counts
    }
}
