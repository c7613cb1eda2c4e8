//! JSON import and export of cards.
//!
//! Export writes the card list as a pretty-printed JSON array using the wire names of
//! [`CardRecord`]. Import is deliberately lenient: every array element is laid over a default
//! card field by field, and any value that is missing, of the wrong type, or outside an enum's
//! allowed set falls back to that field's default. Only a top-level document that is not JSON,
//! or not an array, is rejected.

use crate::card::{CardRecord, Location, Moved, TriageColor};
use crate::constants::EXPORT_FILE_PREFIX;
use crate::{BoardError, BoardResult};
use chrono::NaiveDate;
use erflow_uuid::CardId;
use serde_json::{Map, Value};

/// Parses a JSON array of (possibly partial) cards.
///
/// # Errors
///
/// - [`BoardError::InvalidJson`] if `text` is not valid JSON.
/// - [`BoardError::NotAnArray`] if the top-level value is not an array.
pub fn import_json(text: &str) -> BoardResult<Vec<CardRecord>> {
    let (cards, _) = import_json_counting_ids(text)?;
    Ok(cards)
}

/// As [`import_json`], also returning how many cards got a generated id because theirs was
/// missing, blank or not a string.
pub(crate) fn import_json_counting_ids(text: &str) -> BoardResult<(Vec<CardRecord>, usize)> {
    let value: Value = serde_json::from_str(text).map_err(BoardError::InvalidJson)?;

    let Value::Array(items) = value else {
        return Err(BoardError::NotAnArray);
    };

    let empty = Map::new();
    let mut generated = 0;
    let cards: Vec<CardRecord> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = match item {
                Value::Object(obj) => obj,
                other => {
                    tracing::warn!(
                        index,
                        kind = json_kind(other),
                        "json import: element is not an object"
                    );
                    &empty
                }
            };
            let (card, id_generated) = card_from_object(index, obj);
            if id_generated {
                generated += 1;
            }
            card
        })
        .collect();

    tracing::info!(cards = cards.len(), generated, "json import: cards restored");
    Ok((cards, generated))
}

/// Serialises cards as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`BoardError::Serialization`] if serialisation fails.
pub fn export_json(cards: &[CardRecord]) -> BoardResult<String> {
    serde_json::to_string_pretty(cards).map_err(BoardError::Serialization)
}

/// File name used for an export made on `date`: `erflow-cards-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", date.format("%Y-%m-%d"))
}

/// Builds one card; the flag is true when the id had to be generated.
fn card_from_object(index: usize, obj: &Map<String, Value>) -> (CardRecord, bool) {
    let parsed = obj
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| CardId::parse(s).ok());
    let id_generated = parsed.is_none();

    let mut card = CardRecord::with_id(parsed.unwrap_or_else(CardId::generate));

    card.color = coerce(index, obj, "color", TriageColor::from_wire);
    card.location = coerce(index, obj, "location", Location::from_wire);
    card.moved = coerce(index, obj, "moved", Moved::from_wire);

    card.patient_name = string_field(obj, "patientName");
    card.pathology = obj
        .get("pathology")
        .or_else(|| obj.get("patology"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default();
    card.moved_to = string_field(obj, "movedTo");
    card.content = string_field(obj, "content");
    card.collapsed = obj.get("collapsed").is_some_and(truthy);

    (card, id_generated)
}

/// Reads an enum field through `parse`, substituting the default for anything else.
fn coerce<T: Default>(
    index: usize,
    obj: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    match obj.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => match value.as_str().and_then(&parse) {
            Some(parsed) => parsed,
            None => {
                tracing::warn!(
                    index,
                    field = key,
                    value = %value,
                    "json import: value replaced by default"
                );
                T::default()
            }
        },
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// JavaScript truthiness, which is what the whiteboard used to coerce `collapsed`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
