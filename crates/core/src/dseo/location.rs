//! Room extraction from an entry body.

use super::patterns::match_room;
use crate::card::Location;

/// Returns the room named by the first `SALA <code>` line, or [`Location::Unset`].
pub fn extract_location<S: AsRef<str>>(body_lines: &[S]) -> Location {
    body_lines
        .iter()
        .find_map(|line| match_room(line.as_ref()).and_then(Location::from_room_code))
        .unwrap_or_default()
}
