//! Card identifier utilities.
//!
//! Every card on the whiteboard carries an opaque string identifier. Identifiers come from two
//! places:
//! - freshly generated by this crate when a card is created (clipboard import, "add card", or a
//!   JSON record without a usable id), and
//! - supplied from outside (JSON import, CLI arguments, REST path parameters).
//!
//! ## Generated form
//! `card-<YYYYMMDDTHHMMSS.mmmZ>-<32 lowercase hex>`
//!
//! Example:
//! `card-20260111T143522.045Z-550e8400e29b41d4a716446655440000`
//!
//! The UUID part is a version 4 UUID in simple form, so two generated identifiers never collide
//! even when produced within the same millisecond.
//!
//! ## External form
//! Externally supplied identifiers are *not* normalised. Anything with at least one
//! non-whitespace character is accepted verbatim, because older whiteboard exports use a
//! different shape (`card-<epoch ms>-<random float>`) and must survive a round trip.

mod service;

// Re-export public types
pub use service::{CardId, Uuid, UuidService};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
