//! The whiteboard: an ordered list of patient cards.
//!
//! Order is meaningful (it is the order the cards are shown and printed in), so every operation
//! here preserves the relative order of the cards it does not touch.

use crate::card::{CardPatch, CardRecord, ColorCounts};
use crate::{BoardError, BoardResult};
use erflow_uuid::CardId;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<CardRecord>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from stored cards. Duplicate ids are regenerated.
    pub fn from_cards(cards: Vec<CardRecord>) -> Self {
        let mut board = Self::new();
        board.append(cards);
        board
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<CardRecord> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Option<&CardRecord> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Appends a blank card and returns its id.
    pub fn add(&mut self) -> CardId {
        let card = CardRecord::new();
        let id = card.id.clone();
        self.cards.push(card);
        id
    }

    /// Removes a card and returns it.
    pub fn remove(&mut self, id: &CardId) -> BoardResult<CardRecord> {
        let index = self.position(id)?;
        Ok(self.cards.remove(index))
    }

    /// Applies a partial update to one card and returns the updated card.
    pub fn update(&mut self, id: &CardId, patch: CardPatch) -> BoardResult<&CardRecord> {
        let index = self.position(id)?;
        let card = &mut self.cards[index];
        card.apply(patch);
        Ok(card)
    }

    /// Swaps a card with the one above it. No-op for the first card.
    pub fn move_up(&mut self, id: &CardId) -> BoardResult<()> {
        let index = self.position(id)?;
        if index > 0 {
            self.cards.swap(index, index - 1);
        }
        Ok(())
    }

    /// Swaps a card with the one below it. No-op for the last card.
    pub fn move_down(&mut self, id: &CardId) -> BoardResult<()> {
        let index = self.position(id)?;
        if index + 1 < self.cards.len() {
            self.cards.swap(index, index + 1);
        }
        Ok(())
    }

    /// Moves the card at `from` so that it ends up at `to` (drag and drop).
    pub fn reorder(&mut self, from: usize, to: usize) -> BoardResult<()> {
        let len = self.cards.len();
        for index in [from, to] {
            if index >= len {
                return Err(BoardError::IndexOutOfRange { index, len });
            }
        }
        let card = self.cards.remove(from);
        self.cards.insert(to, card);
        Ok(())
    }

    pub fn collapse_all(&mut self) {
        self.set_collapsed(true);
    }

    pub fn expand_all(&mut self) {
        self.set_collapsed(false);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Cards whose patient name contains `query`, ignoring case. An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<&CardRecord> {
        let needle = query.to_lowercase();
        self.cards
            .iter()
            .filter(|c| c.patient_name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn color_counts(&self) -> ColorCounts {
        ColorCounts::from_cards(&self.cards)
    }

    /// Appends cards in order, giving a fresh id to any card whose id is already taken.
    ///
    /// Returns the number of ids that had to be regenerated.
    pub fn append(&mut self, cards: Vec<CardRecord>) -> usize {
        let mut taken: HashSet<CardId> = self.cards.iter().map(|c| c.id.clone()).collect();
        let mut regenerated = 0;
        self.cards.reserve(cards.len());

        for mut card in cards {
            if taken.contains(&card.id) {
                let fresh = CardId::generate();
                tracing::warn!(
                    duplicate = %card.id,
                    replacement = %fresh,
                    "board: duplicate card id regenerated"
                );
                card.id = fresh;
                regenerated += 1;
            }
            taken.insert(card.id.clone());
            self.cards.push(card);
        }
        regenerated
    }

    /// Replaces every card. Returns the number of regenerated ids, as [`append`](Self::append).
    pub fn replace(&mut self, cards: Vec<CardRecord>) -> usize {
        self.cards.clear();
        self.append(cards)
    }

    fn position(&self, id: &CardId) -> BoardResult<usize> {
        self.cards
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| BoardError::CardNotFound(id.to_string()))
    }

    fn set_collapsed(&mut self, collapsed: bool) {
        for card in &mut self.cards {
            card.collapsed = collapsed;
        }
    }
}
