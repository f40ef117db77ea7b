//! Client-side card cache with optimistic move prediction and rollback.
//!
//! [`BoardCache`] holds a local copy of a board's cards. A move intent is
//! applied to the cache immediately through the same planner the server
//! runs, so the user sees the predicted order before the round trip
//! completes. The pre-move state is kept as a snapshot keyed by request
//! identifier: a confirmed request discards it, a failed one restores it
//! verbatim.

use crate::domain::card::{Card, CardId};
use crate::domain::column::ColumnId;
use crate::domain::reorder::{self, MoveIntent};
use crate::error::{CorkboardError, Result};
use tracing::{debug, warn};

/// Identifier of a move issued through the cache
pub type RequestId = u64;

struct PendingMove {
    request_id: RequestId,
    snapshot: Vec<Card>,
}

/// Local copy of a board's card list with speculative updates
#[derive(Default)]
pub struct BoardCache {
    cards: Vec<Card>,
    pending: Option<PendingMove>,
    next_request: RequestId,
}

impl BoardCache {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            pending: None,
            next_request: 0,
        }
    }

    /// Creates a cache seeded with a fetched card list
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            pending: None,
            next_request: 0,
        }
    }

    /// Replaces the whole cache with a fresh authoritative fetch.
    ///
    /// Any outstanding snapshot is dropped; the server state supersedes both
    /// the prediction and its rollback point.
    pub fn replace_all(&mut self, cards: Vec<Card>) {
        if self.pending.is_some() {
            warn!("refetch discarded an outstanding rollback snapshot");
        }
        self.cards = cards;
        self.pending = None;
    }

    /// All cached cards
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards of one column sorted by order
    pub fn column(&self, column: ColumnId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().filter(|c| c.column == column).collect();
        cards.sort_by_key(|c| c.order);
        cards
    }

    /// Applies a move prediction to the cache before the server responds.
    ///
    /// Captures a rollback snapshot first. If a previous move is still in
    /// flight its snapshot is kept — a newer intent never discards the
    /// rollback point of an unresolved one.
    pub fn apply_move(&mut self, card_id: &CardId, intent: &MoveIntent) -> Result<RequestId> {
        let moved = self
            .cards
            .iter()
            .find(|c| c.id == *card_id)
            .cloned()
            .ok_or_else(|| CorkboardError::CardNotFound(card_id.to_string()))?;

        let request_id = self.next_request;
        self.next_request += 1;
        if self.pending.is_none() {
            self.pending = Some(PendingMove {
                request_id,
                snapshot: self.cards.clone(),
            });
        }

        let source = self.owned_column(intent.source_column);
        let destination = self.owned_column(intent.destination_column);
        let placements = reorder::plan(&moved, &source, &destination, intent);
        for placement in &placements {
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == placement.card_id) {
                card.move_to(placement.column, placement.order);
            }
        }
        debug!(request = request_id, card = %card_id, placements = placements.len(), "applied optimistic move");

        Ok(request_id)
    }

    /// Settles a successful request: the snapshot is discarded and the
    /// server's authoritative state for the moved card is merged in
    pub fn confirm(&mut self, request_id: RequestId, server_card: Card) {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.request_id == request_id)
        {
            self.pending = None;
        }
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == server_card.id) {
            *card = server_card;
        }
        debug!(request = request_id, "confirmed move");
    }

    /// Restores the cache from the snapshot taken for `request_id`.
    ///
    /// The restore happens only when the snapshot belongs to that request
    /// and no newer request has been issued since — a rollback from an
    /// earlier move must not clobber a newer prediction. Returns whether the
    /// cache was restored.
    pub fn roll_back(&mut self, request_id: RequestId) -> bool {
        let is_latest = request_id + 1 == self.next_request;
        match self.pending.take() {
            Some(pending) if pending.request_id == request_id && is_latest => {
                self.cards = pending.snapshot;
                debug!(request = request_id, "rolled back optimistic move");
                true
            }
            Some(pending) => {
                warn!(
                    request = request_id,
                    snapshot = pending.request_id,
                    "rollback skipped, request superseded or snapshot not held"
                );
                self.pending = Some(pending);
                false
            }
            None => false,
        }
    }

    fn owned_column(&self, column: ColumnId) -> Vec<Card> {
        self.column(column).into_iter().cloned().collect()
    }
}
