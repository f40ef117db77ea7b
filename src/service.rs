//! Card operations against a persistence store.
//!
//! [`CardService`] owns the commit side of a move: it reads authoritative
//! column state, runs the reorder planner, and persists the resulting
//! placements as independent per-card writes. There is no cross-record
//! transaction; a failed subset of writes leaves the column to self-heal on
//! the next successful reorder, which re-derives every order from a fresh
//! read.

use crate::{
    domain::{
        card::{BoardId, Card, CardDraft, CardId, CardPatch},
        reorder::{self, MoveIntent, MoveRequest},
    },
    error::Result,
    storage::CardStore,
};
use futures::future::join_all;
use tracing::{debug, error};

/// Card CRUD and reordering backed by a [`CardStore`]
pub struct CardService<S> {
    store: S,
}

impl<S: CardStore> CardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a card appended at the end of its column
    pub async fn create_card(&self, draft: CardDraft) -> Result<Card> {
        let siblings = self
            .store
            .cards_in_column(Some(&draft.board_id), draft.column)
            .await?;

        let mut card = Card::new(draft.board_id, draft.column, siblings.len(), draft.title);
        if let Some(description) = draft.description {
            card.set_description(description);
        }
        self.store.save_card(&card).await?;
        debug!(card = %card.id, column = %card.column, order = card.order, "created card");

        Ok(card)
    }

    /// Loads a single card
    pub async fn card(&self, id: &CardId) -> Result<Card> {
        self.store.load_card(id).await
    }

    /// Lists cards, optionally restricted to one board, sorted by order
    pub async fn cards(&self, board_id: Option<&BoardId>) -> Result<Vec<Card>> {
        self.store.list_cards(board_id).await
    }

    /// Applies a partial update to a card
    pub async fn update_card(&self, id: &CardId, patch: CardPatch) -> Result<Card> {
        let mut card = self.store.load_card(id).await?;
        card.apply_patch(patch);
        self.store.save_card(&card).await?;
        Ok(card)
    }

    /// Deletes a card and re-compacts the orders of its column
    pub async fn delete_card(&self, id: &CardId) -> Result<Card> {
        let card = self.store.delete_card(id).await?;

        let survivors = self
            .store
            .cards_in_column(Some(&card.board_id), card.column)
            .await?;
        for (position, survivor) in survivors.iter().enumerate() {
            if survivor.order != position {
                self.store
                    .update_placement(&survivor.id, survivor.column, position)
                    .await?;
            }
        }
        debug!(card = %id, column = %card.column, "deleted card");

        Ok(card)
    }

    /// Wire-facing entry point: validates the raw move request before any
    /// store access, then commits it
    pub async fn update_position(&self, id: &CardId, request: &MoveRequest) -> Result<Card> {
        let intent = request.validate()?;
        self.reorder(id, intent).await
    }

    /// Moves a card per `intent` and persists the recomputed order of every
    /// affected card, returning the moved card's final persisted state
    pub async fn reorder(&self, id: &CardId, intent: MoveIntent) -> Result<Card> {
        debug!(
            card = %id,
            source = %intent.source_column,
            destination = %intent.destination_column,
            source_index = intent.source_index,
            destination_index = intent.destination_index,
            "reordering card"
        );

        let moved = self.store.load_card(id).await?;
        let board_id = moved.board_id.clone();

        let (source, destination) = futures::join!(
            self.store
                .cards_in_column(Some(&board_id), intent.source_column),
            self.store
                .cards_in_column(Some(&board_id), intent.destination_column),
        );
        let (source, destination) = (source?, destination?);

        let placements = reorder::plan(&moved, &source, &destination, &intent);
        if placements.is_empty() {
            debug!(card = %id, "move is a no-op");
            return Ok(moved);
        }

        // Independent per-card writes. A failed subset is surfaced, not
        // rolled back or retried; the column's order self-heals on the next
        // successful reorder.
        let writes = placements
            .iter()
            .map(|p| self.store.update_placement(&p.card_id, p.column, p.order));
        let mut first_failure = None;
        for result in join_all(writes).await {
            if let Err(err) = result {
                error!(card = %id, error = %err, "failed to persist placement");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
        if let Some(err) = first_failure {
            return Err(err);
        }
        debug!(card = %id, placements = placements.len(), "reorder committed");

        self.store.load_card(id).await
    }
}
