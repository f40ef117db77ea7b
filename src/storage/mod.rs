use crate::{
    domain::{BoardId, Card, CardId, ColumnId},
    error::Result,
};
use async_trait::async_trait;

pub mod file_store;

/// Storage trait for persisting cards
///
/// Column reads come back sorted ascending by `order`, which is the shape the
/// reorder planner expects. `update_placement` is deliberately a single-card
/// write: a reorder is persisted as independent per-card updates with no
/// cross-record transaction.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a card, overwriting any previous state
    async fn save_card(&self, card: &Card) -> Result<()>;

    /// Loads a card by ID
    async fn load_card(&self, id: &CardId) -> Result<Card>;

    /// Lists cards, optionally restricted to one board, sorted by `order`
    async fn list_cards(&self, board_id: Option<&BoardId>) -> Result<Vec<Card>>;

    /// Lists the cards of one column sorted ascending by `order`
    async fn cards_in_column(
        &self,
        board_id: Option<&BoardId>,
        column: ColumnId,
    ) -> Result<Vec<Card>>;

    /// Rewrites a single card's column and order, returning the updated card
    async fn update_placement(&self, id: &CardId, column: ColumnId, order: usize) -> Result<Card>;

    /// Deletes a card, returning its last persisted state
    async fn delete_card(&self, id: &CardId) -> Result<Card>;

    /// Checks if the backend has been initialized
    async fn is_initialized(&self) -> bool;
}
