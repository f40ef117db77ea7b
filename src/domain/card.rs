use crate::domain::column::ColumnId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a card, assigned at creation and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    /// Creates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for CardId {
    type Err = crate::error::CorkboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| crate::error::CorkboardError::InvalidCardId(s.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the board a card belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(Uuid);

impl BoardId {
    /// Creates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BoardId {
    type Err = crate::error::CorkboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| crate::error::CorkboardError::InvalidBoardId(s.to_string()))
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A work item on the board
///
/// `order` is the zero-based rank of the card within its column. For every
/// `(board, column)` pair the orders of its cards are exactly `0..n` — no
/// gaps, no duplicates; ascending order defines display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub board_id: BoardId,
    pub column: ColumnId,
    pub order: usize,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card at the given position
    pub fn new(board_id: BoardId, column: ColumnId, order: usize, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            board_id,
            column,
            order,
            title,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Sets the description
    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
        self.updated_at = Utc::now();
    }

    /// Moves the card to a new column/order position
    pub fn move_to(&mut self, column: ColumnId, order: usize) {
        self.column = column;
        self.order = order;
        self.updated_at = Utc::now();
    }

    /// Applies a partial update
    pub fn apply_patch(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(column) = patch.column {
            self.column = column;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a card
///
/// The card's `order` is not part of the draft: new cards are appended at the
/// end of their column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub board_id: BoardId,
    #[serde(rename = "columnId")]
    pub column: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for a card's payload or position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "columnId", skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_parsing() {
        let id = CardId::new();
        let parsed = CardId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);

        assert!(CardId::from_str("not-a-uuid").is_err());
        assert!(CardId::from_str("").is_err());
    }

    #[test]
    fn test_card_ids_are_unique() {
        let a = CardId::new();
        let b = CardId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_card_creation_defaults() {
        let card = Card::new(BoardId::new(), ColumnId::Todo, 3, "Write docs".to_string());

        assert_eq!(card.column, ColumnId::Todo);
        assert_eq!(card.order, 3);
        assert_eq!(card.title, "Write docs");
        assert!(card.description.is_none());
        assert_eq!(card.created_at, card.updated_at);
    }

    #[test]
    fn test_move_to_updates_placement() {
        let mut card = Card::new(BoardId::new(), ColumnId::Todo, 0, "Test".to_string());

        card.move_to(ColumnId::Done, 2);

        assert_eq!(card.column, ColumnId::Done);
        assert_eq!(card.order, 2);
    }

    #[test]
    fn test_move_to_updates_updated_at() {
        let mut card = Card::new(BoardId::new(), ColumnId::Todo, 0, "Test".to_string());
        let initial_updated_at = card.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        card.move_to(ColumnId::InProgress, 0);

        assert!(card.updated_at > initial_updated_at);
    }

    #[test]
    fn test_apply_patch() {
        let mut card = Card::new(BoardId::new(), ColumnId::Todo, 0, "Old title".to_string());

        card.apply_patch(CardPatch {
            title: Some("New title".to_string()),
            description: Some("Details".to_string()),
            ..Default::default()
        });

        assert_eq!(card.title, "New title");
        assert_eq!(card.description.as_deref(), Some("Details"));
        // Untouched fields stay put
        assert_eq!(card.column, ColumnId::Todo);
        assert_eq!(card.order, 0);
    }

    #[test]
    fn test_card_serialization_round_trip() {
        let mut card = Card::new(BoardId::new(), ColumnId::InProgress, 1, "Test".to_string());
        card.set_description("A description".to_string());

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, card);
    }

    #[test]
    fn test_card_draft_wire_field_names() {
        let json = r#"{
            "boardId": "3fa3a63c-7f1c-4a1c-9f4e-2b8f6f5c9d10",
            "columnId": "todo",
            "title": "From the wire"
        }"#;

        let draft: CardDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.column, ColumnId::Todo);
        assert_eq!(draft.title, "From the wire");
        assert!(draft.description.is_none());
    }
}
