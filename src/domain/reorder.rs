//! Planning logic for card moves.
//!
//! [`plan`] is pure and deterministic: given the current order-sorted card
//! lists of the source and destination columns plus a [`MoveIntent`], it
//! computes the `(column, order)` assignment for every card that has to
//! change. It performs no I/O, so the committer and the client-side cache
//! run the exact same logic against their own data.

use crate::domain::card::{Card, CardId};
use crate::domain::column::ColumnId;
use crate::error::{CorkboardError, Result};
use serde::{Deserialize, Serialize};

/// A validated request to move one card between (column, index) pairs.
///
/// Construction goes through [`MoveIntent::new`] or [`MoveRequest::validate`];
/// an intent in hand always names recognized columns and in-range indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub source_column: ColumnId,
    pub destination_column: ColumnId,
    pub source_index: usize,
    pub destination_index: usize,
}

impl MoveIntent {
    pub fn new(
        source_column: ColumnId,
        destination_column: ColumnId,
        source_index: usize,
        destination_index: usize,
    ) -> Self {
        Self {
            source_column,
            destination_column,
            source_index,
            destination_index,
        }
    }

    /// Whether the move stays within a single column
    pub fn is_same_column(&self) -> bool {
        self.source_column == self.destination_column
    }
}

/// Wire form of a move intent, as carried by any transport.
///
/// Field names are the stable contract: `sourceColumn`, `destinationColumn`,
/// `sourceIndex`, `destinationIndex`. Columns arrive as free-form strings and
/// indices as signed numbers; [`MoveRequest::validate`] turns them into a
/// [`MoveIntent`] or rejects them before any store access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub source_column: String,
    pub destination_column: String,
    pub source_index: i64,
    pub destination_index: i64,
}

impl MoveRequest {
    /// Validates the raw request against the fixed column enumeration and the
    /// non-negative index constraint
    pub fn validate(&self) -> Result<MoveIntent> {
        let source_column = self.source_column.parse()?;
        let destination_column = self.destination_column.parse()?;
        let source_index = to_index(self.source_index)?;
        let destination_index = to_index(self.destination_index)?;

        Ok(MoveIntent {
            source_column,
            destination_column,
            source_index,
            destination_index,
        })
    }
}

fn to_index(raw: i64) -> Result<usize> {
    usize::try_from(raw).map_err(|_| CorkboardError::InvalidIndex(raw))
}

/// New `(column, order)` assignment for a single card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub card_id: CardId,
    pub column: ColumnId,
    pub order: usize,
}

/// Computes the placements required to apply `intent`.
///
/// `source` and `destination` are the full, order-sorted card lists of the
/// two columns as read at plan time; the moved card appears in `source`. For
/// a same-column move `destination` is ignored. A destination index past the
/// end of the list appends rather than erroring.
///
/// The result is the minimal set of assignments: cards whose `(column,
/// order)` already match their target position are omitted, so a move of a
/// card onto its own current position yields an empty plan.
pub fn plan(
    moved: &Card,
    source: &[Card],
    destination: &[Card],
    intent: &MoveIntent,
) -> Vec<Placement> {
    if intent.is_same_column() {
        plan_same_column(moved, source, intent.destination_index)
    } else {
        plan_cross_column(moved, source, destination, intent)
    }
}

/// Remove, re-insert at the target index, renumber the whole column.
fn plan_same_column(moved: &Card, column_cards: &[Card], destination_index: usize) -> Vec<Placement> {
    let mut cards: Vec<&Card> = column_cards.iter().filter(|c| c.id != moved.id).collect();
    let at = destination_index.min(cards.len());
    cards.insert(at, moved);

    renumber(&cards, moved.column)
}

/// Close the gap in the source column, then renumber the destination with the
/// moved card spliced in.
fn plan_cross_column(
    moved: &Card,
    source: &[Card],
    destination: &[Card],
    intent: &MoveIntent,
) -> Vec<Placement> {
    let remaining: Vec<&Card> = source.iter().filter(|c| c.id != moved.id).collect();
    let mut placements = renumber(&remaining, intent.source_column);

    let mut receiving: Vec<&Card> = destination.iter().filter(|c| c.id != moved.id).collect();
    let at = intent.destination_index.min(receiving.len());
    receiving.insert(at, moved);
    placements.extend(renumber(&receiving, intent.destination_column));

    placements
}

/// Assigns `order = position` across the list, emitting a placement only for
/// cards whose recorded `(column, order)` differs.
fn renumber(cards: &[&Card], column: ColumnId) -> Vec<Placement> {
    cards
        .iter()
        .enumerate()
        .filter(|(position, card)| card.column != column || card.order != *position)
        .map(|(position, card)| Placement {
            card_id: card.id.clone(),
            column,
            order: position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::BoardId;

    fn card_in(column: ColumnId, order: usize, title: &str) -> Card {
        Card::new(BoardId::new(), column, order, title.to_string())
    }

    /// Applies a plan to a working copy of the cards and returns the cards of
    /// one column sorted by order.
    fn apply(cards: &[Card], placements: &[Placement], column: ColumnId) -> Vec<Card> {
        let mut cards = cards.to_vec();
        for placement in placements {
            if let Some(card) = cards.iter_mut().find(|c| c.id == placement.card_id) {
                card.move_to(placement.column, placement.order);
            }
        }
        let mut in_column: Vec<Card> = cards.into_iter().filter(|c| c.column == column).collect();
        in_column.sort_by_key(|c| c.order);
        in_column
    }

    fn assert_orders_are_compact(cards: &[Card]) {
        for (position, card) in cards.iter().enumerate() {
            assert_eq!(card.order, position, "gap or duplicate at {}", position);
        }
    }

    #[test]
    fn test_cross_column_move_to_empty_column() {
        // todo = [C1, C2, C3]; move C2 to inProgress at index 0
        let c1 = card_in(ColumnId::Todo, 0, "C1");
        let c2 = card_in(ColumnId::Todo, 1, "C2");
        let c3 = card_in(ColumnId::Todo, 2, "C3");
        let source = vec![c1.clone(), c2.clone(), c3.clone()];
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::InProgress, 1, 0);

        let placements = plan(&c2, &source, &[], &intent);

        let all: Vec<Card> = source;
        let todo = apply(&all, &placements, ColumnId::Todo);
        let in_progress = apply(&all, &placements, ColumnId::InProgress);

        assert_eq!(
            todo.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["C1", "C3"]
        );
        assert_eq!(
            in_progress.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["C2"]
        );
        assert_orders_are_compact(&todo);
        assert_orders_are_compact(&in_progress);
    }

    #[test]
    fn test_same_column_reorder() {
        // todo = [C1, C2, C3]; move C1 to index 2
        let c1 = card_in(ColumnId::Todo, 0, "C1");
        let c2 = card_in(ColumnId::Todo, 1, "C2");
        let c3 = card_in(ColumnId::Todo, 2, "C3");
        let source = vec![c1.clone(), c2.clone(), c3.clone()];
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Todo, 0, 2);

        let placements = plan(&c1, &source, &source, &intent);

        let todo = apply(&source, &placements, ColumnId::Todo);
        assert_eq!(
            todo.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["C2", "C3", "C1"]
        );
        assert_orders_are_compact(&todo);
    }

    #[test]
    fn test_destination_index_is_clamped() {
        // inProgress = [C4]; move C5 from done to inProgress at index 99
        let c4 = card_in(ColumnId::InProgress, 0, "C4");
        let c5 = card_in(ColumnId::Done, 0, "C5");
        let intent = MoveIntent::new(ColumnId::Done, ColumnId::InProgress, 0, 99);

        let placements = plan(&c5, &[c5.clone()], &[c4.clone()], &intent);

        let all = vec![c4, c5];
        let in_progress = apply(&all, &placements, ColumnId::InProgress);
        assert_eq!(
            in_progress.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["C4", "C5"]
        );
        assert_orders_are_compact(&in_progress);
    }

    #[test]
    fn test_move_into_empty_destination() {
        // done = []; move C6 from todo to done at index 0
        let c6 = card_in(ColumnId::Todo, 0, "C6");
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Done, 0, 0);

        let placements = plan(&c6, &[c6.clone()], &[], &intent);

        let done = apply(&[c6], &placements, ColumnId::Done);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "C6");
        assert_eq!(done[0].order, 0);
    }

    #[test]
    fn test_no_op_move_yields_empty_plan() {
        let c1 = card_in(ColumnId::Todo, 0, "C1");
        let c2 = card_in(ColumnId::Todo, 1, "C2");
        let source = vec![c1.clone(), c2.clone()];
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Todo, 1, 1);

        let placements = plan(&c2, &source, &source, &intent);

        assert!(placements.is_empty());
    }

    #[test]
    fn test_unchanged_cards_are_omitted() {
        // Moving the last card up one spot touches only the two swapped cards
        let c1 = card_in(ColumnId::Todo, 0, "C1");
        let c2 = card_in(ColumnId::Todo, 1, "C2");
        let c3 = card_in(ColumnId::Todo, 2, "C3");
        let source = vec![c1.clone(), c2.clone(), c3.clone()];
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Todo, 2, 1);

        let placements = plan(&c3, &source, &source, &intent);

        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|p| p.card_id != c1.id));
    }

    #[test]
    fn test_cross_column_conservation() {
        let todo: Vec<Card> = (0..4)
            .map(|i| card_in(ColumnId::Todo, i, &format!("T{}", i)))
            .collect();
        let done: Vec<Card> = (0..3)
            .map(|i| card_in(ColumnId::Done, i, &format!("D{}", i)))
            .collect();
        let moved = todo[2].clone();
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Done, 2, 1);

        let placements = plan(&moved, &todo, &done, &intent);

        let mut all = todo.clone();
        all.extend(done.clone());
        let new_todo = apply(&all, &placements, ColumnId::Todo);
        let new_done = apply(&all, &placements, ColumnId::Done);

        assert_eq!(new_todo.len(), 3);
        assert_eq!(new_done.len(), 4);
        assert_eq!(new_todo.len() + new_done.len(), all.len());
        assert!(new_todo.iter().all(|c| c.id != moved.id));
        assert_eq!(new_done.iter().filter(|c| c.id == moved.id).count(), 1);
        assert_eq!(new_done[1].id, moved.id);
        assert_orders_are_compact(&new_todo);
        assert_orders_are_compact(&new_done);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let c1 = card_in(ColumnId::Todo, 0, "C1");
        let c2 = card_in(ColumnId::Todo, 1, "C2");
        let source = vec![c1.clone(), c2.clone()];
        let intent = MoveIntent::new(ColumnId::Todo, ColumnId::Todo, 0, 1);

        let first = plan(&c1, &source, &source, &intent);
        let second = plan(&c1, &source, &source, &intent);

        assert_eq!(first, second);
    }

    #[test]
    fn test_move_request_validation() {
        let request = MoveRequest {
            source_column: "todo".to_string(),
            destination_column: "inProgress".to_string(),
            source_index: 0,
            destination_index: 2,
        };

        let intent = request.validate().unwrap();
        assert_eq!(intent.source_column, ColumnId::Todo);
        assert_eq!(intent.destination_column, ColumnId::InProgress);
        assert_eq!(intent.destination_index, 2);
    }

    #[test]
    fn test_move_request_rejects_unknown_column() {
        let request = MoveRequest {
            source_column: "archive".to_string(),
            destination_column: "done".to_string(),
            source_index: 0,
            destination_index: 0,
        };

        assert!(matches!(
            request.validate(),
            Err(CorkboardError::InvalidColumn(c)) if c == "archive"
        ));
    }

    #[test]
    fn test_move_request_rejects_negative_index() {
        let request = MoveRequest {
            source_column: "todo".to_string(),
            destination_column: "done".to_string(),
            source_index: 0,
            destination_index: -1,
        };

        assert!(matches!(
            request.validate(),
            Err(CorkboardError::InvalidIndex(-1))
        ));
    }

    #[test]
    fn test_move_request_wire_field_names() {
        let json = r#"{
            "sourceColumn": "todo",
            "destinationColumn": "done",
            "sourceIndex": 1,
            "destinationIndex": 0
        }"#;

        let request: MoveRequest = serde_json::from_str(json).unwrap();
        let intent = request.validate().unwrap();
        assert_eq!(intent.source_column, ColumnId::Todo);
        assert_eq!(intent.destination_column, ColumnId::Done);
        assert_eq!(intent.source_index, 1);
        assert_eq!(intent.destination_index, 0);
    }
}
