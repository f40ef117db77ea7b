//! # Corkboard Core
//!
//! Core reordering engine and domain models for Corkboard kanban boards.
//!
//! This crate provides the fundamental types and operations for organizing
//! cards into ordered columns and moving them by drag-and-drop, without any
//! dependency on specific UI implementations or transports. The reorder
//! planner is pure, so the server-side committer and the client-side
//! optimistic cache run the same logic and converge on the same order.

pub mod cache;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use cache::{BoardCache, RequestId};
pub use domain::{
    card::{BoardId, Card, CardDraft, CardId, CardPatch},
    column::ColumnId,
    reorder::{plan, MoveIntent, MoveRequest, Placement},
};
pub use error::{CorkboardError, Result};
pub use service::CardService;
pub use storage::CardStore;
