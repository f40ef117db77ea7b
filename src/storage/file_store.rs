use crate::{
    domain::{BoardId, Card, CardId, ColumnId},
    error::{CorkboardError, Result},
    storage::CardStore,
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;
use tracing::debug;

/// File-based card store
///
/// Each card is one pretty-printed JSON file under
/// `<root>/.corkboard/cards/<uuid>.json`.
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const CORKBOARD_DIR: &'static str = ".corkboard";
    const CARDS_DIR: &'static str = "cards";

    /// Creates a new FileStore instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::CORKBOARD_DIR),
        }
    }

    fn cards_dir(&self) -> PathBuf {
        self.root_path.join(Self::CARDS_DIR)
    }

    fn card_file(&self, id: &CardId) -> PathBuf {
        self.cards_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Reads every card file in the store
    async fn read_all(&self) -> Result<Vec<Card>> {
        let cards_dir = self.cards_dir();

        if !cards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&cards_dir).await?;
        let mut cards: Vec<Card> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if CardId::from_str(stem).is_err() {
                continue;
            }

            let contents = fs::read_to_string(&path).await?;
            cards.push(serde_json::from_str(&contents)?);
        }

        Ok(cards)
    }
}

#[async_trait]
impl CardStore for FileStore {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.cards_dir()).await?;
        debug!(root = %self.root_path.display(), "initialized file store");
        Ok(())
    }

    async fn save_card(&self, card: &Card) -> Result<()> {
        self.ensure_directory_exists(&self.cards_dir()).await?;

        let json = serde_json::to_string_pretty(card)?;
        fs::write(self.card_file(&card.id), json).await?;
        Ok(())
    }

    async fn load_card(&self, id: &CardId) -> Result<Card> {
        let file_path = self.card_file(id);

        if !file_path.exists() {
            return Err(CorkboardError::CardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let card: Card = serde_json::from_str(&contents)?;

        Ok(card)
    }

    async fn list_cards(&self, board_id: Option<&BoardId>) -> Result<Vec<Card>> {
        let mut cards = self.read_all().await?;

        if let Some(board_id) = board_id {
            cards.retain(|c| c.board_id == *board_id);
        }
        cards.sort_by_key(|c| c.order);

        Ok(cards)
    }

    async fn cards_in_column(
        &self,
        board_id: Option<&BoardId>,
        column: ColumnId,
    ) -> Result<Vec<Card>> {
        let mut cards = self.list_cards(board_id).await?;
        cards.retain(|c| c.column == column);
        Ok(cards)
    }

    async fn update_placement(&self, id: &CardId, column: ColumnId, order: usize) -> Result<Card> {
        let mut card = self.load_card(id).await?;
        card.move_to(column, order);
        self.save_card(&card).await?;
        debug!(card = %id, column = %column, order, "updated placement");
        Ok(card)
    }

    async fn delete_card(&self, id: &CardId) -> Result<Card> {
        let card = self.load_card(id).await?;
        fs::remove_file(self.card_file(id)).await?;
        Ok(card)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.cards_dir().exists()
    }
}
