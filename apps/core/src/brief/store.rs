//! Brief State Store
//!
//! Single source of truth for the live brief. Persistence goes through the
//! `SnapshotSlot` port: one named key holding the JSON-serialized brief.
//!
//! A committed mutation is always followed by a full-snapshot write, and the
//! in-memory brief is only replaced once that write succeeded.

use crate::brief::derivation::{apply_field_change, revalidate, toggle_practice, PruneReport};
use crate::error::AppError;
use crate::models::{BestPractice, Brief, FieldChange};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Key under which the brief snapshot is stored.
pub const BRIEF_SLOT_KEY: &str = "contentBrief";

/// A single named key-value entry holding the serialized brief.
#[async_trait]
pub trait SnapshotSlot: Send + Sync + 'static {
    /// Returns the stored snapshot, or `None` when nothing was saved yet.
    async fn read(&self) -> Result<Option<String>, AppError>;

    /// Overwrites the stored snapshot.
    async fn write(&self, snapshot: &str) -> Result<(), AppError>;
}

/// In-process slot, used for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `snapshot`.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(snapshot.into())),
        }
    }
}

#[async_trait]
impl SnapshotSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, AppError> {
        Ok(self.value.lock().await.clone())
    }

    async fn write(&self, snapshot: &str) -> Result<(), AppError> {
        *self.value.lock().await = Some(snapshot.to_string());
        Ok(())
    }
}

/// Outcome of a committed update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUpdate {
    pub brief: Brief,
    pub pruned: PruneReport,
}

/// Owns the live brief and its persistence slot.
pub struct BriefStore {
    slot: Box<dyn SnapshotSlot>,
    brief: Brief,
}

impl BriefStore {
    /// Opens the store, restoring the last persisted snapshot if there is one.
    pub async fn open(slot: Box<dyn SnapshotSlot>) -> Self {
        let mut store = Self {
            slot,
            brief: Brief::default(),
        };
        store.brief = store.load().await;
        store
    }

    /// Current committed brief.
    pub fn brief(&self) -> &Brief {
        &self.brief
    }

    /// Reads the persisted snapshot. A missing, unreadable or malformed
    /// snapshot yields the default brief; this never fails.
    ///
    /// Selections the catalog no longer allows are pruned on the way in.
    pub async fn load(&self) -> Brief {
        let raw = match self.slot.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No saved brief found, starting from defaults");
                return Brief::default();
            }
            Err(e) => {
                warn!("Failed to read brief snapshot, using defaults: {}", e);
                return Brief::default();
            }
        };

        match serde_json::from_str::<Brief>(&raw) {
            Ok(brief) => {
                let derivation = revalidate(brief);
                if !derivation.pruned.is_empty() {
                    debug!(
                        cleared_content_type = ?derivation.pruned.cleared_content_type,
                        dropped_practices = ?derivation.pruned.dropped_practices,
                        "Pruned saved brief against the current catalog"
                    );
                }
                derivation.brief
            }
            Err(e) => {
                warn!("Saved brief is malformed, using defaults: {}", e);
                Brief::default()
            }
        }
    }

    /// Serializes the full brief into the slot, overwriting the previous snapshot.
    pub async fn save(&self, brief: &Brief) -> Result<(), AppError> {
        let snapshot = serde_json::to_string(brief)?;
        self.slot.write(&snapshot).await
    }

    /// Applies `changes` in order through the derivation engine and commits
    /// the result with a single snapshot write.
    pub async fn update<I>(&mut self, changes: I) -> Result<StoreUpdate, AppError>
    where
        I: IntoIterator<Item = FieldChange>,
    {
        let mut brief = self.brief.clone();
        let mut pruned = PruneReport::default();

        for change in changes {
            let field = change.field_name();
            let derivation = apply_field_change(brief, change);
            if !derivation.pruned.is_empty() {
                debug!(
                    field,
                    cleared_content_type = ?derivation.pruned.cleared_content_type,
                    dropped_practices = ?derivation.pruned.dropped_practices,
                    "Pruned selections after field change"
                );
            }
            pruned.merge(derivation.pruned);
            brief = derivation.brief;
        }

        self.commit(brief.clone()).await?;
        Ok(StoreUpdate { brief, pruned })
    }

    /// Flips one best practice and commits.
    pub async fn toggle(&mut self, practice: BestPractice) -> Result<Brief, AppError> {
        let brief = toggle_practice(self.brief.clone(), practice);
        self.commit(brief.clone()).await?;
        Ok(brief)
    }

    async fn commit(&mut self, brief: Brief) -> Result<(), AppError> {
        self.save(&brief).await?;
        self.brief = brief;
        Ok(())
    }
}
