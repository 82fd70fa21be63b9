//! # Brief Module
//!
//! Everything that reads or rewrites the single live content brief.
//!
//! ## Components
//! - `derivation`: field-change transitions with dependent-option pruning
//! - `outline`: deterministic local outline template
//! - `store`: persisted single source of truth for the brief
//! - `export`: Markdown / JSON preview of the brief

pub mod derivation;
pub mod export;
pub mod outline;
pub mod store;

pub use derivation::{apply_field_change, revalidate, toggle_practice, Derivation, PruneReport};
pub use export::{render_json, render_markdown};
pub use outline::{generate_outline, outline_for};
pub use store::{BriefStore, MemorySlot, SnapshotSlot, BRIEF_SLOT_KEY};
