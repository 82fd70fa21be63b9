//! # Actors
//!
//! The brief actor (single writer of the brief) and the collaborators it
//! drives for keyword enrichment.

pub mod enricher;
pub mod messages;
pub mod search;
pub mod supervisor;
pub mod traits;
