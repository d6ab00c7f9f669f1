//! `rollcall-engine` — user-roster import engine.
//!
//! Pure engine crate: receives pre-parsed records, matches them against an
//! existing user set, and reconciles them into a store. No file-format or
//! CLI dependencies.

pub mod error;
pub mod matcher;
pub mod model;
pub mod reconcile;
pub mod staging;
pub mod store;
pub mod template;

pub use error::ImportError;
pub use model::{ImportSummary, MatchPartition, UserRecord};
pub use reconcile::reconcile;
pub use store::{MemoryStore, UserStore};
