//! Comet Tab Management
//!
//! Tabs carry a stable identifier from creation to close; the UI binds
//! identifiers, never positions. Positions are a property of the
//! [`TabStrip`] and are recomputed on every removal.

mod error;
mod strip;
mod tab;

pub use error::TabError;
pub use strip::{RemovedTab, TabStrip};
pub use tab::{Tab, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
