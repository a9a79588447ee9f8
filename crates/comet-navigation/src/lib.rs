//! Comet Navigation
//!
//! Address-bar input resolution and the per-tab back/forward ledger.
//! The platform webview offers no synchronous history query, so the shell's
//! engine handles keep a [`NavigationLedger`] updated from the load and
//! traversal calls that all route through them.

mod input;
mod ledger;

pub use input::{InputResolution, InputResolver};
pub use ledger::NavigationLedger;
