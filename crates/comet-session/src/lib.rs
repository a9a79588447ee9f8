//! Comet Session Management
//!
//! The Tab Session Manager: an ordered collection of tabs, each owning one
//! engine handle, with every navigation operation dispatched to the active
//! tab. Structural misuse (closing the last tab, navigating with nothing
//! open, traversing exhausted history) is a no-op, never an error.

mod error;
mod observer;
mod session;

pub use error::SessionError;
pub use observer::SessionObserver;
pub use session::Session;

pub type Result<T> = std::result::Result<T, SessionError>;
