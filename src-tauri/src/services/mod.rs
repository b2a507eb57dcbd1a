//! Services module
//!
//! Business logic services that coordinate between commands and the
//! platform clients.

pub mod notes;
pub mod session;

pub use notes::NotesService;
pub use session::SessionService;
