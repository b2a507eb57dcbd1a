//! Storage module
//!
//! Client for the platform's managed object store, which holds note images.

pub mod object_store;

pub use object_store::{HttpObjectStore, ObjectStore};
