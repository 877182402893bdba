//! Movie title -> link lookup.
//!
//! Titles are compared case-insensitively after trimming; links are opaque strings.

pub mod catalog;
pub mod handler;
pub mod store;

pub use catalog::MovieCatalog;
pub use handler::{handle, ActionRequest};
pub use store::{find, upsert, LookupResult, MovieMap, MovieStore};
