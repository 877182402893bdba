//! Service layer for the movie link lookup.
//! - `storage`: file-backed JSON map with load-all/save-all semantics.
//! - `movies`: title normalization, lookup, upsert and action dispatch.

pub mod errors;
pub mod storage;
pub mod movies;
