//! In-memory storage layer for shelf.
//!
//! Two collections, authors and books, kept in insertion order. There is no
//! removal and no update; books can only be appended.
//!
//! ## Components
//!
//! - [`Dataset`]: the collections plus list, find-by-id and foreign-key scans
//! - [`Repository`]: the store interface the resolvers use
//! - [`MemoryRepository`]: the process-memory implementation

mod dataset;
mod repository;

pub use dataset::Dataset;
pub use repository::{MemoryRepository, Repository};
