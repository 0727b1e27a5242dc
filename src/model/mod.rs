//! Data models for shelf.
//!
//! - [`Author`]: a writer, identified by an integer id
//! - [`Book`]: a title pointing at its author through `author_id`

mod author;
mod book;

pub use author::Author;
pub use book::Book;
