//! Entity resolvers.
//!
//! Pure lookups over a [`Dataset`], independent of the GraphQL layer. A
//! lookup that matches nothing yields `None` or an empty list, never an error.

use crate::model::{Author, Book};
use crate::storage::Dataset;

/// Every book written by `author_id`, in store insertion order.
pub fn books_by_author(data: &Dataset, author_id: i32) -> Vec<Book> {
    data.books_by_author(author_id).cloned().collect()
}

/// The author a book points at, or `None` for a dangling reference.
pub fn author_by_book(data: &Dataset, book: &Book) -> Option<Author> {
    data.find_author(book.author_id).cloned()
}

/// Lookup by optional id. A missing id matches nothing.
pub fn book_by_id(data: &Dataset, id: Option<i32>) -> Option<Book> {
    id.and_then(|id| data.find_book(id)).cloned()
}

/// Lookup by optional id. A missing id matches nothing.
pub fn author_by_id(data: &Dataset, id: Option<i32>) -> Option<Author> {
    id.and_then(|id| data.find_author(id)).cloned()
}
