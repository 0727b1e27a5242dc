use crate::{
    error::{Result, ShelfError},
    model::{Author, Book},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The two collections held by a store.
///
/// Order is insertion order and is never re-sorted. Lookups are linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    authors: Vec<Author>,

    #[serde(default)]
    books: Vec<Book>,
}

impl Dataset {
    pub fn new(authors: Vec<Author>, books: Vec<Book>) -> Self {
        Self { authors, books }
    }

    /// The fixed sample library the server starts with.
    pub fn sample() -> Self {
        Self::new(
            vec![Author::new(1, "A"), Author::new(2, "B"), Author::new(3, "C")],
            vec![
                Book::new(1, "Abc", 1),
                Book::new(3, "Ghi", 1),
                Book::new(2, "Def", 1),
                Book::new(4, "Jkl", 2),
                Book::new(5, "Mno", 2),
                Book::new(6, "Pqr", 2),
                Book::new(7, "Stu", 3),
                Book::new(8, "Vwx", 3),
            ],
        )
    }

    /// Load a dataset from a YAML file with `authors:` and `books:` lists.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShelfError::Config(format!("Cannot read seed file {}: {}", path.display(), e))
        })?;
        let dataset: Dataset = serde_yaml::from_str(&content)?;
        if let Some(id) = dataset.duplicate_author_id() {
            return Err(ShelfError::Config(format!(
                "Duplicate author id {} in seed file {}",
                id,
                path.display()
            )));
        }
        Ok(dataset)
    }

    /// First author id that appears twice. Author ids must be unique, otherwise
    /// `book -> author` lookups are ambiguous.
    pub fn duplicate_author_id(&self) -> Option<i32> {
        let mut seen = HashSet::new();
        self.authors
            .iter()
            .map(|a| a.id)
            .find(|id| !seen.insert(*id))
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find_author(&self, id: i32) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn find_book(&self, id: i32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Books whose `author_id` matches, in insertion order.
    pub fn books_by_author(&self, author_id: i32) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(move |b| b.is_written_by(author_id))
    }

    /// Append a book, deriving its id from the current length.
    ///
    /// The derived id is only unique while books are never removed.
    pub fn append_book(&mut self, name: String, author_id: i32) -> Book {
        let id = self.books.len() as i32 + 1;
        let book = Book::new(id, name, author_id);
        self.books.push(book.clone());
        book
    }
}
