use super::dataset::Dataset;
use crate::{
    error::{Result, ShelfError},
    model::Book,
};
use std::sync::{Arc, RwLock};

/// Storage backend behind the resolvers.
///
/// Reads go through immutable snapshots; the only write is appending a book.
pub trait Repository: Send + Sync {
    /// Current contents of the store. Later appends are not visible through it.
    fn snapshot(&self) -> Result<Arc<Dataset>>;

    /// Append a new book and return it with its derived id.
    fn add_book(&self, name: String, author_id: i32) -> Result<Book>;
}

/// In-process store. Readers share the current `Arc<Dataset>`, the writer
/// swaps in a new one.
pub struct MemoryRepository {
    data: RwLock<Arc<Dataset>>,
}

impl MemoryRepository {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(Arc::new(dataset)),
        }
    }

    pub fn with_sample_data() -> Self {
        Self::new(Dataset::sample())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::with_sample_data()
    }
}

impl Repository for MemoryRepository {
    fn snapshot(&self) -> Result<Arc<Dataset>> {
        let data = self
            .data
            .read()
            .map_err(|_| ShelfError::Storage("store lock poisoned".to_string()))?;
        Ok(Arc::clone(&data))
    }

    fn add_book(&self, name: String, author_id: i32) -> Result<Book> {
        let mut data = self
            .data
            .write()
            .map_err(|_| ShelfError::Storage("store lock poisoned".to_string()))?;

        // Length read and push happen under the same write lock.
        let book = Arc::make_mut(&mut *data).append_book(name, author_id);
        tracing::debug!(id = book.id, author_id, "appended book");
        Ok(book)
    }
}
