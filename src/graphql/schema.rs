use std::sync::{Arc, Mutex, PoisonError};

use async_graphql::{Context, EmptySubscription, Object, Schema};

use crate::error::Result;
use crate::resolvers;
use crate::storage::{Dataset, Repository};

use super::types::*;

pub type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repo: Arc<dyn Repository>) -> LibrarySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(repo)
        .finish()
}

/// Execute a request with its own [`RequestView`] attached.
///
/// Every entry point (HTTP and CLI) goes through here so that one operation
/// reads a single snapshot of the store.
pub async fn execute(
    schema: &LibrarySchema,
    request: async_graphql::Request,
) -> async_graphql::Response {
    schema.execute(request.data(RequestView::default())).await
}

/// Request-scoped view of the store.
///
/// The snapshot is captured on first read and reused by every later resolver
/// of the same request. `addBook` refreshes it after appending.
#[derive(Default)]
pub struct RequestView {
    current: Mutex<Option<Arc<Dataset>>>,
}

impl RequestView {
    fn get_or_capture(&self, repo: &dyn Repository) -> Result<Arc<Dataset>> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = current.as_ref() {
            return Ok(Arc::clone(data));
        }
        let data = repo.snapshot()?;
        *current = Some(Arc::clone(&data));
        Ok(data)
    }

    fn refresh(&self, repo: &dyn Repository) -> Result<()> {
        let data = repo.snapshot()?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(data);
        Ok(())
    }
}

fn get_repo<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<dyn Repository>> {
    ctx.data::<Arc<dyn Repository>>()
}

/// The dataset visible to the current request.
pub(super) fn dataset(ctx: &Context<'_>) -> async_graphql::Result<Arc<Dataset>> {
    let repo = get_repo(ctx)?;
    let data = match ctx.data_opt::<RequestView>() {
        Some(view) => view.get_or_capture(repo.as_ref())?,
        None => repo.snapshot()?,
    };
    Ok(data)
}

pub struct QueryRoot;

/// Root Query
#[Object(name = "Query")]
impl QueryRoot {
    /// A Single Book
    async fn book(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> async_graphql::Result<Option<Book>> {
        let data = dataset(ctx)?;
        Ok(resolvers::book_by_id(&data, id).map(Book::from))
    }

    /// List of books
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        let data = dataset(ctx)?;
        Ok(Some(
            data.books().iter().cloned().map(|b| Some(b.into())).collect(),
        ))
    }

    /// A Single Author
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> async_graphql::Result<Option<Author>> {
        let data = dataset(ctx)?;
        Ok(resolvers::author_by_id(&data, id).map(Author::from))
    }

    /// List of Authors
    async fn authors(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Author>>>> {
        let data = dataset(ctx)?;
        Ok(Some(
            data.authors().iter().cloned().map(|a| Some(a.into())).collect(),
        ))
    }
}

pub struct MutationRoot;

/// Root Mutation
#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a book
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        author_id: i32,
    ) -> async_graphql::Result<Option<Book>> {
        let repo = get_repo(ctx)?;
        let book = repo.add_book(name, author_id)?;
        if let Some(view) = ctx.data_opt::<RequestView>() {
            view.refresh(repo.as_ref())?;
        }
        Ok(Some(book.into()))
    }
}
