use async_graphql::{ComplexObject, Context, SimpleObject};

use super::schema::dataset;
use crate::model::{Author as ModelAuthor, Book as ModelBook};
use crate::resolvers;

/// This represents Author of the book
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[ComplexObject]
impl Author {
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        let data = dataset(ctx)?;
        Ok(Some(
            resolvers::books_by_author(&data, self.id)
                .into_iter()
                .map(|b| Some(b.into()))
                .collect(),
        ))
    }
}

impl From<ModelAuthor> for Author {
    fn from(a: ModelAuthor) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// This represents a book return by author
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Author>> {
        let data = dataset(ctx)?;
        let book = ModelBook::from(self.clone());
        Ok(resolvers::author_by_book(&data, &book).map(Author::from))
    }
}

impl From<ModelBook> for Book {
    fn from(b: ModelBook) -> Self {
        Self {
            id: b.id,
            name: b.name,
            author_id: b.author_id,
        }
    }
}

impl From<Book> for ModelBook {
    fn from(b: Book) -> Self {
        ModelBook::new(b.id, b.name, b.author_id)
    }
}
