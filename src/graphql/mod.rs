//! GraphQL schema, resolvers and HTTP surface for shelf.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! shelf serve --port 1234
//!
//! # Execute a query from CLI
//! shelf query '{ author(id: 1) { name books { name } } }'
//!
//! # Execute a mutation from CLI
//! shelf mutate 'addBook(name: "X", authorId: 2) { id }'
//! ```
//!
//! ## Schema
//!
//! - **Types**: `Author`, `Book`
//! - **Queries**: `book`, `books`, `author`, `authors`
//! - **Mutations**: `addBook`

mod schema;
mod server;
mod types;

pub use schema::{LibrarySchema, MutationRoot, QueryRoot, RequestView, build_schema, execute};
pub use server::{router, run_server};
pub use types::*;
