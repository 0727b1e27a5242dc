//! # Shelf - a GraphQL server over an in-memory library
//!
//! Shelf serves two collections, authors and books, through a small GraphQL
//! schema. Books point at their author by id; relations are resolved by
//! scanning the collections. The only write is appending a book.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve on http://0.0.0.0:1234/graphql (GraphiQL on GET)
//! shelf serve
//!
//! # Run a query against a freshly seeded store
//! shelf query '{ book(id: 4) { name author { name } } }'
//!
//! # Print the schema
//! shelf schema
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, types and HTTP server
//! - [`model`]: Data models (Author, Book)
//! - [`resolvers`]: Relational lookups over the store
//! - [`storage`]: In-memory store

/// Command-line interface using clap.
pub mod cli;

/// Configuration loading.
///
/// Handles `.shelf.yml` discovery and defaults.
pub mod config;

/// Error types and result aliases.
///
/// Defines `ShelfError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and HTTP surface.
pub mod graphql;

pub mod logging;
pub mod model;
pub mod resolvers;
pub mod storage;
