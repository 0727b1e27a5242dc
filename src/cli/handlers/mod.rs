mod mutate;
mod query;
mod schema;
mod serve;

pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::ShelfConfig;
use crate::graphql::{LibrarySchema, build_schema};
use crate::storage::{MemoryRepository, Repository};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: ShelfConfig,
    pub root: PathBuf,
    pub repo: Arc<dyn Repository>,
}

impl CommandContext {
    /// Seed a fresh in-memory store from the config.
    pub fn new(config: ShelfConfig, root: PathBuf) -> Result<Self> {
        let dataset = config
            .initial_dataset(&root)
            .context("Failed to load initial data")?;
        tracing::debug!(
            authors = dataset.authors().len(),
            books = dataset.books().len(),
            "seeded store"
        );
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new(dataset));
        Ok(Self { config, root, repo })
    }

    pub fn schema(&self) -> LibrarySchema {
        build_schema(Arc::clone(&self.repo))
    }
}

fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    let vars = match variables {
        Some(v) => {
            let json: serde_json::Value =
                serde_json::from_str(&v).context("Variables must be valid JSON")?;
            async_graphql::Variables::from_json(json)
        }
        None => async_graphql::Variables::default(),
    };
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = parse_variables(Some(r#"{"id": 2}"#.to_string())).unwrap();
        assert_eq!(
            vars.into_value().into_json().unwrap(),
            serde_json::json!({ "id": 2 })
        );
        assert!(parse_variables(None).unwrap().is_empty());
        assert!(parse_variables(Some("{not json".to_string())).is_err());
    }

    #[test]
    fn test_context_seeds_sample_data() {
        let ctx = CommandContext::new(ShelfConfig::default(), PathBuf::from(".")).unwrap();
        let data = ctx.repo.snapshot().unwrap();
        assert_eq!(data.books().len(), 8);
    }
}
