use anyhow::{Context, Result};
use clap::Parser;

use shelf::cli::handlers::{
    CommandContext, handle_mutate, handle_query, handle_schema, handle_serve,
};
use shelf::cli::{Cli, Commands};
use shelf::config::ShelfConfig;
use shelf::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, root) = load_config(&cli)?;
    logging::init(&config.logging_settings(&root, cli.verbose, cli.log_file.clone()));
    let ctx = CommandContext::new(config, root)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            path,
            no_graphiql,
        } => {
            let mut settings = ctx.config.server.clone();
            if let Some(h) = host {
                settings.host = h;
            }
            if let Some(p) = port {
                settings.port = p;
            }
            if let Some(p) = path {
                settings.path = p;
            }
            if no_graphiql {
                settings.graphiql = false;
            }
            if !settings.path.starts_with('/') {
                anyhow::bail!("Path must start with '/': {}", settings.path);
            }
            handle_serve(ctx, settings)
        }
        Commands::Query { query, variables } => handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(ctx, mutation, variables),
        Commands::Schema => handle_schema(ctx),
    }
}

fn load_config(cli: &Cli) -> Result<(ShelfConfig, std::path::PathBuf)> {
    match &cli.config {
        Some(path) => ShelfConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            ShelfConfig::discover(&cwd).context("Failed to load config")
        }
    }
}
