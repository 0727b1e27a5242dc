use crate::config::ServerSettings;
use crate::graphql::run_server;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, settings: ServerSettings) -> Result<()> {
    let schema = ctx.schema();

    println!(
        "{} http://{}:{}{}",
        "Server is running on".green(),
        settings.host,
        settings.port,
        settings.path.cyan()
    );
    if settings.graphiql {
        println!("GraphiQL: http://localhost:{}{}", settings.port, settings.path);
    }

    tokio::runtime::Runtime::new()?
        .block_on(async { run_server(schema, &settings).await })
        .with_context(|| format!("Failed to serve on {}:{}", settings.host, settings.port))?;
    Ok(())
}
