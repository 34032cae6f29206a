use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Metrics(args) => commands::metrics::handle(&args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
    }
}
