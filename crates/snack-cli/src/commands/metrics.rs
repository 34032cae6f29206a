use snack_core::entities::MetricsOptions;
use snack_search::fetch_metrics;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetricsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `snackbox metrics`.
pub async fn handle(
    args: &MetricsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let options = MetricsOptions {
        include_review_counts: args.reviews,
        include_views: args.views,
    };
    let metrics = fetch_metrics(&ctx.db, &args.ids, args.viewer.as_deref(), options).await;
    output(&metrics, flags.format)
}
