use anyhow::Context;
use snack_core::entities::MetricsOptions;
use snack_core::enums::SearchOperator;
use snack_search::{SearchRequest, search_snacks};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `snackbox search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args);
    let page = search_snacks(&ctx.db, &ctx.config.search, request)
        .await
        .with_context(|| format!("search for '{}' failed", args.term))?;
    output(&page, flags.format)
}

fn build_request(args: &SearchArgs) -> SearchRequest {
    SearchRequest {
        term: args.term.clone(),
        page: args.page,
        page_size: args.page_size,
        operator: SearchOperator::parse_lenient(&args.operator),
        viewer: args.viewer.clone(),
        metrics: MetricsOptions {
            include_review_counts: args.reviews,
            include_views: args.views,
        },
    }
}
