use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search public snacks; an empty term lists the newest ones.
    Search(SearchArgs),
    /// Likes, score averages, and optional counters for snack ids.
    Metrics(MetricsArgs),
    /// Load a JSON catalog of types, flavors, keywords, and snacks.
    Import(ImportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    #[arg(default_value = "")]
    pub term: String,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Results per page (defaults to `search.default_page_size`)
    #[arg(long)]
    pub page_size: Option<u32>,
    /// `or` unions token matches; anything else intersects them
    #[arg(long, default_value = "and")]
    pub operator: String,
    /// User id whose likes are reported
    #[arg(long)]
    pub viewer: Option<String>,
    /// Include written-review counts in metrics
    #[arg(long)]
    pub reviews: bool,
    /// Include view counters in metrics
    #[arg(long)]
    pub views: bool,
}

#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
    #[arg(long)]
    pub viewer: Option<String>,
    #[arg(long)]
    pub reviews: bool,
    #[arg(long)]
    pub views: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to the catalog JSON file
    pub path: PathBuf,
}
