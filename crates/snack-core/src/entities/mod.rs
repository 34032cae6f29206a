//! Entity structs for the snack catalog.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output.

mod card;
mod metrics;
mod review;
mod snack;
mod tags;

pub use card::SnackCard;
pub use metrics::{MetricsOptions, ScoreAverages, SnackMetrics};
pub use review::ReviewScores;
pub use snack::Snack;
pub use tags::{SnackFlavor, SnackKeyword, SnackType};
