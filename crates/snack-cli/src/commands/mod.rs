pub mod dispatch;
pub mod import;
pub mod metrics;
pub mod search;
