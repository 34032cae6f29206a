pub mod catalog;
pub mod metrics;
pub mod similarity;
pub mod snack;
pub mod tags;
