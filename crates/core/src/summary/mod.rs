//! Summary module - aggregate views derived from the active asset set.

mod summary_calculator;
mod summary_model;

pub use summary_calculator::summarize;
pub use summary_model::{CategorySummary, PortfolioSummary};
