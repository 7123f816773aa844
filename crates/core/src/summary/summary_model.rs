//! Summary models for the ledger's aggregate view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Count and total value of the active assets in one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub total_value: Decimal,
}

/// Aggregate view over all active assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of `current_value` over active assets, zero when there are none
    pub total_value: Decimal,
    pub total_count: usize,
    /// Per-category breakdown, ordered by category name
    pub categories: Vec<CategorySummary>,
}

impl PortfolioSummary {
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == name)
    }
}
