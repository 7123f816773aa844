//! Pure aggregation of assets into a [`PortfolioSummary`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::summary_model::{CategorySummary, PortfolioSummary};
use crate::assets::Asset;

/// Builds the summary over the active assets in `assets`.
///
/// Removed assets are skipped even if the caller passes them in, so the
/// result only ever reflects the active set.
pub fn summarize<'a, I>(assets: I) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a Asset>,
{
    let mut by_category: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    let mut total_value = Decimal::ZERO;
    let mut total_count = 0usize;

    for asset in assets.into_iter().filter(|a| a.is_active()) {
        let entry = by_category
            .entry(asset.category.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += asset.current_value;

        total_value += asset.current_value;
        total_count += 1;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, (count, total_value))| CategorySummary {
            category: category.to_string(),
            count,
            total_value,
        })
        .collect();

    PortfolioSummary {
        total_value,
        total_count,
        categories,
    }
}
