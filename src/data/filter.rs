use std::collections::BTreeMap;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Sector predicate
// ---------------------------------------------------------------------------

/// Return indices of venues whose sector equals `sector`, in source order.
///
/// An unknown sector simply matches nothing.
pub fn sector_indices(dataset: &Dataset, sector: &str) -> Vec<usize> {
    dataset
        .venues()
        .iter()
        .enumerate()
        .filter(|(_, venue)| venue.sector == sector)
        .map(|(i, _)| i)
        .collect()
}

/// Number of venues per sector, keyed by sector name.
pub fn sector_counts(dataset: &Dataset) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for venue in dataset.venues() {
        *counts.entry(venue.sector.as_str()).or_insert(0) += 1;
    }
    counts
}
