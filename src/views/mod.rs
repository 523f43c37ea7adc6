//! Derived views: everything the dashboard shows for one selected sector.
//!
//! `derive_views` is a pure function of the dataset and the sector, so two
//! calls with the same arguments return equal results.

pub mod histogram;
pub mod map;
pub mod table;

use serde::Serialize;

use crate::data::filter::sector_indices;
use crate::data::Dataset;

pub use histogram::{Histogram, HistogramBin};
pub use map::{GeoBounds, MapPoint, MapView};
pub use table::TableView;

/// Table, histogram and map for one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub sector: String,
    pub table: TableView,
    pub histogram: Histogram,
    pub map: MapView,
}

/// Filter `dataset` to `sector` and build all three views from the same
/// matching venues.  A sector with no venues yields three empty views.
pub fn derive_views(dataset: &Dataset, sector: &str) -> DerivedViews {
    let indices = sector_indices(dataset, sector);
    let prices = indices.iter().map(|&i| dataset.venues()[i].price).collect();

    DerivedViews {
        sector: sector.to_string(),
        table: TableView::build(dataset, &indices),
        histogram: Histogram::from_values(prices),
        map: MapView::build(dataset, &indices),
    }
}
