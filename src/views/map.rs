use serde::Serialize;

use crate::config::MARKER_SIZE;
use crate::data::Dataset;

/// A venue marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub vendor_name: String,
    pub price: f64,
}

/// Lat/lon bounding box of a set of markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_lat + self.max_lat),
            0.5 * (self.min_lon + self.max_lon),
        )
    }
}

/// Scatter map of the selected venues.  Every marker has the same size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub points: Vec<MapPoint>,
    pub marker_size: f32,
}

impl MapView {
    pub fn build(dataset: &Dataset, indices: &[usize]) -> Self {
        let venues = dataset.venues();
        let points = indices
            .iter()
            .map(|&i| {
                let v = &venues[i];
                MapPoint {
                    latitude: v.latitude,
                    longitude: v.longitude,
                    vendor_name: v.vendor_name.clone(),
                    price: v.price,
                }
            })
            .collect();

        MapView {
            points,
            marker_size: MARKER_SIZE,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `None` when there are no markers.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let first = self.points.first()?;
        let init = GeoBounds {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };
        Some(self.points.iter().fold(init, |b, p| GeoBounds {
            min_lat: b.min_lat.min(p.latitude),
            max_lat: b.max_lat.max(p.latitude),
            min_lon: b.min_lon.min(p.longitude),
            max_lon: b.max_lon.max(p.longitude),
        }))
    }
}
