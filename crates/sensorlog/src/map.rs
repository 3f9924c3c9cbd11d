//! Map-ready views of stored measurements.
//!
//! Rendering is left to an external map viewer. This module picks the initial
//! viewport and converts points to GeoJSON.

use serde::Serialize;
use serde_json::{json, Value};

use crate::measurement::MapPoint;

/// Zoom level when all points lie within 0.1° of each other.
pub const ZOOM_CLOSE: u8 = 12;

/// Zoom level when points spread over more than 0.1°.
pub const ZOOM_REGIONAL: u8 = 8;

/// Zoom level when points spread over more than 1°.
pub const ZOOM_WIDE: u8 = 5;

/// Initial viewport for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// Mean latitude of the points.
    pub center_lat: f64,
    /// Mean longitude of the points.
    pub center_lon: f64,
    /// Zoom level.
    pub zoom: u8,
}

impl MapView {
    /// Fit a viewport to the points.
    ///
    /// Returns `None` when there is nothing to show.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(points: &[MapPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let center_lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
        let center_lon = points.iter().map(|p| p.lon).sum::<f64>() / n;

        let lat_span = span(points.iter().map(|p| p.lat));
        let lon_span = span(points.iter().map(|p| p.lon));

        let zoom = if lat_span > 1.0 || lon_span > 1.0 {
            ZOOM_WIDE
        } else if lat_span > 0.1 || lon_span > 0.1 {
            ZOOM_REGIONAL
        } else {
            ZOOM_CLOSE
        };

        Some(Self {
            center_lat,
            center_lon,
            zoom,
        })
    }
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    max - min
}

/// Convert points to a GeoJSON `FeatureCollection`.
///
/// Positions are `[lon, lat]` as GeoJSON requires; readings and the
/// discomfort index become feature properties.
#[must_use]
pub fn to_geojson(points: &[MapPoint]) -> Value {
    let features: Vec<Value> = points
        .iter()
        .map(|p| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [p.lon, p.lat],
                },
                "properties": {
                    "temperature": p.temperature,
                    "humidity": p.humidity,
                    "discomfort_index": p.discomfort_index,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
