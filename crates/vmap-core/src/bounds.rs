//! Geographic rectangle drawn by the user.

use serde::{Deserialize, Serialize};

/// Kilometres per degree of latitude, used for the rough area readout.
const KM_PER_DEGREE: f64 = 111.32;

/// Rectangle in WGS84 degrees, as reported by the drawing tool.
///
/// `south <= north` and `west <= east` are trusted, not checked; the drawing
/// tool only produces axis-aligned rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Approximate area in square kilometres.
    pub fn approx_area_km2(&self) -> f64 {
        let mid_lat = ((self.south + self.north) / 2.0).to_radians();
        let height_km = (self.north - self.south) * KM_PER_DEGREE;
        let width_km = (self.east - self.west) * KM_PER_DEGREE * mid_lat.cos();
        (height_km * width_km).abs()
    }
}
