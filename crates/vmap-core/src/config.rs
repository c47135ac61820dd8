//! Built-in settings for the map page and the generation service.

use serde::Serialize;

/// Base URL the generation service listens on when run locally.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5050";

/// Path of the generation endpoint, relative to the service base URL.
pub const GENERATE_PATH: &str = "/api/generate";

/// Largest area, in km², the generation service accepts.
pub const MAX_AREA_KM2: f64 = 25.0;

/// Filename used when the response does not suggest one.
pub const DEFAULT_FILENAME: &str = "vicinity_map.dxf";

/// Initial view and background layer of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewConfig {
    /// `(lat, lon)` of the initial centre.
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub max_zoom: u8,
    pub draw: DrawToolConfig,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: (39.8283, -98.5795),
            zoom: 4,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 19,
            draw: DrawToolConfig::default(),
        }
    }
}

/// Which drawing tools the page enables. Only rectangles are drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawToolConfig {
    pub rectangle: bool,
    pub polygon: bool,
    pub polyline: bool,
    pub circle: bool,
    pub marker: bool,
    pub circle_marker: bool,
    pub edit: bool,
    pub remove: bool,
}

impl Default for DrawToolConfig {
    fn default() -> Self {
        Self {
            rectangle: true,
            polygon: false,
            polyline: false,
            circle: false,
            marker: false,
            circle_marker: false,
            edit: true,
            remove: true,
        }
    }
}

/// Where generation requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}
