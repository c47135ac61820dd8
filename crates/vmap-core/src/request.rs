//! Payload for `POST /api/generate`.

use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::error::GenerateError;
use crate::options::{FormSelection, Imagery, TextType, Units, DEFAULT_LAYER};

/// Snapshot of the selected area and options, built fresh per generate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub units: Units,
    pub uppercase: bool,
    pub text_type: TextType,
    /// Never empty.
    pub layers: Vec<String>,
    pub imagery: Imagery,
}

impl GenerationRequest {
    /// Combine the drawn area with the form values.
    ///
    /// Fails when neither a layer nor imagery was chosen. Imagery-only
    /// requests get [`DEFAULT_LAYER`] since the service needs at least one.
    pub fn build(bounds: BoundingBox, form: &FormSelection) -> Result<Self, GenerateError> {
        let layers = if form.layers.is_empty() {
            if !form.imagery.is_requested() {
                return Err(GenerateError::NothingSelected);
            }
            vec![DEFAULT_LAYER.to_string()]
        } else {
            form.layers.clone()
        };

        Ok(Self {
            south: bounds.south,
            west: bounds.west,
            north: bounds.north,
            east: bounds.east,
            units: form.units,
            uppercase: form.uppercase,
            text_type: form.text_type,
            layers,
            imagery: form.imagery,
        })
    }

    pub fn wants_imagery(&self) -> bool {
        self.imagery.is_requested()
    }
}
