//! Output options the user picks next to the map.

use serde::{Deserialize, Serialize};

/// Layer sent when the user asked for imagery only; the service rejects an
/// empty layer list.
pub const DEFAULT_LAYER: &str = "roads";

/// Feature layers the generation service knows, in display order.
pub const KNOWN_LAYERS: &[(&str, &str)] = &[
    ("roads", "Roads"),
    ("buildings", "Buildings"),
    ("water", "Water"),
    ("railways", "Railways"),
    ("paths", "Paths & trails"),
    ("power_lines", "Power lines"),
    ("landuse", "Land use"),
    ("parking", "Parking"),
    ("boundaries", "Boundaries"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    #[default]
    Feet,
    Meters,
}

/// DXF entity used for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    #[default]
    Text,
    Mtext,
}

/// Background imagery embedded under the vector layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Imagery {
    #[default]
    None,
    Osm,
    EsriSatellite,
}

impl Units {
    pub const ALL: [Units; 2] = [Units::Feet, Units::Meters];

    pub fn id(self) -> &'static str {
        match self {
            Units::Feet => "feet",
            Units::Meters => "meters",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Units::Feet => "Feet",
            Units::Meters => "Meters",
        }
    }
}

impl TextType {
    pub const ALL: [TextType; 2] = [TextType::Text, TextType::Mtext];

    pub fn id(self) -> &'static str {
        match self {
            TextType::Text => "text",
            TextType::Mtext => "mtext",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextType::Text => "TEXT",
            TextType::Mtext => "MTEXT",
        }
    }
}

impl Imagery {
    pub const ALL: [Imagery; 3] = [Imagery::None, Imagery::Osm, Imagery::EsriSatellite];

    pub fn id(self) -> &'static str {
        match self {
            Imagery::None => "none",
            Imagery::Osm => "osm",
            Imagery::EsriSatellite => "esri_satellite",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Imagery::None => "None",
            Imagery::Osm => "OpenStreetMap",
            Imagery::EsriSatellite => "Esri Satellite",
        }
    }

    pub fn is_requested(self) -> bool {
        self != Imagery::None
    }
}

/// Current values of the form controls, read when generate is pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSelection {
    pub units: Units,
    pub uppercase: bool,
    pub text_type: TextType,
    /// Checked layer identifiers, in the order they appear on the page.
    pub layers: Vec<String>,
    pub imagery: Imagery,
}

impl Default for FormSelection {
    fn default() -> Self {
        Self {
            units: Units::default(),
            uppercase: true,
            text_type: TextType::default(),
            layers: vec![DEFAULT_LAYER.to_string()],
            imagery: Imagery::default(),
        }
    }
}

/// One selectable entry of a form control.
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub id: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the page needs to populate its form controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCatalogue {
    pub layers: Vec<Choice>,
    pub units: Vec<Choice>,
    pub text_types: Vec<Choice>,
    pub imagery: Vec<Choice>,
    pub uppercase: bool,
}

impl Default for FormCatalogue {
    fn default() -> Self {
        let defaults = FormSelection::default();
        Self {
            layers: KNOWN_LAYERS
                .iter()
                .map(|&(id, label)| Choice {
                    id,
                    label,
                    selected: id == DEFAULT_LAYER,
                })
                .collect(),
            units: Units::ALL
                .iter()
                .map(|u| Choice {
                    id: u.id(),
                    label: u.label(),
                    selected: *u == defaults.units,
                })
                .collect(),
            text_types: TextType::ALL
                .iter()
                .map(|t| Choice {
                    id: t.id(),
                    label: t.label(),
                    selected: *t == defaults.text_type,
                })
                .collect(),
            imagery: Imagery::ALL
                .iter()
                .map(|i| Choice {
                    id: i.id(),
                    label: i.label(),
                    selected: *i == defaults.imagery,
                })
                .collect(),
            uppercase: defaults.uppercase,
        }
    }
}
