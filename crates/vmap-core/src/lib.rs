//! Selection controller and generation client behind the VMAP desktop app.
//!
//! The page hosts the map and the drawing tool; everything that decides what
//! happens when a rectangle is drawn, edited or deleted, and what gets sent to
//! the generation service, lives here.

pub mod bounds;
pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod options;
pub mod request;
pub mod service;
pub mod status;

pub use bounds::BoundingBox;
pub use controller::{generate, Controller, ControllerView, DrawEvent, GenerateOutcome, SelectionState};
pub use error::{GenerateError, SaveError};
pub use options::{FormSelection, Imagery, TextType, Units};
pub use request::GenerationRequest;
pub use service::{GeneratedFile, GenerationClient};
pub use status::{Severity, Status};
