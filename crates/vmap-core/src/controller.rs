//! Selection state machine and the generate flow.
//!
//! The page forwards every drawing-tool event here as a [`DrawEvent`]; the
//! controller owns the drawn rectangle, the generate button's enabled flag
//! and the status line, and hands back a [`ControllerView`] for the page to
//! render.

use std::future::Future;
use std::path::PathBuf;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::bounds::BoundingBox;
use crate::config::MAX_AREA_KM2;
use crate::download::suggested_name;
use crate::error::{GenerateError, SaveError};
use crate::options::FormSelection;
use crate::request::GenerationRequest;
use crate::service::{GeneratedFile, GenerationClient};
use crate::status::Status;

/// Events raised by the drawing tool.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// A new rectangle was finished.
    Created(BoundingBox),
    /// The user removed shapes from the drawing layer.
    Deleted,
    /// Shapes were moved or resized; carries what is left on the layer.
    Edited(Vec<BoundingBox>),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    NoShape,
    ShapeSelected(BoundingBox),
}

impl SelectionState {
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            SelectionState::NoShape => None,
            SelectionState::ShapeSelected(bounds) => Some(*bounds),
        }
    }
}

/// How a generate action settled.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    Saved { filename: String, path: PathBuf },
    Failed { message: String },
}

impl GenerateOutcome {
    fn failed(err: &GenerateError) -> Self {
        GenerateOutcome::Failed {
            message: err.to_string(),
        }
    }
}

/// Serialisable snapshot of the controller for the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerView {
    pub bounds: Option<BoundingBox>,
    pub area_km2: Option<f64>,
    /// The drawn area is larger than the generation service accepts.
    pub area_exceeds_limit: bool,
    pub shape_count: usize,
    pub generate_enabled: bool,
    pub generating: bool,
    pub status: Status,
}

#[derive(Debug, Default)]
pub struct Controller {
    state: SelectionState,
    /// Shapes on the drawing layer. Holds at most one.
    layer: Vec<BoundingBox>,
    generating: bool,
    status: Status,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.state.bounds()
    }

    pub fn shape_count(&self) -> usize {
        self.layer.len()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Generate is offered only with a rectangle drawn and nothing in flight.
    pub fn generate_enabled(&self) -> bool {
        self.bounds().is_some() && !self.generating
    }

    pub fn view(&self) -> ControllerView {
        let bounds = self.bounds();
        ControllerView {
            bounds,
            area_km2: bounds.map(|b| b.approx_area_km2()),
            area_exceeds_limit: bounds.is_some_and(|b| b.approx_area_km2() > MAX_AREA_KM2),
            shape_count: self.layer.len(),
            generate_enabled: self.generate_enabled(),
            generating: self.generating,
            status: self.status.clone(),
        }
    }

    /// Apply one drawing-tool event.
    pub fn handle(&mut self, event: DrawEvent) {
        match event {
            DrawEvent::Created(bounds) => {
                self.layer.clear();
                self.layer.push(bounds);
                self.state = SelectionState::ShapeSelected(bounds);
                self.status = Status::clear();
                debug!("Rectangle drawn: {:?}", bounds);
            }
            DrawEvent::Deleted => {
                self.layer.clear();
                self.state = SelectionState::NoShape;
                self.status = Status::clear();
                debug!("Rectangle deleted");
            }
            DrawEvent::Edited(remaining) => {
                let Some(&first) = remaining.first() else {
                    debug!("Edit left no shapes; keeping {:?}", self.state);
                    return;
                };
                self.layer.clear();
                self.layer.push(first);
                self.state = SelectionState::ShapeSelected(first);
                debug!("Rectangle edited: {:?}", first);
            }
        }
    }

    /// Start a generate action.
    ///
    /// Returns the request to send, or `None` when there is nothing to do:
    /// no rectangle, a request already in flight, or a failed validation
    /// (which is reported in the status).
    pub fn begin_generate(&mut self, form: &FormSelection) -> Option<GenerationRequest> {
        if self.generating {
            debug!("Generate ignored: request already in flight");
            return None;
        }
        let bounds = self.bounds()?;

        match GenerationRequest::build(bounds, form) {
            Ok(request) => {
                self.generating = true;
                self.status = if request.wants_imagery() {
                    Status::loading("Generating DXF with imagery (this can take a minute)...")
                } else {
                    Status::loading("Generating DXF...")
                };
                Some(request)
            }
            Err(err) => {
                self.status = Status::error(err.to_string());
                None
            }
        }
    }

    /// Settle the in-flight generate action.
    pub fn finish_generate(&mut self, outcome: GenerateOutcome) {
        self.generating = false;
        self.status = match outcome {
            GenerateOutcome::Saved { filename, .. } => Status::success(format!("Saved {}", filename)),
            GenerateOutcome::Failed { message } => Status::error(message),
        };
    }
}

/// Run one full generate action against a shared controller.
///
/// The lock is only held while reading or updating state, never across the
/// network call or `save`. `on_start` sees the loading view once the request
/// is about to go out. `save` receives the generated file and decides where
/// it goes; whatever it returns, the payload is dropped before the
/// controller is updated.
pub async fn generate<S, F, Fut>(
    controller: &Mutex<Controller>,
    client: &GenerationClient,
    form: &FormSelection,
    on_start: S,
    save: F,
) -> ControllerView
where
    S: FnOnce(&ControllerView),
    F: FnOnce(GeneratedFile) -> Fut,
    Fut: Future<Output = Result<PathBuf, SaveError>>,
{
    let request = {
        let mut controller = controller.lock().await;
        match controller.begin_generate(form) {
            Some(request) => {
                on_start(&controller.view());
                request
            }
            None => return controller.view(),
        }
    };

    let outcome = match client.generate(&request).await {
        Ok(file) => {
            let filename = suggested_name(&file);
            match save(file).await {
                Ok(path) => {
                    info!("Generated {} saved to {}", filename, path.display());
                    // The user may have renamed the file in the save dialog.
                    let filename = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .map(str::to_string)
                        .unwrap_or(filename);
                    GenerateOutcome::Saved { filename, path }
                }
                Err(err) => {
                    warn!("Saving {} failed: {}", filename, err);
                    GenerateOutcome::failed(&GenerateError::from(err))
                }
            }
        }
        Err(err) => {
            warn!("Generation failed: {}", err);
            GenerateOutcome::failed(&err)
        }
    };

    let mut controller = controller.lock().await;
    controller.finish_generate(outcome);
    controller.view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Imagery;
    use crate::status::Severity;

    fn bbox(n: f64) -> BoundingBox {
        BoundingBox::new(n + 0.01, n, -122.47, -122.48)
    }

    fn drawn() -> Controller {
        let mut controller = Controller::new();
        controller.handle(DrawEvent::Created(bbox(37.0)));
        controller
    }

    #[test]
    fn test_starts_without_shape() {
        let controller = Controller::new();
        assert_eq!(controller.state(), SelectionState::NoShape);
        assert!(!controller.generate_enabled());
        assert_eq!(controller.shape_count(), 0);
    }

    #[test]
    fn test_create_replaces_previous_shape() {
        let mut controller = Controller::new();
        for n in [10.0, 20.0, 30.0] {
            controller.handle(DrawEvent::Created(bbox(n)));
            assert_eq!(controller.shape_count(), 1);
            assert_eq!(controller.bounds(), Some(bbox(n)));
        }
        assert!(controller.generate_enabled());
    }

    #[test]
    fn test_create_clears_status() {
        let mut controller = drawn();
        controller.begin_generate(&FormSelection {
            layers: vec![],
            imagery: Imagery::None,
            ..FormSelection::default()
        });
        assert_eq!(controller.status().severity, Severity::Error);

        controller.handle(DrawEvent::Created(bbox(40.0)));
        assert_eq!(controller.status(), &Status::clear());
    }

    #[test]
    fn test_delete_clears_from_any_state() {
        let mut controller = Controller::new();
        controller.handle(DrawEvent::Deleted);
        assert_eq!(controller.bounds(), None);
        assert!(!controller.generate_enabled());

        let mut controller = drawn();
        controller.handle(DrawEvent::Deleted);
        assert_eq!(controller.state(), SelectionState::NoShape);
        assert_eq!(controller.shape_count(), 0);
        assert!(!controller.generate_enabled());
        assert_eq!(controller.view().bounds, None);
    }

    #[test]
    fn test_edit_recomputes_bounds_from_first_shape() {
        let mut controller = drawn();
        controller.handle(DrawEvent::Edited(vec![bbox(38.0)]));
        assert_eq!(controller.bounds(), Some(bbox(38.0)));
        assert_eq!(controller.shape_count(), 1);
    }

    #[test]
    fn test_edit_with_no_shapes_keeps_bounds() {
        let mut controller = drawn();
        controller.handle(DrawEvent::Edited(vec![]));
        assert_eq!(controller.bounds(), Some(bbox(37.0)));
        assert!(controller.generate_enabled());

        let mut empty = Controller::new();
        empty.handle(DrawEvent::Edited(vec![]));
        assert_eq!(empty.state(), SelectionState::NoShape);
    }

    #[test]
    fn test_begin_generate_without_shape_is_noop() {
        let mut controller = Controller::new();
        assert!(controller.begin_generate(&FormSelection::default()).is_none());
        assert_eq!(controller.status(), &Status::clear());
        assert!(!controller.is_generating());
    }

    #[test]
    fn test_validation_error_sends_nothing() {
        let mut controller = drawn();
        let form = FormSelection {
            layers: vec![],
            imagery: Imagery::None,
            ..FormSelection::default()
        };
        assert!(controller.begin_generate(&form).is_none());
        assert_eq!(
            controller.status(),
            &Status::error("Select at least one layer or an imagery source.")
        );
        assert!(controller.generate_enabled());
    }

    #[test]
    fn test_generate_disables_until_finished() {
        let mut controller = drawn();
        let request = controller.begin_generate(&FormSelection::default()).unwrap();
        assert_eq!(request.layers, vec!["roads"]);
        assert!(!controller.generate_enabled());
        assert_eq!(controller.status(), &Status::loading("Generating DXF..."));

        // A second press while in flight does nothing.
        assert!(controller.begin_generate(&FormSelection::default()).is_none());

        controller.finish_generate(GenerateOutcome::Failed {
            message: "Server error 500".to_string(),
        });
        assert!(controller.generate_enabled());
        assert_eq!(controller.status(), &Status::error("Server error 500"));
    }

    #[test]
    fn test_imagery_loading_message() {
        let mut controller = drawn();
        let form = FormSelection {
            imagery: Imagery::Osm,
            ..FormSelection::default()
        };
        controller.begin_generate(&form).unwrap();
        assert_eq!(
            controller.status(),
            &Status::loading("Generating DXF with imagery (this can take a minute)...")
        );
    }

    #[test]
    fn test_success_status_names_file() {
        let mut controller = drawn();
        controller.begin_generate(&FormSelection::default()).unwrap();
        controller.finish_generate(GenerateOutcome::Saved {
            filename: "site_42.dxf".to_string(),
            path: PathBuf::from("/tmp/site_42.dxf"),
        });
        assert_eq!(controller.status(), &Status::success("Saved site_42.dxf"));
        assert!(controller.generate_enabled());
    }

    #[test]
    fn test_view_flags_oversized_area() {
        let mut controller = drawn();
        assert!(!controller.view().area_exceeds_limit);

        // Roughly 11 km x 11 km.
        controller.handle(DrawEvent::Created(BoundingBox::new(0.1, 0.0, 0.1, 0.0)));
        let view = controller.view();
        assert!(view.area_exceeds_limit);
        // Still only a hint; the service has the final say.
        assert!(view.generate_enabled);
        assert_eq!(view.status, Status::clear());

        controller.handle(DrawEvent::Deleted);
        assert!(!controller.view().area_exceeds_limit);
    }

    #[test]
    fn test_delete_while_generating_keeps_generate_disabled() {
        let mut controller = drawn();
        controller.begin_generate(&FormSelection::default()).unwrap();
        controller.handle(DrawEvent::Deleted);
        controller.finish_generate(GenerateOutcome::Failed {
            message: "boom".to_string(),
        });
        assert!(!controller.is_generating());
        assert!(!controller.generate_enabled());
    }
}
