// Handles Tauri command definitions

use crate::export;
use crate::session::MapSession;
use rusqlite::Connection;
use std::sync::Arc;
use tauri::{command, State, Window};
use tokio::sync::Mutex;
use vmap_core::config::MapViewConfig;
use vmap_core::options::FormCatalogue;
use vmap_core::{BoundingBox, ControllerView, DrawEvent, FormSelection};


#[command]
pub fn map_config() -> MapViewConfig {
    MapViewConfig::default()
}

#[command]
pub fn form_options() -> FormCatalogue {
    FormCatalogue::default()
}

#[command]
pub async fn controller_view(session: State<'_, MapSession>) -> Result<ControllerView, String> {
    Ok(session.controller.lock().await.view())
}

async fn apply(session: &MapSession, event: DrawEvent) -> ControllerView {
    let mut controller = session.controller.lock().await;
    controller.handle(event);
    controller.view()
}

// Rectangle finished on the map
#[command]
pub async fn shape_created(
    bounds: BoundingBox,
    session: State<'_, MapSession>,
) -> Result<ControllerView, String> {
    Ok(apply(&session, DrawEvent::Created(bounds)).await)
}

// Rectangle removed with the delete tool
#[command]
pub async fn shape_deleted(session: State<'_, MapSession>) -> Result<ControllerView, String> {
    Ok(apply(&session, DrawEvent::Deleted).await)
}

// Rectangle moved or resized; `remaining` is what is left on the drawing layer
#[command]
pub async fn shape_edited(
    remaining: Vec<BoundingBox>,
    session: State<'_, MapSession>,
) -> Result<ControllerView, String> {
    Ok(apply(&session, DrawEvent::Edited(remaining)).await)
}

#[command]
pub async fn generate(
    selection: FormSelection,
    window: Window,
    session: State<'_, MapSession>,
    db_conn: State<'_, Arc<Mutex<Connection>>>,
) -> Result<ControllerView, String> {
    Ok(export::generate_and_save(&window, &session, &selection, db_conn.inner().clone()).await)
}
