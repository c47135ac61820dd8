// Runs a generate action and saves the result through the native save dialog

use crate::db;
use crate::session::MapSession;

use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tauri::api::dialog::blocking::FileDialogBuilder;
use tauri::Window;
use tokio::sync::Mutex;
use vmap_core::download::{suggested_name, write_download};
use vmap_core::{ControllerView, FormSelection, GeneratedFile, SaveError};

/// Event carrying an intermediate controller view to the page.
pub const VIEW_EVENT: &str = "controller-view";

pub async fn generate_and_save(
    window: &Window,
    session: &MapSession,
    selection: &FormSelection,
    db_conn: Arc<Mutex<Connection>>,
) -> ControllerView {
    vmap_core::generate(
        &session.controller,
        &session.client,
        selection,
        // The command only returns once the file is saved; push the loading
        // state to the page now.
        |view| {
            if let Err(e) = window.emit(VIEW_EVENT, view.clone()) {
                warn!("Failed to emit {}: {}", VIEW_EVENT, e);
            }
        },
        |file| save_with_dialog(file, db_conn),
    )
    .await
}

async fn save_with_dialog(
    file: GeneratedFile,
    db_conn: Arc<Mutex<Connection>>,
) -> Result<PathBuf, SaveError> {
    let last_dir = {
        let conn = db_conn.lock().await;
        db::get_config_value(&conn, db::LAST_SAVE_DIR).unwrap_or_else(|e| {
            warn!("Failed to read last save directory: {}", e);
            None
        })
    };

    let name = suggested_name(&file);
    // The dialog blocks until the user answers; keep it off the async workers.
    let chosen = tokio::task::spawn_blocking(move || {
        let mut dialog = FileDialogBuilder::new().set_file_name(&name);
        if let Some(ext) = Path::new(&name).extension().and_then(|e| e.to_str()) {
            dialog = dialog.add_filter(ext.to_uppercase(), &[ext]);
        }
        if let Some(dir) = last_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    })
    .await
    .unwrap_or_else(|e| {
        warn!("Save dialog task failed: {}", e);
        None
    });

    let path = chosen.ok_or(SaveError::Cancelled)?;
    let saved = write_download(&path, &file)?;

    if let Some(dir) = saved.parent().and_then(|d| d.to_str()) {
        let conn = db_conn.lock().await;
        if let Err(e) = db::update_config_value(&conn, db::LAST_SAVE_DIR, dir) {
            warn!("Failed to remember save directory: {}", e);
        }
    }

    Ok(saved)
}
