#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod db;
mod commands;
mod export;
mod session;

use log::{info, warn};
use rusqlite::Connection;
use tauri::{Manager, PhysicalPosition, PhysicalSize, WindowEvent};
use tokio::sync::Mutex;
use std::sync::Arc;
use vmap_core::config::{ServiceConfig, DEFAULT_SERVICE_URL};
use vmap_core::GenerationClient;


// Save window state
fn save_window_state(window: &tauri::Window, conn: &Connection) -> rusqlite::Result<()> {
    if let Ok(position) = window.outer_position() {
        db::update_config_value(conn, db::WINDOW_X, &position.x.to_string())?;
        db::update_config_value(conn, db::WINDOW_Y, &position.y.to_string())?;
    }

    if let Ok(size) = window.outer_size() {
        db::update_config_value(conn, db::WINDOW_WIDTH, &size.width.to_string())?;
        db::update_config_value(conn, db::WINDOW_HEIGHT, &size.height.to_string())?;
    }

    Ok(())
}

// Restore window state; the size from tauri.conf.json stays when nothing was saved
fn load_window_state(window: &tauri::Window, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(x), Some(y)) = (
        db::get_config_i64(conn, db::WINDOW_X)?,
        db::get_config_i64(conn, db::WINDOW_Y)?,
    ) {
        window.set_position(tauri::Position::Physical(PhysicalPosition::new(x as i32, y as i32)))?;
    }

    if let (Some(width), Some(height)) = (
        db::get_config_i64(conn, db::WINDOW_WIDTH)?,
        db::get_config_i64(conn, db::WINDOW_HEIGHT)?,
    ) {
        if width > 0 && height > 0 {
            window.set_size(PhysicalSize::new(width as u32, height as u32))?;
        }
    }

    Ok(())
}

// application entry point
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .setup(|app| {
            let data_dir = app
                .path_resolver()
                .app_data_dir()
                .ok_or("Failed to retrieve application data directory")?;
            let conn = db::init_db(&data_dir)?;

            let base_url = db::get_config_value(&conn, db::SERVER_URL)?
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
            info!("Using generation service at {}", base_url);

            let window = app.get_window("main").ok_or("Main window not found")?;
            if let Err(e) = load_window_state(&window, &conn) {
                warn!("Failed to restore window state: {}", e);
            }

            let db_conn = Arc::new(Mutex::new(conn));
            let window_clone = window.clone();
            let db_conn_clone = db_conn.clone();

            window.on_window_event(move |event| {
                if matches!(event, WindowEvent::Resized(_) | WindowEvent::Moved(_)) {
                    let window_clone_inner = window_clone.clone();
                    let db_conn_clone_inner = db_conn_clone.clone();
                    tauri::async_runtime::spawn(async move {
                        if let Err(e) = save_window_state(&window_clone_inner, &*db_conn_clone_inner.lock().await) {
                            warn!("Failed to save window state: {}", e);
                        }
                    });
                }
            });

            app.manage(db_conn);
            app.manage(session::MapSession::new(GenerationClient::new(ServiceConfig::new(base_url))));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::map_config,
            commands::form_options,
            commands::controller_view,
            commands::shape_created,
            commands::shape_deleted,
            commands::shape_edited,
            commands::generate
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
