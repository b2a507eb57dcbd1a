// NimbusNotes - Cloud-backed desktop notes application
// Entry point and application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod commands;
mod config;
mod error;
mod services;
mod storage;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimbusnotes=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NimbusNotes application");

    tauri::Builder::default()
        .setup(|app| {
            tracing::info!("Running app setup");
            app::setup(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_app_info,
            commands::sign_in,
            commands::sign_out,
            commands::current_user,
            commands::list_notes,
            commands::get_notes,
            commands::set_draft,
            commands::get_draft,
            commands::create_note,
            commands::delete_note,
            commands::upload_image,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
