#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use notifier_app::presentation::commands::*;
use notifier_app::presentation::state::AppState;
use specta_typescript::Typescript;
use tauri::Manager;
use tauri_specta::{collect_commands, Builder};

#[tokio::main]
async fn main() {
    let builder = Builder::<tauri::Wry>::new().commands(collect_commands![
        // Create form
        get_form,
        select_channel,
        update_form_field,
        submit_notification,
        // Lookup / cancel
        find_notification,
        cancel_notification,
        // System & logging
        get_app_version,
        log_from_frontend,
    ]);

    #[cfg(debug_assertions)]
    {
        // Bindings are a convenience for UI work; a failed export is not fatal
        let _ = builder.export(Typescript::default(), "ui/bindings.ts");
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(builder.invoke_handler())
        .setup(move |app| {
            let handle = app.handle().clone();

            let log_dir = handle.path().app_log_dir()?.join("logs");

            match notifier_infrastructure::logging::init_logger(log_dir.clone()) {
                Ok(_) => {
                    tracing::info!("Delayed Notifier starting...");
                    tracing::info!("File logging initialized at: {}", log_dir.display());
                }
                Err(e) => {
                    eprintln!("Failed to initialize file logging: {}", e);
                    eprintln!("Falling back to console logging only");

                    let _ = tracing_subscriber::fmt()
                        .with_env_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env()
                                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                        )
                        .with_target(true)
                        .with_line_number(true)
                        .try_init();
                }
            }

            let state = AppState::new(handle).map_err(|e| {
                tracing::error!("Failed to initialize app state: {}", e);
                Box::<dyn std::error::Error>::from(e.to_string())
            })?;
            app.manage(state);
            tracing::info!("App state initialized");

            builder.mount_events(app);

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
