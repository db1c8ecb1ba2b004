use notifier_infrastructure::logging::{log_from_frontend as forward_log, FrontendLog};

const BUILD_KIND: &str = if cfg!(debug_assertions) {
    "debug build"
} else {
    "release build"
};

/// Version string reported to the host, e.g. `delayed-notifier 0.1.0, debug build`
#[tauri::command]
#[specta::specta]
pub fn get_app_version() -> String {
    format!("delayed-notifier {}, {BUILD_KIND}", env!("CARGO_PKG_VERSION"))
}

/// Write a record emitted by the page into the application log.
///
/// `fields` is a JSON object serialized by the page; anything unparsable is
/// dropped and the message is still logged.
#[tauri::command]
#[specta::specta]
pub fn log_from_frontend(level: String, target: String, message: String, fields: Option<String>) {
    let record = FrontendLog {
        fields: fields
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok()),
        level,
        target,
        message,
    };
    forward_log(record);
}
