//! Logging bootstrap.
//!
//! Two layers on one registry:
//! - one-line JSON written to a daily rolling file (always)
//! - human-readable, colored stdout output (debug builds only)
//!
//! Records coming from the host UI are forwarded with `source = "frontend"`.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "notifier.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the global subscriber. Calling it again is a no-op.
pub fn init_logger(log_dir: PathBuf) -> anyhow::Result<()> {
    if LOG_DIR.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;

    // reqwest and friends log through the `log` facade
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
        ))
        .with_filter(file_filter());

    let stdout_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_ansi(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                ))
                .with_filter(stdout_filter()),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = FILE_GUARD.set(guard);
    let _ = LOG_DIR.set(log_dir.clone());

    tracing::info!(
        target: "notifier::logging",
        source = "backend",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "Logger initialized"
    );

    Ok(())
}

fn file_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "debug,notifier=trace"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn stdout_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug,hyper=info,reqwest=info"))
        .unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Directory the file layer writes to, once initialized
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

/// Log record reported by the host UI
#[derive(Debug, serde::Deserialize)]
pub struct FrontendLog {
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

/// Re-emit a host UI record through tracing
pub fn log_from_frontend(log: FrontendLog) {
    let FrontendLog {
        level,
        target,
        message,
        fields,
    } = log;

    macro_rules! emit {
        ($macro:ident) => {
            tracing::$macro!(
                target: "frontend",
                source = "frontend",
                frontend_target = %target,
                fields = ?fields,
                "{}",
                message
            )
        };
    }

    match level.to_lowercase().as_str() {
        "error" => emit!(error),
        "warn" => emit!(warn),
        "debug" => emit!(debug),
        "trace" => emit!(trace),
        _ => emit!(info),
    }
}
