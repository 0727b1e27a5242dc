use crate::config::LoggingSettings;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(settings: &LoggingSettings) -> String {
    format!("shelf={}", settings.level)
}

/// Install the global subscriber: compact stderr output, plus daily-rotated
/// JSON lines when `settings.file` is set. `RUST_LOG` overrides the level.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init(settings: &LoggingSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(settings)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    match &settings.file {
        Some(log_path) => {
            let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
            let _ = std::fs::create_dir_all(dir);
            let file_name = log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("shelf.log"));

            let file_layer = fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, file_name))
                .with_ansi(false)
                .json();

            let _ = subscriber.with(file_layer).try_init();
        }
        None => {
            let _ = subscriber.try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter_uses_configured_level() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            file: None,
        };
        assert_eq!(default_filter(&settings), "shelf=warn");
        assert_eq!(default_filter(&LoggingSettings::default()), "shelf=info");
    }

    #[test]
    fn test_init_is_safe_to_call_twice() {
        init(&LoggingSettings::default());
        init(&LoggingSettings::default());
        tracing::info!("still logging");
    }

    #[test]
    fn test_init_with_file_creates_log_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs").join("shelf.log");

        init(&LoggingSettings {
            level: "debug".to_string(),
            file: Some(log_path.clone()),
        });

        assert!(log_path.parent().unwrap().exists());
    }
}
