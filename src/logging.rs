use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Console logging plus an optional daily file under `cfg.dir`.
///
/// `RUST_LOG` wins over `cfg.level`.
pub fn init_logging(cfg: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},propline=debug", cfg.level)));

    // `rolling::daily` panics if it cannot create the first file, so check
    // the directory is writable before building the layer.
    let file_layer = cfg.dir.as_deref().and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Could not create log directory {} ({}), file logging disabled",
                log_dir, e
            );
            return None;
        }
        let test_path = std::path::Path::new(log_dir).join(".propline_write_test");
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&test_path)
        {
            Ok(_) => {
                let _ = std::fs::remove_file(&test_path);

                let file_appender = tracing_appender::rolling::daily(log_dir, "propline.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                // Lives for the whole process
                Box::leak(Box::new(guard));

                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not write to log directory {} ({}), file logging disabled",
                    log_dir, e
                );
                None
            }
        }
    });

    let (console_plain, console_json) = if cfg.json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(true)))
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
            None,
        )
    };

    let file_logging_enabled = file_layer.is_some();
    tracing_subscriber::registry()
        .with(filter)
        .with(console_plain)
        .with(console_json)
        .with(file_layer)
        .init();

    if file_logging_enabled {
        tracing::info!(
            "Logging initialized with file output to {}",
            cfg.dir.as_deref().unwrap_or_default()
        );
    }
}
