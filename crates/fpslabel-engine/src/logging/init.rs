use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "fpslabel_engine=debug"). When unset, `RUST_LOG` is consulted, then the
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Debug output for this crate, info for everything else.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some("info,fpslabel_engine=debug".to_owned()),
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder.filter_level(config.default_level);
                }
            },
        }

        builder.write_style(config.write_style);
        builder.format_timestamp_millis();

        // A host may already own the global logger; keep theirs.
        if builder.try_init().is_err() {
            log::debug!("global logger already set; skipping env_logger");
            return;
        }

        log::debug!("logging initialized");
    });
}
