//! Logging setup for the `tq` binary.
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Logs are written to stderr so they never mix with query results.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TQ_LOG";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `TQ_LOG` is unset or invalid
    pub level: String,
    /// Ignore `TQ_LOG` and always use `level`
    pub force_level: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            force_level: false,
        }
    }
}

impl LogConfig {
    /// Map `-v` repetitions onto a level: none keeps the default, one is
    /// `debug`, two or more is `trace`.
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::default(),
            1 => Self {
                level: "debug".to_string(),
                force_level: true,
            },
            _ => Self {
                level: "trace".to_string(),
                force_level: true,
            },
        }
    }

    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("warn"));
        if self.force_level {
            return fallback();
        }
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| fallback())
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(config: &LogConfig) {
    let _ = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
