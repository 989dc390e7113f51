//! Logging utilities
//!
//! Events go to `<data dir>/listkeeper.log`; stdout belongs to the binary's output.

use std::path::PathBuf;

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    self, filter::EnvFilter, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt, Layer,
};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

pub fn default_directive() -> String {
    format!("{}=info", env!("CARGO_CRATE_NAME"))
}

/// `RUST_LOG` wins over `LISTKEEPER_LOGLEVEL`, which wins over the default
fn filter_directive(rust_log: Option<String>, log_level: Option<String>) -> String {
    rust_log
        .or(log_level)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(default_directive)
}

pub fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.as_str())
}

/// Install the file subscriber and return the path it writes to
pub fn initialize_logging() -> Result<PathBuf> {
    let log_path = log_path();
    if let Some(directory) = log_path.parent() {
        std::fs::create_dir_all(directory)?;
    }
    let log_file = std::fs::File::create(&log_path)?;

    let directive = filter_directive(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_ENV.as_str()).ok(),
    );
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::try_new(&directive)?);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    log::debug!("logging to {} with `{directive}`", log_path.display());
    Ok(log_path)
}

/// Similar to the `std::dbg!` macro, but generates `tracing` events rather
/// than printing to stdout.
///
/// By default, the verbosity level for the generated events is `DEBUG`, but
/// this can be customized.
#[macro_export]
macro_rules! trace_dbg {
    (target: $target:expr, level: $level:expr, $ex:expr) => {{
        match $ex {
            value => {
                tracing::event!(target: $target, $level, ?value, stringify!($ex));
                value
            }
        }
    }};
    (level: $level:expr, $ex:expr) => {
        trace_dbg!(target: module_path!(), level: $level, $ex)
    };
    (target: $target:expr, $ex:expr) => {
        trace_dbg!(target: $target, level: tracing::Level::DEBUG, $ex)
    };
    ($ex:expr) => {
        trace_dbg!(level: tracing::Level::DEBUG, $ex)
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, "listkeeper=info")]
    #[case(Some("debug"), None, "debug")]
    #[case(None, Some("listkeeper=trace"), "listkeeper=trace")]
    #[case(Some("warn"), Some("trace"), "warn")]
    #[case(Some("  "), None, "listkeeper=info")]
    fn test_filter_directive(
        #[case] rust_log: Option<&str>,
        #[case] log_level: Option<&str>,
        #[case] expected: &str,
    ) {
        let directive = filter_directive(
            rust_log.map(str::to_string),
            log_level.map(str::to_string),
        );
        assert_eq!(directive, expected);
    }

    #[test]
    fn test_log_path_uses_log_file_name() {
        assert!(log_path().ends_with("listkeeper.log"));
    }

    #[test]
    fn test_trace_dbg_returns_value() {
        assert_eq!(crate::trace_dbg!(2 + 3), 5);
    }
}
