//! Subscriber setup for the `phone-specs` binary.
//!
//! Logs always go to stderr: stdout carries the JSON outcome and nothing else.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    /// One short line per event, for terminals.
    #[default]
    Compact,
    /// JSON lines, for hosts that collect stderr.
    Json,
}

/// Directives used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "phone_specs=debug,info"
    } else {
        "phone_specs=info"
    }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<(), TryInitError> {
    // 詳細模式才顯示 target，方便分辨 adapter 與 core 的訊息
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_file(false)
        .with_line_number(false);
    let registry = tracing_subscriber::registry().with(filter(verbose));

    match format {
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json().flatten_event(true)).try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "phone_specs=info");
        assert_eq!(default_directives(true), "phone_specs=debug,info");
    }

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init_logger(LogFormat::Json, false);
        assert!(init_logger(LogFormat::Compact, true).is_err());
    }
}
