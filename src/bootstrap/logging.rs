//! Setup for the application logging.
//!
//! It redirects the log info to the standard output with the threshold and
//! style defined in the configuration.
//!
//! Thresholds:
//!
//! - `Off`
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! Styles: `full`, `pretty`, `compact` and `json`.
use std::sync::Once;

use swarm_canary_configuration::{Configuration, LogStyle, Threshold};
use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the threshold and
/// style defined in the configuration. Only the first call has any effect.
pub fn setup(cfg: &Configuration) {
    let tracing_level = map_to_tracing_level_filter(&cfg.logging.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level, cfg.logging.style);
    });
}

fn map_to_tracing_level_filter(threshold: &Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter, style: LogStyle) {
    let builder = tracing_subscriber::fmt().with_max_level(filter).with_ansi(true);

    // A test binary may have installed its own subscriber already.
    let result = match style {
        LogStyle::Full => builder.try_init(),
        LogStyle::Pretty => builder.pretty().with_file(true).try_init(),
        LogStyle::Compact => builder.compact().try_init(),
        LogStyle::Json => builder.json().try_init(),
    };

    if result.is_ok() {
        info!("Logging initialized with {} style", style_name(style));
    }
}

fn style_name(style: LogStyle) -> &'static str {
    match style {
        LogStyle::Full => "full",
        LogStyle::Pretty => "pretty",
        LogStyle::Compact => "compact",
        LogStyle::Json => "json",
    }
}

#[cfg(test)]
mod tests {
    use swarm_canary_configuration::Threshold;
    use tracing::level_filters::LevelFilter;

    use super::map_to_tracing_level_filter;

    #[test]
    fn the_off_threshold_should_disable_logging() {
        assert_eq!(map_to_tracing_level_filter(&Threshold::Off), LevelFilter::OFF);
    }

    #[test]
    fn every_other_threshold_should_map_to_the_level_of_the_same_name() {
        assert_eq!(map_to_tracing_level_filter(&Threshold::Error), LevelFilter::ERROR);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Warn), LevelFilter::WARN);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Info), LevelFilter::INFO);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Debug), LevelFilter::DEBUG);
        assert_eq!(map_to_tracing_level_filter(&Threshold::Trace), LevelFilter::TRACE);
    }
}
