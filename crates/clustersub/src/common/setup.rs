use env_logger::{Builder, DEFAULT_FILTER_ENV};
use log::LevelFilter;
use std::io::Write;

/// Log target of everything logged by this crate and its binary.
const CRATE_TARGET: &str = "clustersub";

/// Sets the behavior of the logger.
///
/// Without `RUST_LOG`, only this crate logs at `info` (`debug` when `verbose`) and
/// dependencies are limited to warnings. `RUST_LOG` replaces these filters completely.
pub fn setup_logging(verbose: bool) {
    let rust_log = std::env::var(DEFAULT_FILTER_ENV).ok();
    create_builder(verbose, rust_log.as_deref()).init();
}

fn precise_timestamps(verbose: bool, rust_log: Option<&str>) -> bool {
    verbose || rust_log.is_some_and(|filters| filters.contains("debug"))
}

fn create_builder(verbose: bool, rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    match rust_log {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module(CRATE_TARGET, level);
        }
    }

    if precise_timestamps(verbose, rust_log) {
        builder.format_timestamp_millis();
    } else {
        // <time> <level> <message>
        builder.format(|buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            writeln!(
                buf,
                "{} {level_style}{}{level_style:#} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        });
    }
    builder
}
