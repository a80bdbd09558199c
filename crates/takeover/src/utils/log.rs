use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

// log file is "subdomain_scan.log", appended across runs
pub const LOG_FILE_PREFIX: &str = "subdomain_scan";
pub const LOG_FILE_SUFFIX: &str = "log";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]");

/// Maps a case-insensitive level name onto a filter.
///
/// Accepts the usual `trace`..`error` names plus the `warning`, `critical`,
/// `fatal` and `notset` aliases.
pub fn parse_log_level(name: &str) -> Result<LevelFilter> {
    let level = match name.to_ascii_lowercase().as_str() {
        "notset" | "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" | "critical" | "fatal" => LevelFilter::ERROR,
        _ => return Err(Error::InvalidLogLevel(name.to_string())),
    };

    Ok(level)
}

/// Builds the logging handle used for a scan run.
///
/// Nothing is installed globally: callers run their work under the returned
/// dispatch (`tracing::dispatcher::with_default`).
pub fn file_dispatch(level: LevelFilter, log_dir: &Path) -> Result<Dispatch> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::default().add_directive(level.into()))
        .with_ansi(false)
        .with_writer(file_appender)
        .event_format(DashFormat)
        .finish();

    Ok(Dispatch::new(subscriber))
}

/// Terminal-only handle, used before the log level is known.
pub fn stderr_dispatch() -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .event_format(DashFormat)
        .finish();

    Dispatch::new(subscriber)
}

// region:        --- Line format

/// `<timestamp> - <LEVEL> - <message>`
struct DashFormat;

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = OffsetDateTime::now_utc()
            .format(TIMESTAMP_FORMAT)
            .map_err(|_| fmt::Error)?;

        write!(writer, "{} - {} - ", timestamp, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// endregion:     --- Line format
