//! Line format shared by both sinks: `[HH:MM:SS] <SourceName>: <message>`

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};
use crossterm::style::Stylize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::severity::Severity;

/// Field carrying the original severity, since Fatal and Error share a tracing level
pub const SEVERITY_FIELD: &str = "severity";

/// Render one log line without a trailing newline
pub fn render_line(time: &DateTime<Local>, source: &str, message: &str) -> String {
    format!("[{}] {}: {}", time.format("%H:%M:%S"), source, message)
}

/// Wrap a rendered line in the console colour for its severity
pub fn colorize(severity: Severity, line: &str) -> String {
    match severity {
        Severity::Trace => line.grey().to_string(),
        Severity::Info => line.green().to_string(),
        Severity::Warning => line.yellow().to_string(),
        Severity::Error => line.red().to_string(),
        Severity::Fatal => line.red().bold().to_string(),
    }
}

/// Event formatter producing the Mint log line
#[derive(Debug, Clone)]
pub struct LineFormat {
    source_name: String,
}

impl LineFormat {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .unwrap_or_else(|| Severity::from(*event.metadata().level()));
        visitor.message.push_str(&visitor.extra);
        let line = render_line(&Local::now(), &self.source_name, &visitor.message);

        if writer.has_ansi_escapes() {
            writer.write_str(&colorize(severity, &line))?;
        } else {
            writer.write_str(&line)?;
        }
        writeln!(writer)
    }
}

/// Collects the message and severity fields of an event
///
/// Other fields are appended as `name=value` so `tracing` macros used inside
/// a logger scope keep their context.
#[derive(Default)]
struct LineVisitor {
    message: String,
    extra: String,
    severity: Option<Severity>,
}

impl LineVisitor {
    fn push_extra(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        let _ = write!(self.extra, " {}={}", field.name(), value);
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            SEVERITY_FIELD => self.severity = value.parse().ok(),
            "message" => self.message.push_str(value),
            _ => self.push_extra(field, format_args!("{}", value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_extra(field, format_args!("{:?}", value));
        }
    }
}

/// Drops events below the threshold by their [`Severity`], not their tracing level
///
/// Error and Fatal share `Level::ERROR`, so a level filter alone lets an
/// Error through a Fatal threshold.
#[derive(Debug, Clone, Copy)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }
}

impl<S: Subscriber> Layer<S> for SeverityFilter {
    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        let mut visitor = SeverityVisitor::default();
        event.record(&mut visitor);
        let severity = visitor
            .severity
            .unwrap_or_else(|| Severity::from(*event.metadata().level()));
        severity >= self.threshold
    }
}

#[derive(Default)]
struct SeverityVisitor {
    severity: Option<Severity>,
}

impl Visit for SeverityVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == SEVERITY_FIELD {
            self.severity = value.parse().ok();
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}
