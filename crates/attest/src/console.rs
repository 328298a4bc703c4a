//! Console rendering of assertion events.
//!
//! [`AssertionConsoleLayer`] prints failures, warnings and multiple-assert
//! summaries as they are emitted. Filtering follows `RUST_LOG`, defaulting to
//! `attest=info`.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "attest=info";

/// Installs the console layer as the global subscriber.
///
/// Only the first call has an effect. An already installed global subscriber
/// is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AssertionConsoleLayer)
            .try_init();
    });
}

/// Prints `attest` events with colors; other targets are ignored.
pub struct AssertionConsoleLayer;

impl<S: Subscriber> Layer<S> for AssertionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("attest") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Some(output) = format_event(&visitor) {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    test: Option<String>,
    depth: Option<u64>,
    count: Option<u64>,
    attempt: Option<u64>,
    actual: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "depth" => self.depth = Some(value),
            "count" => self.count = Some(value),
            "attempt" => self.attempt = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "message" => self.message = value,
            "test" => self.test = value,
            "actual" => self.actual = value,
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> Option<String> {
    let test = v.test.as_deref().unwrap_or("test");
    let line = match v.event.as_deref()? {
        "assertion_failed" => format!(
            "{} {} {}\n{}",
            "✗".bright_red().bold(),
            test.bright_white(),
            "assertion failed".red(),
            indent(v.message.as_deref().unwrap_or("")).red()
        ),
        "warning_recorded" => format!(
            "{} {} {}\n{}",
            "!".bright_yellow().bold(),
            test.bright_white(),
            "warning".yellow(),
            indent(v.message.as_deref().unwrap_or("")).yellow()
        ),
        "multiple_failures" => format!(
            "{} {} {}",
            "✗".bright_red().bold(),
            test.bright_white(),
            format!("{} failures in multiple-assert block", v.count.unwrap_or(0))
                .red()
                .bold()
        ),
        "assertion_queued" => format!(
            "{} {} {}",
            "·".dimmed(),
            test.dimmed(),
            format!("failure queued at depth {}", v.depth.unwrap_or(0)).dimmed()
        ),
        "retry_attempt" => format!(
            "{} {} {}",
            "↻".bright_cyan(),
            test.dimmed(),
            format!(
                "attempt {} was {}",
                v.attempt.unwrap_or(0),
                v.actual.as_deref().unwrap_or("?")
            )
            .dimmed()
        ),
        _ => return None,
    };
    Some(line)
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
