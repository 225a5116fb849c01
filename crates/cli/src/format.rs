//! Report formatting for human and JSON output.

use failfast::{DemonstrationReport, StressReport};

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text summary
    Human,
    /// One JSON document per report
    Json,
}

/// Format a demonstration report.
pub fn format_demonstration(report: &DemonstrationReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let mut out = format!(
                "{}: {} conflict(s) caught\n",
                report.kind,
                report.conflicts.len()
            );
            for event in &report.conflicts {
                out.push_str(&format!(
                    "  {:?} {:?} {}: expected {}, found {}\n",
                    event.style, event.operation, event.label, event.expected, event.actual
                ));
            }
            out.push_str(&format!("  final: [{}]", report.contents.join(", ")));
            out
        }
    }
}

/// Format a stress report.
pub fn format_stress(report: &StressReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let verdict = if report.is_consistent() {
                "ok"
            } else {
                "INCONSISTENT"
            };
            format!(
                "{} ({:?}): {} + {} -> {} [{}], visited {:?}, {} conflict(s)",
                report.kind,
                report.mode,
                report.initial_size,
                report.insertions,
                report.final_size,
                verdict,
                report.visited,
                report.conflicts
            )
        }
    }
}

/// Format an error.
pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": message }).to_string(),
        OutputMode::Human => format!("(error) {}", message),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}
