use ariadne::{Color, Label, Report, ReportKind, Source};
use takeoff::TakeoffError;

const SOURCE_ID: &str = "rule";

/// Format a TakeoffError for the terminal; parse errors get an Ariadne report
pub fn format_error(error: &TakeoffError) -> String {
    match error {
        TakeoffError::Parse(details) => {
            let mut output = Vec::new();
            let len = details.source_text.len();
            let start = details.span.start.min(len);
            let end = details.span.end.clamp(start, len);

            let mut report = Report::build(ReportKind::Error, SOURCE_ID, start)
                .with_message(format!(
                    "Parse error: {} (line {}, column {})",
                    details.message, details.span.line, details.span.col
                ))
                .with_label(
                    Label::new((SOURCE_ID, start..end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (SOURCE_ID, Source::from(details.source_text.as_ref())),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        TakeoffError::Validation(messages) => {
            let mut result = String::from("Invalid payload:\n");
            for message in messages {
                result.push_str(&format!("  - {}\n", message));
            }
            result
        }
        TakeoffError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => format!(
            "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
            limit_name, limit_value, actual_value, suggestion
        ),
        TakeoffError::CyclicDerivation(path) => {
            format!("Cyclic derivation: {}", path.join(" -> "))
        }
        other => format!("Error: {}", other),
    }
}
