//! JSON-lines pointer captures.

use crate::error::CliError;
use anyhow::{Context, Result};
use inkbridge_sample::RawPointerEvent;
use std::path::Path;

/// One event per line. Blank lines and `#` comments are skipped.
pub fn parse_capture(text: &str) -> Result<Vec<RawPointerEvent>, CliError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|e| CliError::InvalidCapture {
            line: index.saturating_add(1),
            message: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

pub async fn read_capture(path: &Path) -> Result<Vec<RawPointerEvent>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read capture {}", path.display()))?;
    let events = parse_capture(&text)?;
    tracing::info!(path = %path.display(), events = events.len(), "capture loaded");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbridge_sample::RawEventKind;

    #[test]
    fn parses_events_and_skips_comments() -> Result<(), CliError> {
        let text = r#"
# pen stroke
{"type":"pointerdown","pointer_type":"pen","client":{"x":1.0,"y":2.0},"buttons":1}

{"type":"pointerup","pointer_type":"pen"}
"#;
        let events = parse_capture(text)?;
        assert_eq!(events.len(), 2);
        assert_eq!(events.first().map(|e| e.kind.clone()), Some(RawEventKind::Down));
        Ok(())
    }

    #[test]
    fn reports_the_failing_line() {
        let text = "{\"type\":\"pointerdown\",\"pointer_type\":\"pen\"}\nnot json\n";
        let err = parse_capture(text).err();
        assert!(matches!(err, Some(CliError::InvalidCapture { line: 2, .. })));
    }
}
