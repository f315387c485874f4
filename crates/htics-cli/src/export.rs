//! The export pipeline: fetch, parse, decode, emit, write.

use std::io::Write;
use std::path::Path;

use htics_core::{CalendarEmitter, decode_documents, parse_query_response};
use htics_firestore::DocumentSource;
use tracing::{debug, info};

use crate::error::ExportResult;

/// Fetches the schedule from `source` and renders it as a calendar.
///
/// Either every document decodes and the full calendar is returned, or the
/// first failure is returned and nothing is rendered.
pub async fn export(source: &dyn DocumentSource, emitter: &CalendarEmitter) -> ExportResult<String> {
    debug!(source = source.name(), "Fetching schedule");
    let body = source.fetch().await?;

    let documents = parse_query_response(&body)?;
    let records = decode_documents(&documents)?;
    info!(
        source = source.name(),
        events = records.len(),
        "Decoded schedule"
    );

    Ok(emitter.emit(&records))
}

/// Writes the calendar to `output`, or to stdout when no path is given.
pub fn write_calendar(calendar: &str, output: Option<&Path>) -> ExportResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, calendar)?;
            debug!(path = %path.display(), bytes = calendar.len(), "Wrote calendar");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(calendar.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
