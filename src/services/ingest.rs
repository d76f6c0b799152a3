//! JSON Lines import of events and persons.
//!
//! Each non-blank line is one JSON object whose keys match the entity's
//! fields. Rows are handed to the caller's writer in batches so each batch
//! can be committed in its own transaction.

use {
    crate::domain::error::{IngestError, TimelineError},
    crate::domain::event::NewActivityEvent,
    crate::domain::person::Person,
    crate::domain::timestamp::parse_import_timestamp,
    serde_json::Value,
    std::{future::Future, path::Path},
    tokio::{
        fs::File,
        io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    },
};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Opens an import file, reporting a missing path as `FileNotFound`.
pub async fn open_jsonl(path: &Path) -> Result<BufReader<File>, IngestError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).await?;
    Ok(BufReader::new(file))
}

/// A type that can be built from one line of an import file.
pub trait ImportRecord: Sized {
    /// Entity name used in progress messages.
    const NAME: &'static str;

    fn parse_line(line: &str) -> Result<Self, String>;
}

impl ImportRecord for NewActivityEvent {
    const NAME: &'static str = "ActivityEvent";

    fn parse_line(line: &str) -> Result<Self, String> {
        let mut fields: serde_json::Map<String, Value> =
            serde_json::from_str(line).map_err(|e| e.to_string())?;
        let timestamp = parse_import_timestamp(fields.remove("timestamp").as_ref())?;

        let mut event: NewActivityEvent =
            serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())?;
        event.timestamp = timestamp;
        Ok(event)
    }
}

impl ImportRecord for Person {
    const NAME: &'static str = "Person";

    fn parse_line(line: &str) -> Result<Self, String> {
        serde_json::from_str(line).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub ignore_errors: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            ignore_errors: false,
        }
    }
}

/// Reads `reader` line by line and passes full batches to `write`.
///
/// A line that fails to parse aborts the import unless
/// `options.ignore_errors` is set, in which case it is logged and skipped.
/// Returns the number of rows written.
pub async fn import_records<T, R, W, Fut>(
    reader: R,
    options: ImportOptions,
    mut write: W,
) -> Result<u64, IngestError>
where
    T: ImportRecord,
    R: AsyncBufRead + Unpin,
    W: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<u64, TimelineError>>,
{
    let batch_size = options.batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut written = 0;
    let mut lines = reader.lines();
    let mut line_no = 0;

    while let Some(raw) = lines.next_line().await? {
        line_no += 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        match T::parse_line(raw) {
            Ok(record) => batch.push(record),
            Err(reason) if options.ignore_errors => {
                tracing::warn!(line = line_no, %reason, "skipping unparseable line");
                continue;
            }
            Err(reason) => {
                return Err(IngestError::Line {
                    line: line_no,
                    reason,
                });
            }
        }

        if batch.len() >= batch_size {
            written += write(std::mem::take(&mut batch)).await?;
        }
    }

    if !batch.is_empty() {
        written += write(batch).await?;
    }

    tracing::info!("Successfully imported {written} {} records.", T::NAME);
    Ok(written)
}
