use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{DataError, DataResult, Row};

/// Rows read from a delimited text file.
///
/// The first line is a header unless [`with_headers(false)`](Self::with_headers)
/// is set. Blank lines are skipped and cells are trimmed.
#[derive(Debug, Clone)]
pub struct CsvData {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
    rows_to_read: Option<usize>,
}

impl CsvData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            has_headers: true,
            rows_to_read: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Limits how many data rows are read. Negative limits are rejected.
    pub fn with_rows_to_read(mut self, rows: i64) -> DataResult<Self> {
        let rows = usize::try_from(rows).map_err(|_| {
            DataError::InvalidArgument(format!("rows to read must not be negative, got {}", rows))
        })?;
        self.rows_to_read = Some(rows);
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub fn rows_to_read(&self) -> Option<usize> {
        self.rows_to_read
    }

    /// Column names, or an empty list when the file has no header line.
    pub fn headers(&self) -> DataResult<Row> {
        if !self.has_headers {
            return Ok(Vec::new());
        }
        let mut reader = self.reader()?;
        Ok(reader.headers()?.iter().map(str::to_string).collect())
    }

    /// Data rows as raw strings.
    pub fn rows(&self) -> DataResult<Vec<Row>> {
        let mut reader = self.reader()?;
        let mut rows = Vec::new();
        for record in reader.records() {
            if self.limit_reached(rows.len()) {
                break;
            }
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }
        debug!(event = "csv_rows_read", path = %self.path.display(), count = rows.len());
        Ok(rows)
    }

    /// Data rows deserialized through the header line.
    pub fn records<R: DeserializeOwned>(&self) -> DataResult<Vec<R>> {
        let mut reader = self.reader()?;
        let headers = if self.has_headers {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        let mut records = Vec::new();
        for record in reader.records() {
            if self.limit_reached(records.len()) {
                break;
            }
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            records.push(record.deserialize(headers.as_ref())?);
        }
        Ok(records)
    }

    fn limit_reached(&self, read: usize) -> bool {
        self.rows_to_read.is_some_and(|limit| read >= limit)
    }

    fn reader(&self) -> DataResult<csv::Reader<File>> {
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file))
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}
