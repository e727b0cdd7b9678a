//! Row sources - sequence-of-string-rows producers

use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::JoinResult;

/// Produces raw string rows, header first, until exhaustion.
///
/// Quoting and escaping are the producer's concern; the index only ever sees
/// ordered string fields.
pub trait RowSource {
    /// Next row, or `None` once the source is exhausted.
    fn next_row(&mut self) -> JoinResult<Option<Vec<String>>>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn next_row(&mut self) -> JoinResult<Option<Vec<String>>> {
        (**self).next_row()
    }
}

/// CSV-backed row source.
///
/// Header handling belongs to the index, so the underlying reader treats
/// every line as a record; record widths are allowed to vary so the index can
/// report short rows with its own diagnostics.
pub struct CsvRowSource<R: io::Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl CsvRowSource<File> {
    /// Open a side-file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> JoinResult<Self> {
        let reader = builder().from_path(path)?;
        Ok(Self {
            reader,
            record: csv::StringRecord::new(),
        })
    }
}

impl<R: io::Read> CsvRowSource<R> {
    /// Wrap any reader producing CSV text.
    pub fn from_reader(rdr: R) -> Self {
        Self {
            reader: builder().from_reader(rdr),
            record: csv::StringRecord::new(),
        }
    }
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

impl<R: io::Read> RowSource for CsvRowSource<R> {
    fn next_row(&mut self) -> JoinResult<Option<Vec<String>>> {
        if self.reader.read_record(&mut self.record)? {
            Ok(Some(self.record.iter().map(str::to_string).collect()))
        } else {
            Ok(None)
        }
    }
}

/// Rows already in memory, drained front to back.
pub struct MemoryRowSource {
    rows: VecDeque<Vec<String>>,
}

impl MemoryRowSource {
    pub fn new(rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }
}

impl RowSource for MemoryRowSource {
    fn next_row(&mut self) -> JoinResult<Option<Vec<String>>> {
        Ok(self.rows.pop_front())
    }
}
