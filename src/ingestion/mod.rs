//! Row sources feeding index construction

pub mod row_source;

pub use row_source::{CsvRowSource, MemoryRowSource, RowSource};
