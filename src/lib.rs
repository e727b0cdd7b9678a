//! # Metajoin
//!
//! A multi-key metadata join engine: load a tabular side-file (a header plus
//! rows of string fields), designate one or more columns as matching keys
//! with per-column comparison rules, and join the remaining columns onto
//! external records that expose named string attributes.
//!
//! ## Quick Start
//!
//! ```rust
//! use metajoin::{CsvRowSource, KeyRule, MetadataIndex};
//! use std::collections::HashMap;
//!
//! let csv = "Well,Plate,Site,Treatment\n\
//!            A01,P-0001,1,DMSO\n\
//!            A02,P-0001,1,Taxol\n";
//! let rules = vec![
//!     KeyRule::exact("Well", "Well"),
//!     KeyRule::case_insensitive("Plate", "Plate"),
//! ];
//! let index =
//!     MetadataIndex::build(CsvRowSource::from_reader(csv.as_bytes()), rules).unwrap();
//!
//! let mut record = HashMap::new();
//! record.insert("Well".to_string(), "A02".to_string());
//! record.insert("Plate".to_string(), "p-0001".to_string());
//!
//! let payload = index.lookup(&record).unwrap();
//! assert_eq!(payload.get("Treatment").map(|v| v.as_ref()), Some("Taxol"));
//! assert_eq!(
//!     index.payload_columns(),
//!     &["Site".to_string(), "Treatment".to_string()]
//! );
//! ```
//!
//! ## Matching modes
//!
//! - **Exact**: codepoint comparison, case and accents significant
//! - **Case-insensitive**: case-folded comparison
//! - **Numeric**: values compared as decimal numbers; textually identical
//!   values match without parsing, so non-numeric sentinels stay usable

// Internal modules
pub mod config;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod intern;
pub mod metadata;
pub mod rules;

// Public API - main types users need
pub use config::{JoinConfig, KeyRuleConfig};
pub use error::{JoinError, JoinResult};
pub use index::{AttributeSource, MetadataIndex, PayloadMap};
pub use ingestion::{CsvRowSource, MemoryRowSource, RowSource};
pub use metadata::ColumnLayout;
pub use rules::{KeyRule, MatchMode};
