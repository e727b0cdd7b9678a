//! Metadata index - comparator-ordered side-file rows keyed by the matching columns

use std::cmp::Ordering;
use std::sync::Arc;

use fxhash::FxHashMap;
use tracing::debug;

use crate::error::{JoinError, JoinResult};
use crate::index::attributes::AttributeSource;
use crate::ingestion::RowSource;
use crate::intern::StringInterner;
use crate::metadata::ColumnLayout;
use crate::rules::KeyRule;

/// Payload of one side-file row: payload column name to value.
pub type PayloadMap = FxHashMap<Arc<str>, Arc<str>>;

/// Matching-column values of one row, in rule order.
type CompositeKey = Vec<Arc<str>>;

/// Index over a loaded side-file, keyed by the matching columns.
///
/// Built once by consuming a [`RowSource`]; read-only afterwards, so shared
/// references are safe to use from multiple threads.
#[derive(Debug)]
pub struct MetadataIndex {
    rules: Vec<KeyRule>,
    layout: ColumnLayout,
    /// Sorted by the composite comparator; equal keys collapse to the last
    /// inserted row.
    entries: Vec<(CompositeKey, PayloadMap)>,
    empty: PayloadMap,
}

impl MetadataIndex {
    /// Consume `source` and build the index.
    ///
    /// The first row is the header; every later row must carry at least
    /// `rule count + payload slot count` fields. Rows whose composite keys
    /// compare equal overwrite one another, last row wins.
    pub fn build<S: RowSource>(mut source: S, rules: Vec<KeyRule>) -> JoinResult<Self> {
        let header = source.next_row()?.ok_or_else(JoinError::no_header)?;
        let layout = ColumnLayout::from_header(&header, &rules)?;

        let mut interner = StringInterner::default();
        let mut entries: Vec<(CompositeKey, PayloadMap)> = Vec::new();
        let mut line = 0usize;
        while let Some(fields) = source.next_row()? {
            line += 1;
            if fields.len() < layout.expected_width() {
                return Err(JoinError::short_row(
                    line,
                    fields.len(),
                    layout.expected_width(),
                ));
            }

            let key: CompositeKey = layout
                .key_positions()
                .iter()
                .map(|&position| interner.intern(&fields[position]))
                .collect();

            let mut payload = PayloadMap::default();
            for (name, &position) in layout
                .payload_columns()
                .iter()
                .zip(layout.payload_positions())
            {
                payload.insert(interner.intern(name), interner.intern(&fields[position]));
            }

            match locate(&rules, &entries, &key)? {
                Ok(existing) => entries[existing].1 = payload,
                Err(insert_at) => entries.insert(insert_at, (key, payload)),
            }
        }

        debug!(
            "side-file index loaded: {} rows, {} key columns, {} payload columns",
            entries.len(),
            rules.len(),
            layout.payload_columns().len()
        );

        Ok(Self {
            rules,
            layout,
            entries,
            empty: PayloadMap::default(),
        })
    }

    /// Metadata for `record`, or the empty payload when the record lacks a
    /// matching attribute or no row matches.
    ///
    /// Only a numeric-mode comparison against an unparseable value can fail.
    pub fn lookup<R: AttributeSource + ?Sized>(&self, record: &R) -> JoinResult<&PayloadMap> {
        let mut probe = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            match record.attribute(rule.target_attribute()) {
                Some(value) => probe.push(value),
                None => return Ok(&self.empty),
            }
        }
        match locate(&self.rules, &self.entries, &probe)? {
            Ok(found) => Ok(&self.entries[found].1),
            Err(_) => Ok(&self.empty),
        }
    }

    /// Payload column names discovered at construction, in header order.
    pub fn payload_columns(&self) -> &[String] {
        self.layout.payload_columns()
    }

    /// The matching rules, in composite-key order.
    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    /// Number of indexed rows, after last-row-wins collapsing.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Binary search under the per-rule comparators.
///
/// `Ok(Ok(i))` means entry `i` compares equal to `probe`; `Ok(Err(i))` is the
/// insertion point that keeps the entries sorted. `Err` carries a numeric
/// parse failure.
fn locate<P: AsRef<str>>(
    rules: &[KeyRule],
    entries: &[(CompositeKey, PayloadMap)],
    probe: &[P],
) -> JoinResult<Result<usize, usize>> {
    let mut low = 0usize;
    let mut high = entries.len();
    while low < high {
        let mid = low + (high - low) / 2;
        match compare_composite(rules, &entries[mid].0, probe)? {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Ok(Ok(mid)),
        }
    }
    Ok(Err(low))
}

/// Lexicographic comparison of composite keys, first non-equal rule wins.
fn compare_composite<P: AsRef<str>>(
    rules: &[KeyRule],
    stored: &[Arc<str>],
    probe: &[P],
) -> JoinResult<Ordering> {
    for ((rule, stored_value), probe_value) in rules.iter().zip(stored).zip(probe) {
        match rule.compare(stored_value, probe_value.as_ref())? {
            Ordering::Equal => {}
            decided => return Ok(decided),
        }
    }
    Ok(Ordering::Equal)
}
