//! Column layout - partitions a header row into matching and payload columns

use crate::error::{JoinError, JoinResult};
use crate::rules::KeyRule;

/// Immutable mapping from each matching rule to its header position, plus the
/// payload columns (all header columns not claimed by a rule) in header order.
///
/// # Invariants
/// - every rule's source column appears exactly once in the header
/// - payload columns fill at most `header width - rule count` slots
#[derive(Clone, Debug)]
pub struct ColumnLayout {
    /// Header position of each rule's source column, in rule order
    key_positions: Vec<usize>,
    /// Payload column names, in header order
    payload_columns: Vec<String>,
    /// Header position of each payload column, parallel to `payload_columns`
    payload_positions: Vec<usize>,
}

impl ColumnLayout {
    /// Partition a header row against the matching rules.
    ///
    /// Fails when a rule's source column appears twice or not at all.
    pub fn from_header(header: &[String], rules: &[KeyRule]) -> JoinResult<Self> {
        let payload_slots = header.len().saturating_sub(rules.len());
        let mut key_positions: Vec<Option<usize>> = vec![None; rules.len()];
        let mut payload_columns = Vec::with_capacity(payload_slots);
        let mut payload_positions = Vec::with_capacity(payload_slots);

        'columns: for (position, name) in header.iter().enumerate() {
            for (slot, rule) in rules.iter().enumerate() {
                if name == rule.source_column() {
                    if key_positions[slot].is_some() {
                        return Err(JoinError::duplicate_key_column(name.clone()));
                    }
                    key_positions[slot] = Some(position);
                    continue 'columns;
                }
            }
            // Unmatched columns beyond the available slots are dropped; the
            // scan continues so later key columns are still assigned.
            if payload_columns.len() < payload_slots {
                payload_columns.push(name.clone());
                payload_positions.push(position);
            }
        }

        let key_positions = key_positions
            .into_iter()
            .zip(rules)
            .map(|(position, rule)| {
                position.ok_or_else(|| JoinError::missing_key_column(rule.source_column()))
            })
            .collect::<JoinResult<Vec<usize>>>()?;

        Ok(Self {
            key_positions,
            payload_columns,
            payload_positions,
        })
    }

    /// Header position of each rule's source column, in rule order
    pub fn key_positions(&self) -> &[usize] {
        &self.key_positions
    }

    /// Payload column names in header order
    pub fn payload_columns(&self) -> &[String] {
        &self.payload_columns
    }

    /// Header positions of the payload columns
    pub fn payload_positions(&self) -> &[usize] {
        &self.payload_positions
    }

    /// Minimum field count a data row must carry
    pub fn expected_width(&self) -> usize {
        self.key_positions.len() + self.payload_columns.len()
    }
}
