//! Matching rules - per-column comparison of side-file values to record attributes

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{JoinError, JoinResult};

/// How one matching dimension compares values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Codepoint-for-codepoint comparison; case and accents are significant
    #[default]
    Exact,
    /// Case-folded comparison; values differing only by case compare equal
    CaseInsensitive,
    /// Numeric comparison; textually identical values compare equal without parsing
    Numeric,
}

/// A matching rule: pairs a side-file column with a record attribute and the
/// comparison mode used to match their values.
///
/// The column and attribute names may differ, for instance "PlateName" in the
/// side-file header and "Plate" on the queried record. Rules are immutable
/// once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRule {
    source_column: String,
    target_attribute: String,
    mode: MatchMode,
}

impl KeyRule {
    pub fn new(
        source_column: impl Into<String>,
        target_attribute: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self {
            source_column: source_column.into(),
            target_attribute: target_attribute.into(),
            mode,
        }
    }

    /// Rule requiring exact-case matches
    pub fn exact(source_column: impl Into<String>, target_attribute: impl Into<String>) -> Self {
        Self::new(source_column, target_attribute, MatchMode::Exact)
    }

    /// Rule allowing case-insensitive matches
    pub fn case_insensitive(
        source_column: impl Into<String>,
        target_attribute: impl Into<String>,
    ) -> Self {
        Self::new(source_column, target_attribute, MatchMode::CaseInsensitive)
    }

    /// Rule comparing values as decimal numbers
    pub fn numeric(source_column: impl Into<String>, target_attribute: impl Into<String>) -> Self {
        Self::new(source_column, target_attribute, MatchMode::Numeric)
    }

    /// Side-file column holding this rule's key values
    pub fn source_column(&self) -> &str {
        &self.source_column
    }

    /// Record attribute this rule matches against
    pub fn target_attribute(&self) -> &str {
        &self.target_attribute
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Compare two raw values under this rule's mode.
    ///
    /// Numeric mode fails when a non-identical pair cannot both be parsed as
    /// numbers; the other modes never fail.
    pub fn compare(&self, left: &str, right: &str) -> JoinResult<Ordering> {
        match self.mode {
            MatchMode::Exact => Ok(left.cmp(right)),
            MatchMode::CaseInsensitive => Ok(compare_case_folded(left, right)),
            MatchMode::Numeric => compare_numeric(left, right),
        }
    }
}

/// Unicode case-folded comparison, no allocation
fn compare_case_folded(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Identical strings compare equal without parsing, so non-numeric sentinel
/// values stay usable as keys; anything else must parse on both sides.
fn compare_numeric(left: &str, right: &str) -> JoinResult<Ordering> {
    if left == right {
        return Ok(Ordering::Equal);
    }
    let lhs = parse_number(left)?;
    let rhs = parse_number(right)?;
    Ok(lhs.total_cmp(&rhs))
}

fn parse_number(value: &str) -> JoinResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| JoinError::numeric_parse(value))
}
