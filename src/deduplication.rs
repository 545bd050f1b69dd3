// 🔍 Deduplication Engine - Drop repeated transaction IDs
// Keep-first semantics: rows are tagged with their load index before grouping,
// so the survivor never depends on hash-map iteration order.

use crate::records::RawExpense;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// DUPLICATE MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Load index of the row that was kept
    pub kept_index: usize,

    /// Load index of the row that was dropped
    pub duplicate_index: usize,

    /// Shared key (None when both rows lack an identifier)
    pub transaction_id: Option<String>,
}

impl DuplicateMatch {
    pub fn reason(&self) -> String {
        format!(
            "Duplicate of row {}: {}",
            self.kept_index,
            self.transaction_id.as_deref().unwrap_or("<missing id>")
        )
    }
}

// ============================================================================
// DEDUP OUTCOME
// ============================================================================

#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Surviving rows with their original load index, in load order
    pub kept: Vec<(usize, RawExpense)>,

    /// One entry per dropped row
    pub duplicates: Vec<DuplicateMatch>,
}

impl DedupOutcome {
    pub fn removed_count(&self) -> usize {
        self.duplicates.len()
    }
}

// ============================================================================
// DEDUPLICATION ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DeduplicationEngine;

impl DeduplicationEngine {
    pub fn new() -> Self {
        DeduplicationEngine
    }

    /// Find every row whose transaction ID was already seen earlier.
    ///
    /// Rows with a missing ID share one key here, the same way a blank cell
    /// compares equal to another blank cell. They are dropped separately by
    /// the missing-ID check anyway.
    pub fn find_duplicates(&self, rows: &[RawExpense]) -> Vec<DuplicateMatch> {
        let mut first_seen: HashMap<Option<&str>, usize> = HashMap::new();
        let mut matches = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let key = row.normalized_id();
            match first_seen.get(&key) {
                Some(&kept_index) => matches.push(DuplicateMatch {
                    kept_index,
                    duplicate_index: index,
                    transaction_id: key.map(|k| k.to_string()),
                }),
                None => {
                    first_seen.insert(key, index);
                }
            }
        }

        matches
    }

    /// Drop duplicates, keeping the first occurrence of each ID
    pub fn dedupe(&self, rows: Vec<RawExpense>) -> DedupOutcome {
        let duplicates = self.find_duplicates(&rows);

        let mut dropped = vec![false; rows.len()];
        for m in &duplicates {
            dropped[m.duplicate_index] = true;
        }

        let kept = rows
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !dropped[*index])
            .collect();

        DedupOutcome { kept, duplicates }
    }
}

// ============================================================================
// TESTS
// ============================================================================
