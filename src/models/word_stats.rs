// src/models/word_stats.rs
use std::fmt;

use super::CollectedRecord;
use crate::core::words::count_words;

/// Word count summary over a collected set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WordStats {
    pub total: usize,
    pub average: usize,
    pub min: usize,
    pub max: usize,
}

impl WordStats {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            average: 0,
            min: 0,
            max: 0,
        }
    }

    /// Aggregates per-record word counts. Metadata blocks are not counted.
    #[inline]
    #[must_use]
    pub fn aggregate(records: &[CollectedRecord]) -> Self {
        let counts: Vec<usize> = records
            .iter()
            .map(|record| count_words(&record.content, true))
            .collect();
        Self::from_counts(&counts)
    }

    #[inline]
    #[must_use]
    pub fn from_counts(counts: &[usize]) -> Self {
        if counts.is_empty() {
            return Self::new();
        }

        let total = counts.iter().fold(0_usize, |acc, n| acc.saturating_add(*n));
        let len = counts.len();
        // round half up: (2 * total + len) / (2 * len)
        let average = total
            .saturating_mul(2)
            .saturating_add(len)
            .checked_div(len.saturating_mul(2))
            .unwrap_or(0);

        Self {
            total,
            average,
            min: counts.iter().copied().min().unwrap_or(0),
            max: counts.iter().copied().max().unwrap_or(0),
        }
    }
}

impl fmt::Display for WordStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total words: {}", self.total)?;
        writeln!(f, "Average words per note: {}", self.average)?;
        write!(f, "Range: {} - {} words", self.min, self.max)
    }
}
