// src/models/graph.rs
use serde::Serialize;

use super::CollectedRecord;
use crate::core::words::count_words;

const MIN_RADIUS: f64 = 5.0;
const MAX_RADIUS: f64 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub word_count: usize,
    /// Node size in pixels, square-root scaled by word count.
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Nodes and discovery edges of a collection, ready for a graph renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    #[must_use]
    pub fn from_records(records: &[CollectedRecord]) -> Self {
        let counts: Vec<usize> = records
            .iter()
            .map(|record| count_words(&record.content, true))
            .collect();
        let min_words = counts.iter().copied().min().unwrap_or(0);
        let max_words = counts.iter().copied().max().unwrap_or(1);
        let scale = SqrtScale::new(min_words, max_words.max(1));

        let nodes = records
            .iter()
            .zip(&counts)
            .map(|(record, &word_count)| GraphNode {
                id: record.document.path.clone(),
                name: record.document.name.clone(),
                depth: record.depth,
                word_count,
                radius: scale.radius(word_count),
            })
            .collect();

        let links = records
            .iter()
            .filter_map(|record| {
                record.parent_path.as_ref().map(|parent| GraphLink {
                    source: parent.clone(),
                    target: record.document.path.clone(),
                })
            })
            .collect();

        Self { nodes, links }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct SqrtScale {
    lo: f64,
    hi: f64,
}

impl SqrtScale {
    #[expect(clippy::as_conversions, reason = "Word counts fit comfortably in f64")]
    #[expect(clippy::cast_precision_loss, reason = "Precision not critical")]
    fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            lo: (min_words as f64).sqrt(),
            hi: (max_words as f64).sqrt(),
        }
    }

    #[expect(clippy::as_conversions, reason = "Word counts fit comfortably in f64")]
    #[expect(clippy::cast_precision_loss, reason = "Precision not critical")]
    fn radius(&self, words: usize) -> f64 {
        let span = self.hi - self.lo;
        // a collapsed domain maps to the middle of the range
        if span <= f64::EPSILON {
            return (MIN_RADIUS + MAX_RADIUS) / 2.0;
        }
        let t = ((words as f64).sqrt() - self.lo) / span;
        MIN_RADIUS + t.clamp(0.0, 1.0) * (MAX_RADIUS - MIN_RADIUS)
    }
}
