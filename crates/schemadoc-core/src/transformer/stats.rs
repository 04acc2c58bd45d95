//! Counters collected while transforming
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// What a transformation run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Schema nodes visited, booleans included
    pub nodes_visited: usize,
    pub identifiers_removed: usize,
    pub identifiers_annotated: usize,
    pub internal_keywords_stripped: usize,
    pub nullable_rewrites: usize,
}

impl TransformStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another run's counters into this one
    pub fn merge(&mut self, other: &TransformStats) {
        self.nodes_visited += other.nodes_visited;
        self.identifiers_removed += other.identifiers_removed;
        self.identifiers_annotated += other.identifiers_annotated;
        self.internal_keywords_stripped += other.internal_keywords_stripped;
        self.nullable_rewrites += other.nullable_rewrites;
    }

    /// Number of rewrites, not counting visited nodes
    pub fn total_changes(&self) -> usize {
        self.identifiers_removed + self.identifiers_annotated + self.internal_keywords_stripped + self.nullable_rewrites
    }
}

impl AddAssign for TransformStats {
    fn add_assign(&mut self, other: Self) {
        self.merge(&other);
    }
}
