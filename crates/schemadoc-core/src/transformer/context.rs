//! Where the transformer currently is inside a route schema
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::options::IdentifierPolicy;
use schemadoc_schemas::Section;

/// Section, policy and JSON path of the node being transformed
#[derive(Debug, Clone)]
pub struct NodeScope {
    pub section: Section,
    pub policy: IdentifierPolicy,
    pub path: String,
}

impl NodeScope {
    /// Scope for the root node of a section
    pub fn new(section: Section, policy: IdentifierPolicy, path: impl Into<String>) -> Self {
        Self {
            section,
            policy,
            path: path.into(),
        }
    }

    /// Scope for a nested node; the section and policy carry over
    pub fn child(&self, key: &str) -> Self {
        Self {
            section: self.section,
            policy: self.policy,
            path: format!("{}.{}", self.path, key),
        }
    }

    pub fn child_index(&self, index: usize) -> Self {
        Self {
            section: self.section,
            policy: self.policy,
            path: format!("{}[{}]", self.path, index),
        }
    }
}
