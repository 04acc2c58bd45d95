//! Schema node kinds (the values a `type` keyword may take)
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primitive and structural kinds of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl SchemaKind {
    /// Every kind, in declaration order
    pub const ALL: [SchemaKind; 7] = [
        SchemaKind::Object,
        SchemaKind::Array,
        SchemaKind::String,
        SchemaKind::Number,
        SchemaKind::Integer,
        SchemaKind::Boolean,
        SchemaKind::Null,
    ];

    /// The keyword spelling of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
        }
    }

    /// Names of all kinds, for error messages
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a `type` keyword names no known kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for SchemaKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        for kind in SchemaKind::ALL {
            assert_eq!(kind.as_str().parse::<SchemaKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "date".parse::<SchemaKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown schema kind 'date'");
    }
}
