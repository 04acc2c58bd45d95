//! Keyword classification shared by the validator and the transformer
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

/// How a keyword holds its subschemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubschemaShape {
    /// One subschema (`not`, `additionalProperties`, ...)
    Single,
    /// A non-empty array of subschemas (`allOf`, `anyOf`, ...)
    List,
    /// A map from names to subschemas (`$defs`, `dependentSchemas`, ...)
    Named,
    /// Draft-07 `dependencies`: each entry is a subschema or an array of
    /// property names
    Dependencies,
}

/// Classify a keyword that is not handled specially
///
/// `properties`, `patternProperties` and `items` carry extra rules and are
/// not classified here.
pub fn subschema_shape(keyword: &str) -> Option<SubschemaShape> {
    match keyword {
        "additionalProperties" | "unevaluatedProperties" | "propertyNames" | "additionalItems"
        | "unevaluatedItems" | "contains" | "not" | "if" | "then" | "else" => Some(SubschemaShape::Single),
        "allOf" | "anyOf" | "oneOf" | "prefixItems" => Some(SubschemaShape::List),
        "$defs" | "definitions" | "dependentSchemas" => Some(SubschemaShape::Named),
        "dependencies" => Some(SubschemaShape::Dependencies),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(subschema_shape("not"), Some(SubschemaShape::Single));
        assert_eq!(subschema_shape("oneOf"), Some(SubschemaShape::List));
        assert_eq!(subschema_shape("$defs"), Some(SubschemaShape::Named));
        assert_eq!(subschema_shape("dependencies"), Some(SubschemaShape::Dependencies));
        assert_eq!(subschema_shape("properties"), None);
        assert_eq!(subschema_shape("description"), None);
    }
}
