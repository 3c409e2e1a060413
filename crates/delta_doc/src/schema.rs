//! Structural schema registry
//!
//! Structural entity types (blots) must be registered before any document
//! that uses them is loaded or edited. Registration serves two purposes:
//! block-scoped names gate which line attribute keys survive delta
//! application, and the tag/class/data-attribute fields describe how the
//! rendered surface exposes each entity for hit testing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a blot lives in the document structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlotScope {
    /// A line-level format carried as an attribute on the line's newline
    Block,
    /// A synthesized grouping level, reconstructed from block formats
    Container,
}

/// Definition of a structural entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlotDefinition {
    /// Attribute/format name (unique within the registry)
    pub name: String,
    /// Structural scope
    pub scope: BlotScope,
    /// Rendered element tag, if the entity is DOM-visible
    pub tag: Option<String>,
    /// Style class the rendered element carries
    pub class_name: Option<String>,
    /// Data attribute the rendered element carries (row identity)
    pub data_attribute: Option<String>,
}

impl BlotDefinition {
    /// Create a block-scoped definition
    pub fn block(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope: BlotScope::Block,
            tag: None,
            class_name: None,
            data_attribute: None,
        }
    }

    /// Create a container-scoped definition
    pub fn container(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope: BlotScope::Container,
            tag: None,
            class_name: None,
            data_attribute: None,
        }
    }

    /// Set the rendered tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Set the rendered style class
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Set the rendered data attribute
    pub fn with_data_attribute(mut self, data_attribute: &str) -> Self {
        self.data_attribute = Some(data_attribute.to_string());
        self
    }
}

/// Registry of structural entity types, consulted during delta application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    blots: BTreeMap<String, BlotDefinition>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same name
    pub fn register(&mut self, definition: BlotDefinition) {
        self.blots.insert(definition.name.clone(), definition);
    }

    /// Check whether a name is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.blots.contains_key(name)
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&BlotDefinition> {
        self.blots.get(name)
    }

    /// Check whether a name is registered with block scope
    pub fn is_block_format(&self, name: &str) -> bool {
        matches!(
            self.blots.get(name),
            Some(def) if def.scope == BlotScope::Block
        )
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.blots.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.blots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SchemaRegistry::new();
        registry.register(
            BlotDefinition::block("table-col")
                .with_tag("COL")
                .with_class("table-col"),
        );

        assert!(registry.is_registered("table-col"));
        assert!(registry.is_block_format("table-col"));
        assert_eq!(
            registry.get("table-col").and_then(|d| d.tag.as_deref()),
            Some("COL")
        );
    }

    #[test]
    fn test_container_scope_is_not_block_format() {
        let mut registry = SchemaRegistry::new();
        registry.register(BlotDefinition::container("table-container").with_tag("TABLE"));

        assert!(registry.is_registered("table-container"));
        assert!(!registry.is_block_format("table-container"));
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = SchemaRegistry::new();
        registry.register(BlotDefinition::block("x"));
        registry.register(BlotDefinition::block("x").with_tag("DIV"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("x").and_then(|d| d.tag.as_deref()), Some("DIV"));
    }
}
