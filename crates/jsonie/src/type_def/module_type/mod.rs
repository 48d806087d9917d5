//! ModuleType: a namespace of named type aliases.

use std::collections::{HashMap, HashSet};

use crate::error::ResolveError;

use super::TypeNode;

/// A module/namespace of named type aliases.
///
/// `Ref` nodes inside a descriptor graph are looked up here at the point of
/// use, never eagerly expanded, so an alias may refer to itself.
#[derive(Debug, Clone, Default)]
pub struct ModuleType {
    aliases: HashMap<String, TypeNode>,
}

impl ModuleType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named alias. Replaces any previous alias with the same ID.
    pub fn alias(&mut self, id: impl Into<String>, node: TypeNode) -> &mut Self {
        self.aliases.insert(id.into(), node);
        self
    }

    /// Builder-style variant of [`alias`](Self::alias).
    pub fn with_alias(mut self, id: impl Into<String>, node: TypeNode) -> Self {
        self.alias(id, node);
        self
    }

    /// Look up an alias by ID without following references.
    pub fn unalias(&self, id: &str) -> Result<&TypeNode, ResolveError> {
        self.aliases
            .get(id)
            .ok_or_else(|| ResolveError::NotFound(id.to_string()))
    }

    pub fn has_alias(&self, id: &str) -> bool {
        self.aliases.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Resolve an alias, following chains of bare references until a
    /// non-reference node is reached.
    ///
    /// An alias that reaches itself again without descending into the input
    /// (through references and union branches only) is a cycle.
    pub fn resolve(&self, id: &str) -> Result<&TypeNode, ResolveError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return Err(ResolveError::Cycle(id.to_string()));
            }
            match self.unalias(current)? {
                TypeNode::Ref(r) => current = r.ref_name(),
                node if self.reenters(id, node, &mut seen) => {
                    return Err(ResolveError::Cycle(id.to_string()));
                }
                node => return Ok(node),
            }
        }
    }

    /// Whether `node` leads back to alias `id` through union branches and
    /// references alone.
    fn reenters<'a>(&'a self, id: &str, node: &'a TypeNode, seen: &mut HashSet<&'a str>) -> bool {
        match node {
            TypeNode::Or(t) => t.types.iter().any(|branch| self.reenters(id, branch, seen)),
            TypeNode::Ref(r) => {
                let name = r.ref_name();
                if name == id {
                    return true;
                }
                if !seen.insert(name) {
                    return false;
                }
                match self.aliases.get(name) {
                    Some(target) => self.reenters(id, target, seen),
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Resolve `node` if it is a reference, otherwise return it unchanged.
    pub fn resolve_node<'a>(&'a self, node: &'a TypeNode) -> Result<&'a TypeNode, ResolveError> {
        match node {
            TypeNode::Ref(r) => self.resolve(r.ref_name()),
            other => Ok(other),
        }
    }
}
