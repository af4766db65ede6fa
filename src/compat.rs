//! Type-compatibility seam
//!
//! Assignability belongs to the host's type system; the engine only needs a
//! single predicate. [`SubtypeMap`] is the bundled implementation for hosts
//! that can enumerate their subtype edges up front.

use std::collections::HashMap;

/// Pluggable assignability predicate supplied by the host type resolution.
///
/// `is_compatible(actual, required)` answers whether a value whose static
/// type is `actual` may be used where `required` is expected.
pub trait TypeCompat: Send + Sync {
    fn is_compatible(&self, actual: &str, required: &str) -> bool;
}

/// Name-based compatibility: a type is compatible with itself and with any
/// transitive supertype registered via [`derives`](SubtypeMap::derives).
#[derive(Debug, Clone, Default)]
pub struct SubtypeMap {
    /// sub -> direct supers
    supers: HashMap<String, Vec<String>>,
}

impl SubtypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `sub` derives from `sup`
    pub fn derives(mut self, sub: &str, sup: &str) -> Self {
        self.supers
            .entry(sub.to_string())
            .or_default()
            .push(sup.to_string());
        self
    }
}

impl TypeCompat for SubtypeMap {
    fn is_compatible(&self, actual: &str, required: &str) -> bool {
        if actual == required {
            return true;
        }
        // Walk the super edges; cycles are tolerated via the visited set
        let mut visited: Vec<&str> = Vec::new();
        let mut pending: Vec<&str> = vec![actual];
        while let Some(name) = pending.pop() {
            if visited.contains(&name) {
                continue;
            }
            visited.push(name);
            if let Some(supers) = self.supers.get(name) {
                for sup in supers {
                    if sup == required {
                        return true;
                    }
                    pending.push(sup);
                }
            }
        }
        false
    }
}
