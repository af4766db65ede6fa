//! Watched-type registry: which constructors are insecure by default and
//! which argument-type signatures make them safe

use std::collections::HashMap;

/// An argument-type shape that makes a watched constructor safe.
///
/// A construction is safe when one of its arguments' static types is the
/// required type (or a compatible subtype, as decided by the host's
/// [`TypeCompat`](crate::compat::TypeCompat) predicate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeSignature {
    /// Required argument type, e.g. the hardened reader type
    pub required_arg: String,
}

impl SafeSignature {
    pub fn new(required_arg: &str) -> Self {
        Self {
            required_arg: required_arg.to_string(),
        }
    }
}

/// Static table mapping each "insecure by default" type name to the
/// constructor signatures considered safe.
///
/// Built once, read-only afterwards; shared across parallel unit analyses
/// behind an `Arc`. Absence of a type is the normal "not watched" outcome,
/// never an error.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    watched: HashMap<String, Vec<SafeSignature>>,
}

impl TypeRegistry {
    /// Start building a registry
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// The built-in table of XML document types that default to insecure
    /// DTD/external-entity processing, each hardened by constructing from
    /// an `XmlReader`.
    pub fn insecure_defaults() -> Self {
        Self::builder()
            .watch("XPathDocument", "XmlReader")
            .watch("XmlSchemaCollection", "XmlReader")
            .watch("XslTransform", "XmlReader")
            .build()
    }

    /// Look up the safe signatures for a constructed type name.
    ///
    /// `None` means the type is not watched and the rule does not apply.
    pub fn lookup(&self, type_name: &str) -> Option<&[SafeSignature]> {
        self.watched.get(type_name).map(Vec::as_slice)
    }

    /// Check whether a type is watched at all
    pub fn is_watched(&self, type_name: &str) -> bool {
        self.watched.contains_key(type_name)
    }

    /// Number of watched types
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }
}

/// Builder for [`TypeRegistry`]; the only write path, consumed by `build`
#[derive(Debug, Clone, Default)]
pub struct TypeRegistryBuilder {
    watched: HashMap<String, Vec<SafeSignature>>,
}

impl TypeRegistryBuilder {
    /// Watch `type_name` and record a safe signature requiring an argument
    /// of type `safe_arg`. Repeated calls for the same type accumulate
    /// alternative safe signatures.
    pub fn watch(mut self, type_name: &str, safe_arg: &str) -> Self {
        self.watched
            .entry(type_name.to_string())
            .or_default()
            .push(SafeSignature::new(safe_arg));
        self
    }

    /// Finalize the registry
    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            watched: self.watched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_watched_type() {
        let registry = TypeRegistry::insecure_defaults();
        let sigs = registry.lookup("XPathDocument").unwrap();
        assert_eq!(sigs, &[SafeSignature::new("XmlReader")]);
    }

    #[test]
    fn test_lookup_unwatched_type_is_none() {
        let registry = TypeRegistry::insecure_defaults();
        assert!(registry.lookup("StringBuilder").is_none());
        assert!(!registry.is_watched("StringBuilder"));
    }

    #[test]
    fn test_builder_accumulates_signatures() {
        let registry = TypeRegistry::builder()
            .watch("Doc", "SecureReader")
            .watch("Doc", "SecureStream")
            .build();
        assert_eq!(registry.lookup("Doc").unwrap().len(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_defaults_nonempty() {
        assert!(!TypeRegistry::insecure_defaults().is_empty());
    }
}
