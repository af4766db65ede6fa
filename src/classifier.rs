//! Safety classification of construction sites

use crate::compat::TypeCompat;
use crate::ir::{ArgType, ConstructionSite};
use crate::registry::TypeRegistry;
use log::{debug, trace};

/// Offending-member marker for constructors, substituted into the
/// diagnostic message
pub const OFFENDING_CTOR: &str = ".ctor";

/// Classification outcome for one construction site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The classified site
    pub site: ConstructionSite,
    /// Whether a safe signature matched the supplied arguments
    pub is_safe: bool,
    /// Member identifier for message formatting; always the constructor
    /// marker for this rule family
    pub offending_member: String,
}

/// Classify a construction site against the registry.
///
/// Returns `None` when the rule does not apply: the constructed type is not
/// watched, or an argument's static type is unresolved and safety cannot be
/// verified either way. Classification is a pure function of the site's
/// type name and argument types; enclosing control flow plays no part.
pub fn classify(
    site: &ConstructionSite,
    registry: &TypeRegistry,
    compat: &dyn TypeCompat,
) -> Option<Verdict> {
    let signatures = registry.lookup(&site.type_name)?;

    // Any argument matching any safe signature makes the construction safe;
    // the full argument list is inspected regardless of arity.
    let is_safe = signatures.iter().any(|sig| {
        site.args
            .iter()
            .filter_map(ArgType::name)
            .any(|actual| compat.is_compatible(actual, &sig.required_arg))
    });

    if !is_safe && site.args.iter().any(|a| matches!(a, ArgType::Unresolved)) {
        // Incomplete semantic information upstream: skip rather than risk a
        // false positive.
        debug!(
            "skipping {} at {}: unresolved argument type",
            site.type_name, site.span
        );
        return None;
    }

    trace!(
        "classified {} at {} as {}",
        site.type_name,
        site.span,
        if is_safe { "safe" } else { "unsafe" }
    );

    Some(Verdict {
        site: site.clone(),
        is_safe,
        offending_member: OFFENDING_CTOR.to_string(),
    })
}
