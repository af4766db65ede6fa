//! Diagnostic emission for unsafe verdicts

use crate::classifier::Verdict;
use crate::diagnostic::{Diagnostic, Severity};

/// Stable rule identifier
pub const RULE_ID: &str = "insecure-dtd-construction";

/// Fixed severity for this rule family
pub const RULE_SEVERITY: Severity = Severity::Warning;

const RULE_HELP: &str =
    "Construct the document from a secure reader that disables DTD processing \
     and external entity resolution";

/// Convert an unsafe verdict into a diagnostic; safe verdicts emit nothing.
///
/// The diagnostic's span is the construction expression's own span, whose
/// start is the type-name token, and the message substitutes the literal
/// offending-member token.
pub fn emit(verdict: &Verdict, unit_name: &str) -> Option<Diagnostic> {
    if verdict.is_safe {
        return None;
    }

    let message = format!(
        "`{}` constructed without a secure reader; offending member: `{}`",
        verdict.site.type_name, verdict.offending_member
    );

    Some(
        Diagnostic::new(RULE_ID, RULE_SEVERITY, &message, unit_name, verdict.site.span)
            .with_help(RULE_HELP),
    )
}
