//! dtdlint - Insecure XML document construction detection
//!
//! A rule engine that inspects already-parsed program source for
//! constructions of XML document types that default to insecure
//! DTD/external-entity processing, and reports a token-precise diagnostic
//! for each one unless the construction routes through a hardened reader
//! type.
//!
//! # Architecture
//!
//! ```text
//! grammar adapter -> neutral unit -> Walker -> Classifier -> Emitter
//! ```
//!
//! Two surface grammars (curly-brace and keyword-delimited) are lowered by
//! their adapters into one neutral model; the walk/classify/emit pipeline
//! is written once against that model. The walker performs a uniform
//! structural descent, so constructions inside property accessors,
//! try/catch/finally arms, async continuations and anonymous delegates are
//! all found by the same rule.
//!
//! The engine never parses text and never consults control flow:
//! classification is a pure function of the constructed type name and the
//! host-resolved static types of the arguments. When the host could not
//! resolve an argument type, the site is skipped rather than reported — a
//! deliberate false-negative bias over false positives.
//!
//! # Example
//!
//! ```
//! use dtdlint::{ArgType, Engine, Node, Span, Unit};
//!
//! let unit = Unit::with_members(
//!     "sample.src",
//!     vec![Node::member(
//!         "TestMethod",
//!         vec![Node::construction(
//!             "XPathDocument",
//!             vec![ArgType::resolved("String")],
//!             Span::point(11, 33),
//!         )],
//!     )],
//! );
//!
//! let diagnostics = Engine::with_defaults().analyze(&unit);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].span.start(), (11, 33));
//! ```

pub mod classifier;
pub mod compat;
pub mod diagnostic;
pub mod emitter;
pub mod engine;
pub mod grammar;
pub mod ir;
pub mod registry;
pub mod walker;

// Re-export main types
pub use classifier::{classify, Verdict, OFFENDING_CTOR};
pub use compat::{SubtypeMap, TypeCompat};
pub use diagnostic::{Diagnostic, Severity, Span};
pub use emitter::{emit, RULE_ID};
pub use engine::{AnalysisResult, Engine};
pub use grammar::AdaptError;
pub use ir::{ArgType, ConstructionSite, Node, TypeRef, Unit};
pub use registry::{SafeSignature, TypeRegistry, TypeRegistryBuilder};
pub use walker::{walk, Walker};
