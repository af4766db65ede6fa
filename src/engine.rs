//! Core analysis engine: walk, classify, emit

use crate::classifier::classify;
use crate::compat::{SubtypeMap, TypeCompat};
use crate::diagnostic::{Diagnostic, Severity};
use crate::emitter::emit;
use crate::grammar::{basic, curly};
use crate::ir::Unit;
use crate::registry::TypeRegistry;
use crate::walker::walk;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of analyzing a set of units
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// All diagnostics, grouped per unit in input order, source order
    /// within each unit
    pub diagnostics: Vec<Diagnostic>,

    /// Units processed
    pub units_processed: usize,

    /// Units with at least one diagnostic
    pub units_flagged: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl AnalysisResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: AnalysisResult) {
        self.diagnostics.extend(other.diagnostics);
        self.units_processed += other.units_processed;
        self.units_flagged += other.units_flagged;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }

    fn count(&mut self, diag: &Diagnostic) {
        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
        }
    }
}

/// The analysis engine.
///
/// Holds the read-only type registry and the host-supplied compatibility
/// predicate; both are behind `Arc` so one engine can serve parallel
/// per-unit analyses with no shared mutable state.
pub struct Engine {
    registry: Arc<TypeRegistry>,
    compat: Arc<dyn TypeCompat>,
}

impl Engine {
    /// Create an engine with an explicit registry and compatibility predicate
    pub fn new(registry: TypeRegistry, compat: impl TypeCompat + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            compat: Arc::new(compat),
        }
    }

    /// Engine over the built-in watched-type table with name-equality
    /// compatibility
    pub fn with_defaults() -> Self {
        Self::new(TypeRegistry::insecure_defaults(), SubtypeMap::new())
    }

    /// The registry this engine consults
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Analyze one neutral-model unit.
    ///
    /// Pure and synchronous: walk the unit, classify each construction
    /// site, emit a diagnostic per unsafe verdict. Diagnostics come out in
    /// source-appearance order; re-running on an unchanged unit yields an
    /// identical sequence.
    pub fn analyze(&self, unit: &Unit) -> Vec<Diagnostic> {
        walk(unit)
            .filter_map(|site| classify(&site, &self.registry, self.compat.as_ref()))
            .filter_map(|verdict| emit(&verdict, &unit.name))
            .collect()
    }

    /// Lower a curly-grammar unit and analyze it
    pub fn analyze_curly(&self, unit: &curly::SourceUnit) -> Vec<Diagnostic> {
        self.analyze(&curly::lower(unit))
    }

    /// Lower a keyword-grammar unit and analyze it
    pub fn analyze_basic(&self, unit: &basic::CompilationUnit) -> Vec<Diagnostic> {
        self.analyze(&basic::lower(unit))
    }

    /// Analyze many units in parallel.
    ///
    /// Units are independent; only the read-only registry is shared.
    /// Result order follows input unit order regardless of scheduling, so
    /// output is deterministic.
    pub fn analyze_all(&self, units: &[Unit]) -> AnalysisResult {
        let start = Instant::now();

        let per_unit: Vec<Vec<Diagnostic>> =
            units.par_iter().map(|unit| self.analyze(unit)).collect();

        let mut result = AnalysisResult {
            units_processed: units.len(),
            ..AnalysisResult::default()
        };
        for diagnostics in per_unit {
            if !diagnostics.is_empty() {
                result.units_flagged += 1;
            }
            for diag in &diagnostics {
                result.count(diag);
            }
            result.diagnostics.extend(diagnostics);
        }

        result.duration = start.elapsed();
        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
