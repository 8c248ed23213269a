//! Diagnostics produced by contract validation.
//!
//! This module provides the types used to report rule violations found while validating the
//! serialization contract of a type. A [`Diagnostic`] always names the catalog [`Rule`] it
//! belongs to, so downstream tooling can key off the stable rule identifier rather than the
//! rendered message.
//!
//! # Architecture
//!
//! - Each type visit produces its own `Vec<Diagnostic>`, owned by the visit.
//! - The [`Diagnostics`] container collects the results of many visits. It uses `boxcar::Vec`
//!   for lock-free append operations, so parallel visits can report into one shared sink
//!   without synchronization overhead.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Thread-safe container for diagnostic entries
//! - [`Diagnostic`] - Individual finding with rule, severity, location and message arguments
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`DiagnosticCategory`] - Rule family the finding belongs to
//!
//! # Usage Examples
//!
//! ```rust
//! use protoscope::metadata::{
//!     diagnostics::{Diagnostic, Diagnostics},
//!     location::Location,
//!     validation::Rule,
//! };
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.push(Diagnostic::new(
//!     Rule::DuplicateFieldNumber,
//!     Location::new("Order.cs", 7, 6),
//!     vec!["3".to_string()],
//! ));
//!
//! assert!(diagnostics.has_errors());
//! for entry in diagnostics.iter() {
//!     println!("{}", entry);
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are [`Send`] and [`Sync`]. Multiple threads can safely push into a
//! shared [`Diagnostics`] simultaneously.

use std::fmt::{self, Write};

use crate::metadata::{location::Location, validation::Rule};

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Informational message, not necessarily a problem.
    ///
    /// Used for unusual but harmless declarations, such as overlapping reservations.
    Info,

    /// The contract is usable but probably not what the author intended.
    Warning,

    /// The contract is invalid and will be rejected by the serializer.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Rule family a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Field numbers and names of declared members.
    Field,

    /// Resolution and uniqueness of the underlying code members.
    Member,

    /// Reserved numbers and names.
    Reservation,

    /// Declared subtype includes.
    Include,

    /// Presence of the contract marker itself.
    Contract,

    /// Construction requirements of the contract type.
    Construction,

    /// Relationship between a contract and its base type.
    Inheritance,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Field => write!(f, "Field"),
            DiagnosticCategory::Member => write!(f, "Member"),
            DiagnosticCategory::Reservation => write!(f, "Reservation"),
            DiagnosticCategory::Include => write!(f, "Include"),
            DiagnosticCategory::Contract => write!(f, "Contract"),
            DiagnosticCategory::Construction => write!(f, "Construction"),
            DiagnosticCategory::Inheritance => write!(f, "Inheritance"),
        }
    }
}

/// A single finding with its rule, rendered message and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Catalog rule that was violated.
    pub rule: Rule,

    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category of the violated rule.
    pub category: DiagnosticCategory,

    /// Message template rendered with `args`.
    pub message: String,

    /// Arguments matching the template placeholders.
    pub args: Vec<String>,

    /// Most specific known location of the violation.
    pub location: Location,
}

impl Diagnostic {
    /// Creates a new diagnostic for `rule`, taking severity, category and message template
    /// from the catalog.
    ///
    /// # Arguments
    ///
    /// * `rule` - Violated catalog rule
    /// * `location` - Where to report the violation
    /// * `args` - Values for the template placeholders, in order
    pub fn new(rule: Rule, location: Location, args: Vec<String>) -> Self {
        let descriptor = rule.descriptor();
        Self {
            rule,
            severity: descriptor.severity,
            category: descriptor.category,
            message: descriptor.format(&args),
            args,
            location,
        }
    }

    /// Returns the stable rule identifier, e.g. `rule-0003`.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.rule.id()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (at {})",
            self.severity,
            self.id(),
            self.message,
            self.location
        )
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
/// Multiple threads can safely add diagnostics simultaneously.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds a diagnostic entry.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Adds every entry of `diagnostics`, preserving their order.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.entries.push(diagnostic);
        }
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    fn count_severity(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Error)
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Warning)
    }

    /// Returns the number of info-level diagnostics.
    pub fn info_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Info)
    }

    /// Returns an iterator over all diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns all diagnostics reported for `rule`.
    pub fn by_rule(&self, rule: Rule) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.rule == rule).collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s), {} info(s)",
            self.error_count(),
            self.warning_count(),
            self.info_count()
        );

        for severity in [
            DiagnosticSeverity::Error,
            DiagnosticSeverity::Warning,
            DiagnosticSeverity::Info,
        ] {
            let mut entries = self.iter().filter(|d| d.severity == severity).peekable();
            if entries.peek().is_none() {
                continue;
            }

            let heading = match severity {
                DiagnosticSeverity::Error => "Errors",
                DiagnosticSeverity::Warning => "Warnings",
                DiagnosticSeverity::Info => "Infos",
            };
            let _ = writeln!(output, "\n{heading}:");
            for diag in entries {
                let _ = writeln!(output, "  {diag}");
            }
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
