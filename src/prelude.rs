//! # protoscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types of the library.
//! Import it to get quick access to everything needed to describe host symbols and validate
//! them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all protoscope operations
pub use crate::Error;

/// The result type used throughout protoscope
pub use crate::Result;

// ================================================================================================
// Host Model
// ================================================================================================

/// Symbol identity and locations
pub use crate::metadata::{location::Location, token::Token};

/// Attribute applications and argument lookup
pub use crate::metadata::customattributes::{
    find_argument, get_bool, get_i32, get_string, get_type, AttributeArgument, AttributeInstance,
    FixedArgument, NamedArgument, TypeRef,
};

/// Type declarations handed over by the host
pub use crate::metadata::symbols::{BaseType, Constructor, MemberSymbol, Symbol, TypeDeclaration};

// ================================================================================================
// Validation
// ================================================================================================

/// Driver, per-type context and configuration
pub use crate::metadata::validation::{
    Anchor, AttributeKind, ContractAnalyzer, ContractFlags, TypeValidationContext,
    ValidationConfig,
};

/// Diagnostic catalog
pub use crate::metadata::validation::{Rule, RuleDescriptor};

/// Findings
pub use crate::metadata::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics,
};
