//! Validation configuration
//!
//! This module provides switches for the rule families the validator runs, plus whether batch
//! analysis may visit types in parallel. Every catalog rule belongs to exactly one family.

use crate::metadata::validation::Rule;

/// Configuration for contract validation
///
/// Disabling a family suppresses every diagnostic of that family; it never changes the outcome
/// of the other families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Field number range checks (rule-0001)
    pub enable_field_number_validation: bool,

    /// Uniqueness of numbers, names and members, member resolution and declared/ignored
    /// conflicts (rule-0002, rule-0003, rule-0006, rule-0008, rule-0010)
    pub enable_duplicate_validation: bool,

    /// Reserved names/numbers and overlapping reservations (rule-0004, rule-0005, rule-0007)
    pub enable_reservation_validation: bool,

    /// Duplicate and non-derived includes (rule-0011, rule-0012)
    pub enable_include_validation: bool,

    /// Contract marker presence (rule-0009)
    pub enable_contract_validation: bool,

    /// Parameterless constructor requirement (rule-0015)
    pub enable_constructor_validation: bool,

    /// Base-type cross checks (rule-0013, rule-0014)
    pub enable_inheritance_validation: bool,

    /// Visit types of a batch in parallel
    pub enable_parallel: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_field_number_validation: true,
            enable_duplicate_validation: true,
            enable_reservation_validation: true,
            enable_include_validation: true,
            enable_contract_validation: true,
            enable_constructor_validation: true,
            enable_inheritance_validation: true,
            enable_parallel: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration with every rule family disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_field_number_validation: false,
            enable_duplicate_validation: false,
            enable_reservation_validation: false,
            enable_include_validation: false,
            enable_contract_validation: false,
            enable_constructor_validation: false,
            enable_inheritance_validation: false,
            enable_parallel: false,
        }
    }

    /// Creates a minimal configuration: only checks that would corrupt the wire format
    ///
    /// Field numbers must be legal and unique; everything else is skipped.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_field_number_validation: true,
            enable_duplicate_validation: true,
            ..Self::disabled()
        }
    }

    /// Creates a configuration with every family enabled and sequential batch processing
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enable_parallel: false,
            ..Self::default()
        }
    }

    /// Returns true if diagnostics of `rule` should be reported
    #[must_use]
    pub fn allows(&self, rule: Rule) -> bool {
        match rule {
            Rule::InvalidFieldNumber => self.enable_field_number_validation,
            Rule::MemberNotFound
            | Rule::DuplicateFieldNumber
            | Rule::DuplicateFieldName
            | Rule::DuplicateMember
            | Rule::DeclaredAndIgnored => self.enable_duplicate_validation,
            Rule::ReservedFieldName
            | Rule::ReservedFieldNumber
            | Rule::OverlappingReservations => self.enable_reservation_validation,
            Rule::DuplicateInclude | Rule::IncludeNonDerived => self.enable_include_validation,
            Rule::MissingContract => self.enable_contract_validation,
            Rule::ConstructorMissing => self.enable_constructor_validation,
            Rule::IncludeNotDeclared | Rule::SubTypeShouldBeContract => {
                self.enable_inheritance_validation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn default_allows_everything() {
        let config = ValidationConfig::default();
        assert!(Rule::iter().all(|rule| config.allows(rule)));
        assert!(config.enable_parallel);
    }

    #[test]
    fn disabled_allows_nothing() {
        let config = ValidationConfig::disabled();
        assert!(Rule::iter().all(|rule| !config.allows(rule)));
    }

    #[test]
    fn minimal_keeps_wire_checks() {
        let config = ValidationConfig::minimal();
        assert!(config.allows(Rule::InvalidFieldNumber));
        assert!(config.allows(Rule::DuplicateFieldNumber));
        assert!(!config.allows(Rule::OverlappingReservations));
        assert!(!config.allows(Rule::ConstructorMissing));
        assert!(!config.enable_parallel);
    }

    #[test]
    fn strict_is_sequential() {
        let config = ValidationConfig::strict();
        assert!(Rule::iter().all(|rule| config.allows(rule)));
        assert!(!config.enable_parallel);
    }
}
