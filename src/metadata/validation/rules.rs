//! The diagnostic catalog.
//!
//! Every rule the validator can report is listed here exactly once, with a stable identifier
//! that downstream tooling may key off, a default severity, a category and a message template.
//! The table is static and immutable, so it is freely shared between concurrent type visits.
//!
//! | id | severity | condition |
//! |---|---|---|
//! | rule-0001 | error | field number outside legal range |
//! | rule-0002 | error | referenced member not found |
//! | rule-0003 | error | duplicate field number |
//! | rule-0004 | warning | field name matches a reserved name |
//! | rule-0005 | warning | field number falls in a reserved range |
//! | rule-0006 | warning | duplicate field name |
//! | rule-0007 | info | two reservations overlap |
//! | rule-0008 | error | same underlying member described multiple times |
//! | rule-0009 | error | contract-relevant attribute present without contract marker |
//! | rule-0010 | error | member both declared and ignored |
//! | rule-0011 | error | same subtype included multiple times |
//! | rule-0012 | error | included type is not a direct subtype |
//! | rule-0013 | warning | base is contract; subtype not declared as include |
//! | rule-0014 | warning | base is contract; subtype itself not marked as contract |
//! | rule-0015 | error | no usable parameterless constructor, skip-flag not set |

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{
    metadata::diagnostics::{DiagnosticCategory, DiagnosticSeverity},
    Error, Result,
};

/// A rule of the diagnostic catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum Rule {
    /// Field number outside `[1, 536870911]` or inside `[19000, 19999]`
    InvalidFieldNumber,
    /// A partial declaration names a member the type does not have
    MemberNotFound,
    /// Field number used by more than one member or include
    DuplicateFieldNumber,
    /// Field name matches a reserved name
    ReservedFieldName,
    /// Field number falls into a reserved range
    ReservedFieldNumber,
    /// Logical field name used more than once
    DuplicateFieldName,
    /// Two reservations of the same shape overlap
    OverlappingReservations,
    /// The same underlying member is declared more than once
    DuplicateMember,
    /// Contract attributes present without the contract marker
    MissingContract,
    /// Member is both declared and ignored
    DeclaredAndIgnored,
    /// The same subtype is included more than once
    DuplicateInclude,
    /// Included type is not a direct subtype of the declaring type
    IncludeNonDerived,
    /// Base contract does not include this subtype
    IncludeNotDeclared,
    /// Subtype of a contract is not a contract itself
    SubTypeShouldBeContract,
    /// No usable parameterless constructor
    ConstructorMissing,
}

/// Static description of a catalog rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Stable identifier
    pub id: &'static str,
    /// Short human readable title
    pub title: &'static str,
    /// Default severity
    pub severity: DiagnosticSeverity,
    /// Rule family
    pub category: DiagnosticCategory,
    /// Message template with `{0}`, `{1}`, ... placeholders
    pub template: &'static str,
}

impl RuleDescriptor {
    /// Renders the message template, substituting `{i}` with `args[i]`.
    ///
    /// The template is scanned once; argument text is copied verbatim and never scanned for
    /// placeholders itself. Placeholders without a matching argument are left untouched.
    #[must_use]
    pub fn format<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut message = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let tail = &rest[open..];

            let argument = tail.find('}').and_then(|close| {
                let index = tail[1..close].parse::<usize>().ok()?;
                Some((args.get(index)?.as_ref(), close))
            });
            match argument {
                Some((value, close)) => {
                    message.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = &tail[1..];
                }
            }
        }

        message.push_str(rest);
        message
    }
}

macro_rules! descriptor {
    ($id:literal, $title:literal, $severity:ident, $category:ident, $template:literal) => {
        RuleDescriptor {
            id: $id,
            title: $title,
            severity: DiagnosticSeverity::$severity,
            category: DiagnosticCategory::$category,
            template: $template,
        }
    };
}

static CATALOG: [RuleDescriptor; Rule::COUNT] = [
    descriptor!(
        "rule-0001",
        "Invalid field number",
        Error,
        Field,
        "Field number {0} is invalid; the valid range is 1-536870911, omitting 19000-19999"
    ),
    descriptor!(
        "rule-0002",
        "Member not found",
        Error,
        Member,
        "The member '{0}' could not be found on type '{1}'"
    ),
    descriptor!(
        "rule-0003",
        "Duplicate field number",
        Error,
        Field,
        "The field number {0} is used more than once"
    ),
    descriptor!(
        "rule-0004",
        "Reserved field name",
        Warning,
        Reservation,
        "The field name '{0}' is reserved by '{1}'"
    ),
    descriptor!(
        "rule-0005",
        "Reserved field number",
        Warning,
        Reservation,
        "The field number {0} is reserved by '{1}'"
    ),
    descriptor!(
        "rule-0006",
        "Duplicate field name",
        Warning,
        Field,
        "The field name '{0}' is used more than once"
    ),
    descriptor!(
        "rule-0007",
        "Overlapping reservations",
        Info,
        Reservation,
        "The reservations '{0}' and '{1}' overlap"
    ),
    descriptor!(
        "rule-0008",
        "Member described multiple times",
        Error,
        Member,
        "The member '{0}' is described more than once"
    ),
    descriptor!(
        "rule-0009",
        "Should be a contract",
        Error,
        Contract,
        "Type '{0}' declares serialization members but is not marked as a contract"
    ),
    descriptor!(
        "rule-0010",
        "Member declared and ignored",
        Error,
        Member,
        "The member '{0}' is both declared for serialization and ignored"
    ),
    descriptor!(
        "rule-0011",
        "Duplicate include",
        Error,
        Include,
        "The type '{0}' is declared as an include more than once"
    ),
    descriptor!(
        "rule-0012",
        "Include non-derived",
        Error,
        Include,
        "The included type '{0}' is not a direct subtype of '{1}'"
    ),
    descriptor!(
        "rule-0013",
        "Include not declared",
        Warning,
        Inheritance,
        "The contract '{0}' does not declare '{1}' as an include"
    ),
    descriptor!(
        "rule-0014",
        "Subtype should be contract",
        Warning,
        Inheritance,
        "Type '{0}' derives from the contract '{1}' but is not marked as a contract"
    ),
    descriptor!(
        "rule-0015",
        "Constructor missing",
        Error,
        Construction,
        "Type '{0}' has no parameterless constructor; add one or set SkipConstructor"
    ),
];

impl Rule {
    /// Returns the static catalog entry of this rule
    #[must_use]
    pub fn descriptor(self) -> &'static RuleDescriptor {
        &CATALOG[self as usize]
    }

    /// Returns the stable identifier, e.g. `rule-0001`
    #[must_use]
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Returns the default severity
    #[must_use]
    pub fn severity(self) -> DiagnosticSeverity {
        self.descriptor().severity
    }

    /// Returns the rule family
    #[must_use]
    pub fn category(self) -> DiagnosticCategory {
        self.descriptor().category
    }

    /// Looks up a rule by its stable identifier (case-insensitive)
    ///
    /// # Errors
    /// Returns [`Error::UnknownRule`] if no rule carries `id`.
    pub fn from_id(id: &str) -> Result<Rule> {
        Rule::iter()
            .find(|rule| rule.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| Error::UnknownRule(id.to_string()))
    }
}
