//! Per-type validation context.
//!
//! A [`TypeValidationContext`] accumulates everything declared about one type through contract
//! attributes and then runs the full battery of consistency checks over that state in one go.
//! It is created by the driver the first time a relevant attribute is found on a type, fed with
//! registration calls while the type and its members are walked, finalized once and dropped.
//!
//! # Registration
//!
//! Every registration takes an [`Anchor`] (the symbol that carries the attribute, used as a
//! location fallback) and the attribute application itself. Member-style registrations also
//! take the member name when it is already known from context; type-level partial declarations
//! pass `None` and the name is read from the attribute's `memberName` argument instead.
//!
//! Attribute data that cannot be read (missing or mistyped arguments) is treated as absent and
//! never aborts the registration sequence.
//!
//! # Checks
//!
//! [`TypeValidationContext::problems`] evaluates every rule independently; one violation never
//! hides another. Diagnostics come out in a fixed order (field numbers, member resolution,
//! duplicate numbers, duplicate names, duplicate members, declared/ignored conflicts,
//! reservation hits, reservation overlaps, duplicate includes, non-derived includes, missing
//! contract marker), so repeated runs over the same state yield identical results. Within a
//! rule, findings follow registration order; an overlap is reported when its later
//! reservation is reached, after the overlaps of every reservation registered before it.
//!
//! # Example
//!
//! ```rust
//! use protoscope::metadata::{
//!     customattributes::{AttributeArgument, AttributeInstance},
//!     location::Location,
//!     token::Token,
//!     validation::{Anchor, Rule, TypeValidationContext, ValidationConfig},
//! };
//!
//! let node = Location::new("Order.cs", 3, 1);
//! let mut context = TypeValidationContext::new(Token(0x02000001), "Order", node, ["Id", "Code"]);
//!
//! let anchor = Anchor::new("Order", None);
//! context.set_contract(anchor, &AttributeInstance::new("ProtoContract"));
//! for member in ["Id", "Code"] {
//!     let attr = AttributeInstance::new("ProtoMember").with_arg("tag", AttributeArgument::I4(1));
//!     context.add_member(Anchor::new(member, None), &attr, Some(member));
//! }
//!
//! let problems = context.problems(&ValidationConfig::default());
//! assert_eq!(problems.len(), 1);
//! assert_eq!(problems[0].rule, Rule::DuplicateFieldNumber);
//! ```

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::metadata::{
    customattributes::{get_bool, get_i32, get_string, get_type, AttributeInstance},
    diagnostics::{Diagnostic, Diagnostics},
    location::Location,
    token::Token,
    validation::{
        config::ValidationConfig,
        facts::{
            is_valid_field_number, ContractFlags, IgnoreDeclaration, Include, MemberDeclaration,
            Reservation, ReservedItem,
        },
        rules::Rule,
    },
};

/// The symbol an attribute was found on.
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    /// Name of the symbol
    pub name: &'a str,
    /// First declared location of the symbol
    pub location: Option<&'a Location>,
}

impl<'a> Anchor<'a> {
    /// Creates a new anchor
    #[must_use]
    pub fn new(name: &'a str, location: Option<&'a Location>) -> Self {
        Self { name, location }
    }
}

/// Accumulated contract facts of exactly one type.
#[derive(Debug, Clone)]
pub struct TypeValidationContext {
    token: Token,
    type_name: String,
    location: Location,
    known_members: FxHashSet<String>,
    flags: Option<ContractFlags>,
    has_relevant_facts: bool,
    members: Vec<MemberDeclaration>,
    ignores: Vec<IgnoreDeclaration>,
    reservations: Vec<Reservation>,
    includes: Vec<Include>,
    next_ordinal: usize,
}

impl TypeValidationContext {
    /// Creates an empty context for one type.
    ///
    /// # Arguments
    ///
    /// * `token` - Identity of the type, used to check include targets
    /// * `type_name` - Display name used in messages
    /// * `location` - Location of the node under analysis, the last-resort report location
    /// * `members` - Names of the members declared on the type, used to resolve partial
    ///   declarations
    pub fn new<I, S>(
        token: Token,
        type_name: impl Into<String>,
        location: Location,
        members: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token,
            type_name: type_name.into(),
            location,
            known_members: members.into_iter().map(Into::into).collect(),
            flags: None,
            has_relevant_facts: false,
            members: Vec::new(),
            ignores: Vec::new(),
            reservations: Vec::new(),
            includes: Vec::new(),
            next_ordinal: 0,
        }
    }

    fn locate(&self, anchor: Anchor<'_>, attr: &AttributeInstance) -> Location {
        Location::most_specific(attr.location.as_ref(), anchor.location, &self.location)
    }

    fn claim_ordinal(&mut self) -> usize {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        ordinal
    }

    /// Registers the contract marker, replacing any earlier contract flags.
    pub fn set_contract(&mut self, anchor: Anchor<'_>, attr: &AttributeInstance) {
        let mut flags = ContractFlags::IS_PROTO_CONTRACT;
        flags.set(
            ContractFlags::SKIP_CONSTRUCTOR,
            get_bool(attr, "SkipConstructor").unwrap_or(false),
        );
        flags.set(
            ContractFlags::IGNORE_UNKNOWN_SUB_TYPES,
            get_bool(attr, "IgnoreUnknownSubTypes").unwrap_or(false),
        );

        trace!(type_name = %self.type_name, anchor = anchor.name, ?flags, "contract");
        self.flags = Some(flags);
    }

    /// Registers a subtype include.
    ///
    /// The `knownType` argument must be a resolved type reference; an include naming its type
    /// by string cannot be checked and is skipped.
    pub fn add_include(&mut self, anchor: Anchor<'_>, attr: &AttributeInstance) {
        self.has_relevant_facts = true;

        let Some(target) = get_type(attr, "knownType") else {
            trace!(type_name = %self.type_name, "include without resolvable type");
            return;
        };

        let include = Include {
            target: target.clone(),
            number: get_i32(attr, "tag"),
            location: self.locate(anchor, attr),
            ordinal: self.claim_ordinal(),
        };
        trace!(
            type_name = %self.type_name,
            target = %include.target,
            number = ?include.number,
            "include"
        );
        self.includes.push(include);
    }

    /// Registers a reservation.
    ///
    /// Accepts a `from`/`to` pair, a single numeric `field`, or a string `field`; the first
    /// shape that can be read wins.
    pub fn add_reserved(&mut self, anchor: Anchor<'_>, attr: &AttributeInstance) {
        self.has_relevant_facts = true;

        let item = match (get_i32(attr, "from"), get_i32(attr, "to")) {
            (Some(from), Some(to)) => Some(ReservedItem::range(from, to)),
            _ => get_i32(attr, "field").map(ReservedItem::number).or_else(|| {
                get_string(attr, "field").map(|name| ReservedItem::Name(name.to_string()))
            }),
        };
        let Some(item) = item else {
            trace!(type_name = %self.type_name, "reservation without readable shape");
            return;
        };

        trace!(type_name = %self.type_name, item = %item, "reservation");
        let location = self.locate(anchor, attr);
        self.reservations.push(Reservation { item, location });
    }

    /// Registers a serialized member.
    ///
    /// `member_name` is the member carrying the attribute; pass `None` for type-level partial
    /// declarations, which name their member through `memberName`. The logical field name is
    /// taken from `Name` and defaults to the member name.
    pub fn add_member(
        &mut self,
        anchor: Anchor<'_>,
        attr: &AttributeInstance,
        member_name: Option<&str>,
    ) {
        self.has_relevant_facts = true;

        let partial = member_name.is_none();
        let Some(member) = member_name.or_else(|| get_string(attr, "memberName")) else {
            trace!(type_name = %self.type_name, "member declaration without member name");
            return;
        };

        let name = get_string(attr, "Name")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(member);

        let declaration = MemberDeclaration {
            member: member.to_string(),
            number: get_i32(attr, "tag"),
            name: name.to_string(),
            partial,
            location: self.locate(anchor, attr),
            ordinal: self.claim_ordinal(),
        };
        trace!(
            type_name = %self.type_name,
            member = %declaration.member,
            number = ?declaration.number,
            "member"
        );
        self.members.push(declaration);
    }

    /// Registers an ignored member.
    ///
    /// Like [`TypeValidationContext::add_member`], `None` reads the member from `memberName`.
    pub fn add_ignore(
        &mut self,
        anchor: Anchor<'_>,
        attr: &AttributeInstance,
        member_name: Option<&str>,
    ) {
        self.has_relevant_facts = true;

        let partial = member_name.is_none();
        let Some(member) = member_name.or_else(|| get_string(attr, "memberName")) else {
            trace!(type_name = %self.type_name, "ignore without member name");
            return;
        };

        trace!(type_name = %self.type_name, member, "ignore");
        let location = self.locate(anchor, attr);
        self.ignores.push(IgnoreDeclaration {
            member: member.to_string(),
            partial,
            location,
        });
    }

    /// Returns true if `flag` is part of the registered contract flags.
    #[must_use]
    pub fn has_flag(&self, flag: ContractFlags) -> bool {
        self.flags.is_some_and(|flags| flags.contains(flag))
    }

    /// Returns the registered contract flags, if a contract marker was seen.
    #[must_use]
    pub fn flags(&self) -> Option<ContractFlags> {
        self.flags
    }

    /// Identity of the validated type
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Name of the validated type
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Registered member declarations, in registration order
    #[must_use]
    pub fn members(&self) -> &[MemberDeclaration] {
        &self.members
    }

    /// Registered ignore declarations, in registration order
    #[must_use]
    pub fn ignores(&self) -> &[IgnoreDeclaration] {
        &self.ignores
    }

    /// Registered reservations, in registration order
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Registered includes, in registration order
    #[must_use]
    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    /// Runs all checks and appends the findings to `sink`.
    pub fn report_problems(&self, config: &ValidationConfig, sink: &Diagnostics) {
        sink.extend(self.problems(config));
    }

    /// Runs all checks over the accumulated state and returns the findings.
    ///
    /// This is a pure function of the registered facts and `config`.
    #[must_use]
    pub fn problems(&self, config: &ValidationConfig) -> Vec<Diagnostic> {
        let mut report = Report {
            config,
            diagnostics: Vec::new(),
        };

        let claims = self.number_claims();
        self.check_field_numbers(&claims, &mut report);
        self.check_member_resolution(&mut report);
        self.check_duplicate_numbers(&claims, &mut report);
        self.check_duplicate_names(&mut report);
        self.check_duplicate_members(&mut report);
        self.check_declared_and_ignored(&mut report);
        self.check_reserved_collisions(&mut report);
        self.check_overlapping_reservations(&mut report);
        self.check_duplicate_includes(&mut report);
        self.check_include_derivation(&mut report);
        self.check_contract_marker(&mut report);

        report.diagnostics
    }

    /// Members and includes share one numbering space; returns their numbers in registration
    /// order.
    fn number_claims(&self) -> Vec<NumberClaim<'_>> {
        let mut claims: Vec<NumberClaim<'_>> = self
            .members
            .iter()
            .filter_map(|m| {
                m.number.map(|number| NumberClaim {
                    ordinal: m.ordinal,
                    number,
                    location: &m.location,
                })
            })
            .chain(self.includes.iter().filter_map(|i| {
                i.number.map(|number| NumberClaim {
                    ordinal: i.ordinal,
                    number,
                    location: &i.location,
                })
            }))
            .collect();
        claims.sort_by_key(|claim| claim.ordinal);
        claims
    }

    fn check_field_numbers(&self, claims: &[NumberClaim<'_>], report: &mut Report<'_>) {
        for claim in claims {
            if !is_valid_field_number(claim.number) {
                report.emit(
                    Rule::InvalidFieldNumber,
                    claim.location,
                    vec![claim.number.to_string()],
                );
            }
        }
    }

    fn check_member_resolution(&self, report: &mut Report<'_>) {
        let partial_members = self
            .members
            .iter()
            .filter(|m| m.partial)
            .map(|m| (&m.member, &m.location));
        let partial_ignores = self
            .ignores
            .iter()
            .filter(|i| i.partial)
            .map(|i| (&i.member, &i.location));

        for (member, location) in partial_members.chain(partial_ignores) {
            if !self.known_members.contains(member.as_str()) {
                report.emit(
                    Rule::MemberNotFound,
                    location,
                    vec![member.clone(), self.type_name.clone()],
                );
            }
        }
    }

    fn check_duplicate_numbers(&self, claims: &[NumberClaim<'_>], report: &mut Report<'_>) {
        let mut seen = FxHashSet::default();
        for claim in claims {
            if !seen.insert(claim.number) {
                report.emit(
                    Rule::DuplicateFieldNumber,
                    claim.location,
                    vec![claim.number.to_string()],
                );
            }
        }
    }

    fn check_duplicate_names(&self, report: &mut Report<'_>) {
        let mut seen = FxHashSet::default();
        for member in &self.members {
            if !seen.insert(member.name.as_str()) {
                report.emit(
                    Rule::DuplicateFieldName,
                    &member.location,
                    vec![member.name.clone()],
                );
            }
        }
    }

    fn check_duplicate_members(&self, report: &mut Report<'_>) {
        let mut seen = FxHashSet::default();
        for member in &self.members {
            if !seen.insert(member.member.as_str()) {
                report.emit(
                    Rule::DuplicateMember,
                    &member.location,
                    vec![member.member.clone()],
                );
            }
        }
    }

    fn check_declared_and_ignored(&self, report: &mut Report<'_>) {
        let declared: FxHashSet<&str> = self.members.iter().map(|m| m.member.as_str()).collect();
        for ignore in &self.ignores {
            if declared.contains(ignore.member.as_str()) {
                report.emit(
                    Rule::DeclaredAndIgnored,
                    &ignore.location,
                    vec![ignore.member.clone()],
                );
            }
        }
    }

    fn check_reserved_collisions(&self, report: &mut Report<'_>) {
        for member in &self.members {
            if let Some(reservation) = self
                .reservations
                .iter()
                .find(|r| r.item.contains_name(&member.name))
            {
                report.emit(
                    Rule::ReservedFieldName,
                    &member.location,
                    vec![member.name.clone(), reservation.item.to_string()],
                );
            }

            let Some(number) = member.number else {
                continue;
            };
            if let Some(reservation) = self
                .reservations
                .iter()
                .find(|r| r.item.contains_number(number))
            {
                report.emit(
                    Rule::ReservedFieldNumber,
                    &member.location,
                    vec![number.to_string(), reservation.item.to_string()],
                );
            }
        }
    }

    /// Every overlapping pair is reported once, at the later-registered reservation, in
    /// registration order of that later reservation.
    fn check_overlapping_reservations(&self, report: &mut Report<'_>) {
        for (later, second) in self.reservations.iter().enumerate() {
            for (earlier, first) in self.reservations[..later].iter().enumerate() {
                if first.item.overlaps(&second.item) {
                    self.emit_overlap(earlier, later, report);
                }
            }
        }
    }

    fn emit_overlap(&self, earlier: usize, later: usize, report: &mut Report<'_>) {
        let first = &self.reservations[earlier];
        let second = &self.reservations[later];
        report.emit(
            Rule::OverlappingReservations,
            &second.location,
            vec![first.item.to_string(), second.item.to_string()],
        );
    }

    fn check_duplicate_includes(&self, report: &mut Report<'_>) {
        let mut seen = FxHashSet::default();
        for include in &self.includes {
            if !seen.insert(include.target.token) {
                report.emit(
                    Rule::DuplicateInclude,
                    &include.location,
                    vec![include.target.name.clone()],
                );
            }
        }
    }

    fn check_include_derivation(&self, report: &mut Report<'_>) {
        for include in &self.includes {
            if !include.target.derives_directly_from(self.token) {
                report.emit(
                    Rule::IncludeNonDerived,
                    &include.location,
                    vec![include.target.name.clone(), self.type_name.clone()],
                );
            }
        }
    }

    fn check_contract_marker(&self, report: &mut Report<'_>) {
        if self.has_relevant_facts && !self.has_flag(ContractFlags::IS_PROTO_CONTRACT) {
            report.emit(
                Rule::MissingContract,
                &self.location,
                vec![self.type_name.clone()],
            );
        }
    }
}

struct NumberClaim<'a> {
    ordinal: usize,
    number: i32,
    location: &'a Location,
}

struct Report<'a> {
    config: &'a ValidationConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Report<'_> {
    fn emit(&mut self, rule: Rule, location: &Location, args: Vec<String>) {
        if self.config.allows(rule) {
            self.diagnostics
                .push(Diagnostic::new(rule, location.clone(), args));
        }
    }
}
