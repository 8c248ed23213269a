//! # Contract Analysis Driver
//!
//! This module walks type declarations handed over by the host and turns the contract
//! attributes found on them into registrations against a fresh
//! [`TypeValidationContext`], then finalizes that context and adds the rules that need the
//! wider declaration: constructor presence and base-type cross checks.
//!
//! ## Visit Order
//!
//! For each type:
//! 1. Type-level attributes, in declaration order
//! 2. Member-level attributes, member by member
//! 3. Constructor requirement (rule-0015)
//! 4. Context checks (rule-0001 .. rule-0012)
//! 5. Base-type cross checks (rule-0013, rule-0014)
//!
//! Diagnostics of one type therefore come out in a stable order: the constructor finding first,
//! then the context findings, then the inheritance findings.
//!
//! ## Lazy Context
//!
//! The context is only created once the first recognized attribute is seen. A type without any
//! contract attribute gets no context and is only subject to the base-type checks.
//!
//! ## Parallel Processing
//!
//! Type visits share no state. [`ContractAnalyzer::analyze_all`] uses [`rayon`] to visit the
//! types of a batch concurrently when enabled in the configuration, and appends the per-type
//! results in input order so the output is reproducible regardless of scheduling.
//!
//! ## Error Handling
//!
//! Rule violations are diagnostics, never errors. Host data that cannot be interpreted yields an
//! [`crate::Error`] for that type only; batch analysis logs it and skips the type.

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::{
    metadata::{
        customattributes::{get_bool, get_type, AttributeInstance},
        diagnostics::{Diagnostic, Diagnostics},
        symbols::{BaseType, Symbol, TypeDeclaration},
        validation::{
            config::ValidationConfig,
            context::{Anchor, TypeValidationContext},
            facts::ContractFlags,
            kind::AttributeKind,
            rules::Rule,
        },
    },
    Error, Result,
};

/// Validates the serialization contracts of host type declarations.
///
/// The analyzer itself is immutable and can be shared between threads; every call to
/// [`ContractAnalyzer::analyze`] works on its own state.
///
/// # Examples
///
/// ```rust
/// use protoscope::metadata::{
///     customattributes::{AttributeArgument, AttributeInstance},
///     location::Location,
///     symbols::{Constructor, MemberSymbol, TypeDeclaration},
///     token::Token,
///     validation::{ContractAnalyzer, Rule},
/// };
///
/// let order = TypeDeclaration::new(Token(0x02000001), "Order", Location::new("Order.cs", 4, 1))
///     .with_attribute(AttributeInstance::new("ProtoContract"))
///     .with_member(MemberSymbol::new("Id").with_attribute(
///         AttributeInstance::new("ProtoMember").with_arg("tag", AttributeArgument::I4(0)),
///     ))
///     .with_constructor(Constructor::explicit(2));
///
/// let diagnostics = ContractAnalyzer::default().analyze(&order)?;
/// let rules: Vec<Rule> = diagnostics.iter().map(|d| d.rule).collect();
/// assert_eq!(rules, vec![Rule::ConstructorMissing, Rule::InvalidFieldNumber]);
/// # Ok::<(), protoscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractAnalyzer {
    config: ValidationConfig,
}

impl ContractAnalyzer {
    /// Creates an analyzer with the given configuration
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Visits an arbitrary host symbol.
    ///
    /// # Errors
    /// Returns [`Error::NotAType`] for symbols that are not type declarations, and the errors of
    /// [`ContractAnalyzer::analyze`] otherwise.
    pub fn analyze_symbol(&self, symbol: &Symbol) -> Result<Vec<Diagnostic>> {
        match symbol {
            Symbol::Type(declaration) => self.analyze(declaration),
            Symbol::Other(name) => Err(Error::NotAType(name.clone())),
        }
    }

    /// Validates one type declaration.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaration has a null token, an empty name,
    /// or names itself as its base type.
    pub fn analyze(&self, declaration: &TypeDeclaration) -> Result<Vec<Diagnostic>> {
        Self::check_host_data(declaration)?;

        let context = Self::collect_facts(declaration);
        let mut diagnostics = Vec::new();

        self.check_constructors(declaration, context.as_ref(), &mut diagnostics);
        if let Some(context) = &context {
            diagnostics.extend(context.problems(&self.config));
        }
        if let Some(base) = &declaration.base {
            self.check_base_type(declaration, base, context.as_ref(), &mut diagnostics);
        }

        let contract = context
            .as_ref()
            .is_some_and(|c| c.has_flag(ContractFlags::IS_PROTO_CONTRACT));
        debug!(
            type_name = %declaration.name,
            contract,
            diagnostics = diagnostics.len(),
            "validated type"
        );
        Ok(diagnostics)
    }

    /// Validates a batch of type declarations.
    ///
    /// Types whose host data cannot be interpreted are logged and skipped; they never affect the
    /// validation of the other types. The result holds the diagnostics of each type in input
    /// order.
    pub fn analyze_all(&self, declarations: &[TypeDeclaration]) -> Diagnostics {
        let results: Vec<Vec<Diagnostic>> = if self.config.enable_parallel {
            declarations
                .par_iter()
                .map(|declaration| self.analyze_or_skip(declaration))
                .collect()
        } else {
            declarations
                .iter()
                .map(|declaration| self.analyze_or_skip(declaration))
                .collect()
        };

        let diagnostics = Diagnostics::new();
        for result in results {
            diagnostics.extend(result);
        }
        diagnostics
    }

    fn analyze_or_skip(&self, declaration: &TypeDeclaration) -> Vec<Diagnostic> {
        match self.analyze(declaration) {
            Ok(diagnostics) => diagnostics,
            Err(error) => {
                warn!(type_name = %declaration.name, %error, "skipping type");
                Vec::new()
            }
        }
    }

    fn check_host_data(declaration: &TypeDeclaration) -> Result<()> {
        if declaration.token.is_null() {
            return Err(malformed_error!(
                "Type '{}' has a null token",
                declaration.name
            ));
        }

        if declaration.name.is_empty() {
            return Err(malformed_error!(
                "Type with token {} has an empty name",
                declaration.token
            ));
        }

        if let Some(base) = &declaration.base {
            if base.token == declaration.token {
                return Err(malformed_error!(
                    "Type '{}' ({}) names itself as its base type",
                    declaration.name,
                    declaration.token
                ));
            }
        }

        Ok(())
    }

    /// Walks the type and its members, registering every recognized attribute.
    ///
    /// Returns `None` if no recognized attribute was found.
    fn collect_facts(declaration: &TypeDeclaration) -> Option<TypeValidationContext> {
        let mut context: Option<TypeValidationContext> = None;
        let new_context = || {
            TypeValidationContext::new(
                declaration.token,
                declaration.name.clone(),
                declaration.location.clone(),
                declaration.members.iter().map(|member| member.name.as_str()),
            )
        };

        let type_anchor = Anchor::new(&declaration.name, Some(&declaration.location));
        for attr in &declaration.attributes {
            let Some(kind) = AttributeKind::classify(&attr.type_name) else {
                continue;
            };
            if !kind.is_type_level() {
                trace!(type_name = %declaration.name, %kind, "member attribute on type, ignored");
                continue;
            }

            let context = context.get_or_insert_with(new_context);
            match kind {
                AttributeKind::ProtoContract => context.set_contract(type_anchor, attr),
                AttributeKind::ProtoInclude => context.add_include(type_anchor, attr),
                AttributeKind::ProtoReserved => context.add_reserved(type_anchor, attr),
                AttributeKind::ProtoPartialMember => context.add_member(type_anchor, attr, None),
                AttributeKind::ProtoPartialIgnore => context.add_ignore(type_anchor, attr, None),
                // filtered by placement above
                AttributeKind::ProtoMember | AttributeKind::ProtoIgnore => {}
            }
        }

        for member in &declaration.members {
            let anchor = Anchor::new(&member.name, member.location.as_ref());
            for attr in &member.attributes {
                let Some(kind) = AttributeKind::classify(&attr.type_name) else {
                    continue;
                };

                match kind {
                    AttributeKind::ProtoMember => context
                        .get_or_insert_with(new_context)
                        .add_member(anchor, attr, Some(member.name.as_str())),
                    AttributeKind::ProtoIgnore => context
                        .get_or_insert_with(new_context)
                        .add_ignore(anchor, attr, Some(member.name.as_str())),
                    AttributeKind::ProtoContract
                    | AttributeKind::ProtoPartialMember
                    | AttributeKind::ProtoPartialIgnore
                    | AttributeKind::ProtoInclude
                    | AttributeKind::ProtoReserved => {
                        trace!(
                            type_name = %declaration.name,
                            member = %member.name,
                            %kind,
                            "type attribute on member, ignored"
                        );
                    }
                }
            }
        }

        context
    }

    /// A contract type that declares instance constructors must keep a parameterless one,
    /// unless construction is skipped.
    fn check_constructors(
        &self,
        declaration: &TypeDeclaration,
        context: Option<&TypeValidationContext>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(context) = context else {
            return;
        };
        if !context.has_flag(ContractFlags::IS_PROTO_CONTRACT)
            || context.has_flag(ContractFlags::SKIP_CONSTRUCTOR)
        {
            return;
        }

        let mut explicit = declaration
            .constructors
            .iter()
            .filter(|ctor| !ctor.is_static && !ctor.is_implicit)
            .peekable();
        if explicit.peek().is_none() {
            return;
        }
        if explicit.any(|ctor| ctor.parameter_count == 0) {
            return;
        }

        self.emit(
            diagnostics,
            Rule::ConstructorMissing,
            declaration,
            vec![declaration.name.clone()],
        );
    }

    /// Cross checks against the attributes of the direct base type.
    fn check_base_type(
        &self,
        declaration: &TypeDeclaration,
        base: &BaseType,
        context: Option<&TypeValidationContext>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(base_contract) = Self::last_of_kind(&base.attributes, AttributeKind::ProtoContract)
        else {
            return;
        };
        if get_bool(base_contract, "IgnoreUnknownSubTypes").unwrap_or(false) {
            return;
        }

        let is_contract =
            context.is_some_and(|context| context.has_flag(ContractFlags::IS_PROTO_CONTRACT));
        if !is_contract {
            self.emit(
                diagnostics,
                Rule::SubTypeShouldBeContract,
                declaration,
                vec![declaration.name.clone(), base.name.clone()],
            );
        }

        let included = base
            .attributes
            .iter()
            .filter(|attr| {
                AttributeKind::classify(&attr.type_name) == Some(AttributeKind::ProtoInclude)
            })
            .filter_map(|attr| get_type(attr, "knownType"))
            .any(|target| target.token == declaration.token);
        if !included {
            self.emit(
                diagnostics,
                Rule::IncludeNotDeclared,
                declaration,
                vec![base.name.clone(), declaration.name.clone()],
            );
        }
    }

    fn last_of_kind(
        attributes: &[AttributeInstance],
        kind: AttributeKind,
    ) -> Option<&AttributeInstance> {
        attributes
            .iter()
            .rev()
            .find(|attr| AttributeKind::classify(&attr.type_name) == Some(kind))
    }

    fn emit(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        rule: Rule,
        declaration: &TypeDeclaration,
        args: Vec<String>,
    ) {
        if self.config.allows(rule) {
            diagnostics.push(Diagnostic::new(rule, declaration.location.clone(), args));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        customattributes::{AttributeArgument, TypeRef},
        location::Location,
        symbols::{Constructor, MemberSymbol},
        token::Token,
    };

    const BASE: Token = Token(0x02000001);
    const DERIVED: Token = Token(0x02000002);

    fn node() -> Location {
        Location::new("Shapes.cs", 10, 1)
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<Rule> {
        diagnostics.iter().map(|d| d.rule).collect()
    }

    fn contract() -> AttributeInstance {
        AttributeInstance::new("ProtoContract")
    }

    fn member(name: &str, tag: i32) -> MemberSymbol {
        MemberSymbol::new(name).with_attribute(
            AttributeInstance::new("ProtoMember").with_arg("tag", AttributeArgument::I4(tag)),
        )
    }

    fn include_of(target: Token, name: &str) -> AttributeInstance {
        AttributeInstance::new("ProtoInclude")
            .with_arg("tag", AttributeArgument::I4(10))
            .with_arg(
                "knownType",
                AttributeArgument::Type(TypeRef::new(target, name, Some(BASE))),
            )
    }

    fn base(attributes: Vec<AttributeInstance>) -> BaseType {
        BaseType {
            token: BASE,
            name: "Shape".to_string(),
            attributes,
        }
    }

    fn derived() -> TypeDeclaration {
        TypeDeclaration::new(DERIVED, "Circle", node())
    }

    #[test]
    fn type_without_attributes_is_clean() {
        let decl = derived().with_member(MemberSymbol::new("Radius"));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn foreign_attributes_create_no_facts() {
        let decl = derived()
            .with_attribute(AttributeInstance::new("Serializable"))
            .with_constructor(Constructor::explicit(1));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn constructor_missing() {
        let decl = derived()
            .with_attribute(contract())
            .with_constructor(Constructor::explicit(2));
        let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
        assert_eq!(rules(&diagnostics), vec![Rule::ConstructorMissing]);
        assert_eq!(diagnostics[0].location, node());
    }

    #[test]
    fn skip_constructor_suppresses_constructor_rule() {
        let decl = derived()
            .with_attribute(
                contract().with_named("SkipConstructor", AttributeArgument::Bool(true)),
            )
            .with_constructor(Constructor::explicit(2));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn parameterless_or_implicit_constructor_is_fine() {
        let with_default = derived()
            .with_attribute(contract())
            .with_constructor(Constructor::explicit(2))
            .with_constructor(Constructor::explicit(0));
        assert!(ContractAnalyzer::default().analyze(&with_default).unwrap().is_empty());

        let implicit = derived()
            .with_attribute(contract())
            .with_constructor(Constructor::implicit());
        assert!(ContractAnalyzer::default().analyze(&implicit).unwrap().is_empty());

        let static_only = derived().with_attribute(contract()).with_constructor(Constructor {
            parameter_count: 0,
            is_static: true,
            is_implicit: false,
        });
        assert!(ContractAnalyzer::default().analyze(&static_only).unwrap().is_empty());
    }

    #[test]
    fn constructor_rule_needs_contract() {
        let decl = derived()
            .with_member(member("Radius", 1))
            .with_constructor(Constructor::explicit(1));
        let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
        assert_eq!(rules(&diagnostics), vec![Rule::MissingContract]);
    }

    #[test]
    fn base_contract_without_include() {
        let decl = derived()
            .with_attribute(contract())
            .with_base(base(vec![contract()]));
        let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
        assert_eq!(rules(&diagnostics), vec![Rule::IncludeNotDeclared]);
        assert_eq!(
            diagnostics[0].args,
            vec!["Shape".to_string(), "Circle".to_string()]
        );
    }

    #[test]
    fn base_contract_with_include() {
        let decl = derived()
            .with_attribute(contract())
            .with_base(base(vec![contract(), include_of(DERIVED, "Circle")]));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn subtype_of_contract_should_be_contract() {
        let decl = derived().with_base(base(vec![contract(), include_of(DERIVED, "Circle")]));
        let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
        assert_eq!(rules(&diagnostics), vec![Rule::SubTypeShouldBeContract]);
    }

    #[test]
    fn plain_subtype_of_contract_gets_both_warnings() {
        let decl = derived().with_base(base(vec![contract()]));
        let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
        assert_eq!(
            rules(&diagnostics),
            vec![Rule::SubTypeShouldBeContract, Rule::IncludeNotDeclared]
        );
    }

    #[test]
    fn ignore_unknown_subtypes_disables_base_checks() {
        let base_contract =
            contract().with_named("IgnoreUnknownSubTypes", AttributeArgument::Bool(true));
        let decl = derived().with_base(base(vec![base_contract]));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn non_contract_base_is_not_checked() {
        let decl = derived().with_base(base(vec![AttributeInstance::new("Serializable")]));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn misplaced_attributes_are_ignored() {
        let decl = derived()
            .with_attribute(contract())
            .with_attribute(AttributeInstance::new("ProtoMember"))
            .with_member(
                MemberSymbol::new("Radius").with_attribute(
                    AttributeInstance::new("ProtoReserved")
                        .with_arg("field", AttributeArgument::I4(1)),
                ),
            );
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn partial_declarations_from_type() {
        let decl = derived()
            .with_attribute(contract())
            .with_attribute(
                AttributeInstance::new("ProtoPartialMember")
                    .with_arg("tag", AttributeArgument::I4(1))
                    .with_arg("memberName", AttributeArgument::String("Radius".into())),
            )
            .with_attribute(
                AttributeInstance::new("ProtoPartialIgnore")
                    .with_arg("memberName", AttributeArgument::String("Area".into())),
            )
            .with_member(MemberSymbol::new("Radius"))
            .with_member(MemberSymbol::new("Area"));
        assert!(ContractAnalyzer::default().analyze(&decl).unwrap().is_empty());
    }

    #[test]
    fn malformed_host_data() {
        let analyzer = ContractAnalyzer::default();

        let null = TypeDeclaration::new(Token(0), "Ghost", node());
        assert!(matches!(analyzer.analyze(&null), Err(Error::Malformed { .. })));

        let unnamed = TypeDeclaration::new(DERIVED, "", node());
        assert!(matches!(analyzer.analyze(&unnamed), Err(Error::Malformed { .. })));

        let cyclic = derived().with_base(BaseType {
            token: DERIVED,
            name: "Circle".into(),
            attributes: Vec::new(),
        });
        assert!(matches!(analyzer.analyze(&cyclic), Err(Error::Malformed { .. })));
    }

    #[test]
    fn non_type_symbols_are_rejected() {
        let analyzer = ContractAnalyzer::default();
        let result = analyzer.analyze_symbol(&Symbol::Other("Shapes".into()));
        assert!(matches!(result, Err(Error::NotAType(name)) if name == "Shapes"));

        let result = analyzer.analyze_symbol(&Symbol::Type(derived()));
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn config_controls_driver_rules() {
        let decl = derived()
            .with_attribute(contract())
            .with_constructor(Constructor::explicit(1))
            .with_base(base(vec![contract()]));
        let analyzer = ContractAnalyzer::new(ValidationConfig::minimal());
        assert!(analyzer.analyze(&decl).unwrap().is_empty());
    }
}
