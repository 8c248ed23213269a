//! Integration tests for contract validation over whole type declarations.
//!
//! These tests drive [`ContractAnalyzer`] the way a host framework would: build resolved type
//! declarations, hand them over one by one or as a batch, and inspect the diagnostics.

use protoscope::prelude::*;

const SHAPE: Token = Token(0x02000001);
const CIRCLE: Token = Token(0x02000002);
const SQUARE: Token = Token(0x02000003);
const UNRELATED: Token = Token(0x02000004);

fn loc(line: u32) -> Location {
    Location::new("Shapes.cs", line, 5)
}

fn contract() -> AttributeInstance {
    AttributeInstance::new("ProtoContract")
}

fn proto_member(tag: i32) -> AttributeInstance {
    AttributeInstance::new("ProtoMember").with_arg("tag", AttributeArgument::I4(tag))
}

fn include(tag: i32, token: Token, name: &str, base: Option<Token>) -> AttributeInstance {
    AttributeInstance::new("ProtoInclude")
        .with_arg("tag", AttributeArgument::I4(tag))
        .with_arg(
            "knownType",
            AttributeArgument::Type(TypeRef::new(token, name, base)),
        )
}

fn ids(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(Diagnostic::id).collect()
}

fn shape() -> TypeDeclaration {
    TypeDeclaration::new(SHAPE, "Shape", loc(1))
        .with_attribute(contract())
        .with_attribute(include(10, CIRCLE, "Circle", Some(SHAPE)))
        .with_member(MemberSymbol::new("Name").with_attribute(proto_member(1)))
}

fn circle() -> TypeDeclaration {
    TypeDeclaration::new(CIRCLE, "Circle", loc(20))
        .with_attribute(contract())
        .with_member(MemberSymbol::new("Radius").with_attribute(proto_member(1)))
        .with_base(BaseType {
            token: SHAPE,
            name: "Shape".into(),
            attributes: shape().attributes,
        })
}

fn square() -> TypeDeclaration {
    TypeDeclaration::new(SQUARE, "Square", loc(40))
        .with_member(MemberSymbol::new("Side"))
        .with_base(BaseType {
            token: SHAPE,
            name: "Shape".into(),
            attributes: shape().attributes,
        })
}

#[test]
fn consistent_hierarchy_is_clean() {
    let analyzer = ContractAnalyzer::default();
    assert!(analyzer.analyze(&shape()).unwrap().is_empty());
    assert!(analyzer.analyze(&circle()).unwrap().is_empty());
}

#[test]
fn undeclared_plain_subtype() {
    let diagnostics = ContractAnalyzer::default().analyze(&square()).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0014", "rule-0013"]);
    assert!(diagnostics.iter().all(|d| d.severity == DiagnosticSeverity::Warning));
    assert!(diagnostics.iter().all(|d| d.location == loc(40)));
    assert_eq!(
        diagnostics[0].message,
        "Type 'Square' derives from the contract 'Shape' but is not marked as a contract"
    );
}

#[test]
fn include_and_member_share_numbers() {
    let decl = shape().with_member(MemberSymbol::new("Color").with_attribute(proto_member(10)));
    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0003"]);
    assert_eq!(diagnostics[0].args, vec!["10".to_string()]);
}

#[test]
fn include_of_unrelated_type() {
    let decl = shape().with_attribute(include(11, UNRELATED, "Color", None));
    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0012"]);
    assert_eq!(
        diagnostics[0].message,
        "The included type 'Color' is not a direct subtype of 'Shape'"
    );
}

#[test]
fn duplicate_include() {
    let decl = shape().with_attribute(include(11, CIRCLE, "Circle", Some(SHAPE)));
    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0011"]);
}

#[test]
fn attributes_without_contract_marker() {
    let decl = TypeDeclaration::new(SQUARE, "Square", loc(40))
        .with_member(MemberSymbol::new("Side").with_attribute(proto_member(1)));
    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0009"]);
    assert_eq!(diagnostics[0].location, loc(40));
}

#[test]
fn every_violation_is_reported_in_catalog_order() {
    let decl = TypeDeclaration::new(SHAPE, "Shape", loc(1))
        .with_attribute(contract())
        .with_attribute(
            AttributeInstance::new("ProtoReserved")
                .with_arg("field", AttributeArgument::String("Legacy".into())),
        )
        .with_attribute(
            AttributeInstance::new("ProtoPartialMember")
                .with_arg("tag", AttributeArgument::I4(3))
                .with_arg("memberName", AttributeArgument::String("Missing".into())),
        )
        .with_member(MemberSymbol::new("Id").with_attribute(proto_member(0)))
        .with_member(
            MemberSymbol::new("Old").with_attribute(
                proto_member(2).with_named("Name", AttributeArgument::String("Legacy".into())),
            ),
        )
        .with_member(
            MemberSymbol::new("Cached")
                .with_attribute(proto_member(4))
                .with_attribute(AttributeInstance::new("ProtoIgnore")),
        )
        .with_constructor(Constructor::explicit(1));

    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(
        ids(&diagnostics),
        vec!["rule-0015", "rule-0001", "rule-0002", "rule-0010", "rule-0004"]
    );
}

#[test]
fn host_attribute_locations_win() {
    let decl = TypeDeclaration::new(SHAPE, "Shape", loc(1))
        .with_attribute(contract())
        .with_member(
            MemberSymbol::new("Id")
                .at(loc(5))
                .with_attribute(proto_member(0).at(loc(4))),
        )
        .with_member(MemberSymbol::new("Code").at(loc(8)).with_attribute(proto_member(0)));

    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    let locations: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.rule == Rule::InvalidFieldNumber)
        .map(|d| d.location.clone())
        .collect();
    assert_eq!(locations, vec![loc(4), loc(8)]);
}

#[test]
fn author_text_in_messages_is_not_expanded() {
    let decl = TypeDeclaration::new(SHAPE, "Shape", loc(1))
        .with_attribute(contract())
        .with_attribute(
            AttributeInstance::new("ProtoPartialMember")
                .with_arg("tag", AttributeArgument::I4(1))
                .with_arg("memberName", AttributeArgument::String("{1}".into())),
        );

    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0002"]);
    assert_eq!(
        diagnostics[0].message,
        "The member '{1}' could not be found on type 'Shape'"
    );
}

#[test]
fn batch_skips_malformed_types() {
    let ghost = TypeDeclaration::new(Token(0), "Ghost", loc(60)).with_attribute(contract());
    let batch = vec![square(), ghost, shape()];

    let diagnostics = ContractAnalyzer::default().analyze_all(&batch);
    assert_eq!(diagnostics.count(), 2);
    assert_eq!(diagnostics.warning_count(), 2);
    assert!(!diagnostics.has_errors());
}

#[test]
fn parallel_and_sequential_batches_agree() {
    let mut batch = Vec::new();
    for index in 0..64u32 {
        let decl = TypeDeclaration::new(
            Token(0x0200_0100 + index),
            format!("Type{index}"),
            loc(index + 1),
        )
        .with_attribute(contract())
        .with_member(MemberSymbol::new("A").with_attribute(proto_member(index as i32 % 3)))
        .with_member(MemberSymbol::new("B").with_attribute(proto_member(1)));
        batch.push(decl);
    }

    let parallel = ContractAnalyzer::new(ValidationConfig::default()).analyze_all(&batch);
    let sequential = ContractAnalyzer::new(ValidationConfig::strict()).analyze_all(&batch);

    let parallel: Vec<_> = parallel.iter().cloned().collect();
    let sequential: Vec<_> = sequential.iter().cloned().collect();
    assert_eq!(parallel, sequential);
    assert!(!parallel.is_empty());
}

#[test]
fn disabled_config_reports_nothing() {
    let batch = vec![square(), shape().with_attribute(include(10, UNRELATED, "Color", None))];
    let diagnostics = ContractAnalyzer::new(ValidationConfig::disabled()).analyze_all(&batch);
    assert!(!diagnostics.has_any());
}

#[test]
fn qualified_attribute_names() {
    let decl = TypeDeclaration::new(SHAPE, "Shape", loc(1))
        .with_attribute(AttributeInstance::new("global::ProtoBuf.ProtoContractAttribute"))
        .with_member(
            MemberSymbol::new("Id").with_attribute(
                AttributeInstance::new("ProtoBuf.ProtoMember")
                    .with_arg("tag", AttributeArgument::I4(0)),
            ),
        )
        .with_member(MemberSymbol::new("Other").with_attribute(
            AttributeInstance::new("Acme.ProtoMember").with_arg("tag", AttributeArgument::I4(0)),
        ));

    let diagnostics = ContractAnalyzer::default().analyze(&decl).unwrap();
    assert_eq!(ids(&diagnostics), vec!["rule-0001"]);
}

#[test]
fn catalog_lookup() {
    let rule = Rule::from_id("rule-0013").unwrap();
    assert_eq!(rule, Rule::IncludeNotDeclared);
    assert_eq!(rule.category(), DiagnosticCategory::Inheritance);
    assert!(matches!(Rule::from_id("rule-9999"), Err(Error::UnknownRule(_))));
}
