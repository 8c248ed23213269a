//! Host symbol model.
//!
//! These are the boundary inputs the host hands over for one type visit: the declared type with
//! its own attributes, its members with theirs, its constructors (presence and arity only), and
//! the attributes found on its direct base type. Identities and source locations are already
//! resolved; nothing in here refers back into the host's symbol graph.

use crate::metadata::{
    customattributes::AttributeInstance, location::Location, token::Token,
};

/// A field or property declared on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSymbol {
    /// Member name, unique within the declaring type
    pub name: String,
    /// First declared location
    pub location: Option<Location>,
    /// Attributes applied to the member
    pub attributes: Vec<AttributeInstance>,
}

impl MemberSymbol {
    /// Creates a member without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute application
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeInstance) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Sets the declared location
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// A constructor of the visited type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constructor {
    /// Number of declared parameters
    pub parameter_count: usize,
    /// Type initializer (`static` constructor)
    pub is_static: bool,
    /// Compiler-supplied default constructor
    pub is_implicit: bool,
}

impl Constructor {
    /// An explicitly declared instance constructor with `parameter_count` parameters
    #[must_use]
    pub fn explicit(parameter_count: usize) -> Self {
        Self {
            parameter_count,
            is_static: false,
            is_implicit: false,
        }
    }

    /// The compiler-supplied parameterless constructor
    #[must_use]
    pub fn implicit() -> Self {
        Self {
            parameter_count: 0,
            is_static: false,
            is_implicit: true,
        }
    }
}

/// The direct base type of the visited type, with the attributes declared on it.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseType {
    /// Identity of the base type
    pub token: Token,
    /// Display name of the base type
    pub name: String,
    /// Attributes applied to the base type
    pub attributes: Vec<AttributeInstance>,
}

/// A type declaration as exposed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    /// Identity of the type
    pub token: Token,
    /// Display name of the type
    pub name: String,
    /// Location of the declaration node under analysis
    pub location: Location,
    /// Attributes applied to the type
    pub attributes: Vec<AttributeInstance>,
    /// Declared fields and properties
    pub members: Vec<MemberSymbol>,
    /// Declared constructors
    pub constructors: Vec<Constructor>,
    /// Direct base type, if any
    pub base: Option<BaseType>,
}

impl TypeDeclaration {
    /// Creates an empty type declaration
    pub fn new(token: Token, name: impl Into<String>, location: Location) -> Self {
        Self {
            token,
            name: name.into(),
            location,
            attributes: Vec::new(),
            members: Vec::new(),
            constructors: Vec::new(),
            base: None,
        }
    }

    /// Appends a type-level attribute application
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeInstance) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Appends a member
    #[must_use]
    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Appends a constructor
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Sets the direct base type
    #[must_use]
    pub fn with_base(mut self, base: BaseType) -> Self {
        self.base = Some(base);
        self
    }
}

/// A symbol node the host asks the driver to visit.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A type declaration
    Type(TypeDeclaration),
    /// Anything else (namespaces, delegates, ...), identified by name
    Other(String),
}
