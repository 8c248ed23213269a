//! Attribute instance types and data structures.
//!
//! This module contains the types used to represent one attribute application as the host
//! resolved it: the attribute's type name, its constructor arguments paired with the declaring
//! parameter names, its named (field/property) arguments, and the source location of the
//! application site.

use std::fmt;

use crate::metadata::{location::Location, token::Token};

/// A resolved reference to a type, as found in `typeof(...)` attribute arguments.
///
/// The host resolves the reference before handing it over; `base` carries the identity of the
/// referenced type's direct base type so that subtype relationships can be checked without
/// access to the symbol graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Stable identity of the referenced type
    pub token: Token,
    /// Display name of the referenced type
    pub name: String,
    /// Identity of the direct base type, if any
    pub base: Option<Token>,
}

impl TypeRef {
    /// Creates a new type reference
    pub fn new(token: Token, name: impl Into<String>, base: Option<Token>) -> Self {
        Self {
            token,
            name: name.into(),
            base,
        }
    }

    /// Returns true if `parent` is the direct base type of this type
    #[must_use]
    pub fn derives_directly_from(&self, parent: Token) -> bool {
        self.base == Some(parent)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Represents a single attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArgument {
    /// Null reference (e.g. `null` passed for a string or type parameter)
    Null,
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// Resolved type reference
    Type(TypeRef),
    /// Array of arguments
    Array(Vec<AttributeArgument>),
    /// Enum value (enum type name + underlying value)
    Enum(String, Box<AttributeArgument>),
}

/// Declared kind of an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Primitive constant (numbers, booleans, characters, strings, enums)
    Primitive,
    /// `typeof(...)` reference
    Type,
    /// Array of values
    Array,
    /// Null reference, compatible with nothing
    Null,
}

impl AttributeArgument {
    /// Returns the declared kind of this value
    #[must_use]
    pub fn kind(&self) -> ArgumentKind {
        match self {
            AttributeArgument::Null => ArgumentKind::Null,
            AttributeArgument::Type(_) => ArgumentKind::Type,
            AttributeArgument::Array(_) => ArgumentKind::Array,
            _ => ArgumentKind::Primitive,
        }
    }
}

/// A constructor argument, paired with the name of the parameter it binds to
#[derive(Debug, Clone, PartialEq)]
pub struct FixedArgument {
    /// Name of the declaring constructor parameter
    pub param_name: String,
    /// Value of the argument
    pub value: AttributeArgument,
}

/// Represents a named argument (field or property) in an attribute application
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: AttributeArgument,
}

/// One attribute application on a type or member
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInstance {
    /// Name of the attribute class, optionally namespace-qualified
    pub type_name: String,
    /// Constructor arguments in parameter declaration order
    pub fixed_args: Vec<FixedArgument>,
    /// Named arguments, evaluated after the constructor call
    pub named_args: Vec<NamedArgument>,
    /// Application site, if the host knows it
    pub location: Option<Location>,
}

impl AttributeInstance {
    /// Creates an attribute application without arguments
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fixed_args: Vec::new(),
            named_args: Vec::new(),
            location: None,
        }
    }

    /// Appends a constructor argument
    #[must_use]
    pub fn with_arg(mut self, param_name: impl Into<String>, value: AttributeArgument) -> Self {
        self.fixed_args.push(FixedArgument {
            param_name: param_name.into(),
            value,
        });
        self
    }

    /// Appends a named field or property argument
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: AttributeArgument) -> Self {
        self.named_args.push(NamedArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// Sets the application site
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}
