//! Argument lookup on attribute applications.
//!
//! An attribute argument can be supplied either positionally (bound to a constructor parameter)
//! or by name (a field/property assignment). Named assignments run after the constructor, so when
//! both are present the named value is the effective one. [`find_argument`] implements exactly
//! that precedence; the typed accessors layer a strict kind/type check on top of it.
//!
//! Every accessor fails soft: a missing argument, a `null` value or a value of a different
//! concrete type all yield `None`. Callers apply their own defaults.

use crate::metadata::customattributes::types::{
    ArgumentKind, AttributeArgument, AttributeInstance, TypeRef,
};

/// Looks up an argument by logical name, case-insensitively.
///
/// Named arguments are checked first; if none matches, constructor arguments are checked by
/// their declaring parameter name in declaration order. The first match wins.
#[must_use]
pub fn find_argument<'a>(
    attr: &'a AttributeInstance,
    name: &str,
) -> Option<&'a AttributeArgument> {
    attr.named_args
        .iter()
        .find(|arg| arg.name.eq_ignore_ascii_case(name))
        .map(|arg| &arg.value)
        .or_else(|| {
            attr.fixed_args
                .iter()
                .find(|arg| arg.param_name.eq_ignore_ascii_case(name))
                .map(|arg| &arg.value)
        })
}

fn find_of_kind<'a>(
    attr: &'a AttributeInstance,
    name: &str,
    kind: ArgumentKind,
) -> Option<&'a AttributeArgument> {
    find_argument(attr, name).filter(|value| value.kind() == kind)
}

/// Returns the named string argument
#[must_use]
pub fn get_string<'a>(attr: &'a AttributeInstance, name: &str) -> Option<&'a str> {
    match find_of_kind(attr, name, ArgumentKind::Primitive)? {
        AttributeArgument::String(value) => Some(value.as_str()),
        _ => None,
    }
}

/// Returns the named 32-bit signed integer argument
#[must_use]
pub fn get_i32(attr: &AttributeInstance, name: &str) -> Option<i32> {
    match find_of_kind(attr, name, ArgumentKind::Primitive)? {
        AttributeArgument::I4(value) => Some(*value),
        _ => None,
    }
}

/// Returns the named boolean argument
#[must_use]
pub fn get_bool(attr: &AttributeInstance, name: &str) -> Option<bool> {
    match find_of_kind(attr, name, ArgumentKind::Primitive)? {
        AttributeArgument::Bool(value) => Some(*value),
        _ => None,
    }
}

/// Returns the named type-reference argument
#[must_use]
pub fn get_type<'a>(attr: &'a AttributeInstance, name: &str) -> Option<&'a TypeRef> {
    match find_of_kind(attr, name, ArgumentKind::Type)? {
        AttributeArgument::Type(value) => Some(value),
        _ => None,
    }
}
