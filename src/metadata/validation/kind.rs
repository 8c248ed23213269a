//! Classification of recognized contract attributes.
//!
//! The driver classifies each attribute application once into an [`AttributeKind`] and then
//! dispatches on it with an exhaustive `match`; attributes that do not classify are not contract
//! facts and are skipped.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Namespace the recognized attributes live in
pub const CONTRACT_NAMESPACE: &str = "ProtoBuf";

/// A recognized contract attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, IntoStaticStr,
)]
pub enum AttributeKind {
    /// Marks a type as a serialization contract
    ProtoContract,
    /// Declares a serialized field on a member
    ProtoMember,
    /// Declares a serialized field for a named member, from the type
    ProtoPartialMember,
    /// Excludes a member from serialization
    ProtoIgnore,
    /// Excludes a named member from serialization, from the type
    ProtoPartialIgnore,
    /// Declares a subtype for polymorphic serialization
    ProtoInclude,
    /// Reserves field numbers or names
    ProtoReserved,
}

impl AttributeKind {
    /// Classifies an attribute by its type name.
    ///
    /// Accepts `ProtoMember`, `ProtoMemberAttribute` and the `ProtoBuf.`-qualified forms of
    /// both. Names from any other namespace do not classify.
    #[must_use]
    pub fn classify(type_name: &str) -> Option<AttributeKind> {
        let name = type_name.strip_prefix("global::").unwrap_or(type_name);
        let name = match name.rsplit_once('.') {
            Some((namespace, name)) if namespace == CONTRACT_NAMESPACE => name,
            Some(_) => return None,
            None => name,
        };
        let name = name.strip_suffix("Attribute").unwrap_or(name);
        AttributeKind::from_str(name).ok()
    }

    /// Returns true if the attribute is applied to the type itself
    #[must_use]
    pub fn is_type_level(self) -> bool {
        !self.is_member_level()
    }

    /// Returns true if the attribute is applied to a field or property
    #[must_use]
    pub fn is_member_level(self) -> bool {
        matches!(self, AttributeKind::ProtoMember | AttributeKind::ProtoIgnore)
    }
}
