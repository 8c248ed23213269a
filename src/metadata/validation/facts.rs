//! Declared facts about one contract type.
//!
//! Each record here describes a single thing the author declared through an attribute: a
//! serialized field, an ignored member, a reservation, a subtype include, or the contract flags
//! themselves. The records are plain values owned by one
//! [`crate::metadata::validation::TypeValidationContext`] and never outlive it.

use std::fmt;

use bitflags::bitflags;

use crate::metadata::{customattributes::TypeRef, location::Location};

/// Lowest legal field number
pub const MIN_FIELD_NUMBER: i32 = 1;
/// Highest legal field number (29 bits)
pub const MAX_FIELD_NUMBER: i32 = 536_870_911;
/// Start of the range reserved by the wire format itself
pub const RESERVED_WIRE_RANGE_START: i32 = 19_000;
/// End of the range reserved by the wire format itself
pub const RESERVED_WIRE_RANGE_END: i32 = 19_999;

/// Returns true if `number` may be used as a field number.
///
/// Valid numbers lie in `[1, 536870911]` and outside `[19000, 19999]`.
#[must_use]
pub fn is_valid_field_number(number: i32) -> bool {
    (MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number)
        && !(RESERVED_WIRE_RANGE_START..=RESERVED_WIRE_RANGE_END).contains(&number)
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Contract-level flags of a type
    pub struct ContractFlags: u8 {
        /// The type carries the contract marker
        const IS_PROTO_CONTRACT = 0x01;
        /// Deserialization bypasses constructors
        const SKIP_CONSTRUCTOR = 0x02;
        /// Unknown subtypes deserialize as the base type
        const IGNORE_UNKNOWN_SUB_TYPES = 0x04;
    }
}

/// A serialized field declared on a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclaration {
    /// Name of the underlying code member
    pub member: String,
    /// Explicit field number
    pub number: Option<i32>,
    /// Logical field name, defaults to the member name
    pub name: String,
    /// Declared by a type-level partial declaration rather than on the member
    pub partial: bool,
    /// Where the declaration was made
    pub location: Location,
    /// Position in the shared field-number registration order
    pub ordinal: usize,
}

/// A member excluded from serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreDeclaration {
    /// Name of the underlying code member
    pub member: String,
    /// Declared by a type-level partial declaration rather than on the member
    pub partial: bool,
    /// Where the declaration was made
    pub location: Location,
}

/// What a reservation forbids
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReservedItem {
    /// Field numbers `from..=to`
    Range {
        /// Lower bound, inclusive
        from: i32,
        /// Upper bound, inclusive
        to: i32,
    },
    /// A logical field name
    Name(String),
}

impl ReservedItem {
    /// Creates a numeric range; bounds given in reverse order are swapped
    #[must_use]
    pub fn range(from: i32, to: i32) -> Self {
        ReservedItem::Range {
            from: from.min(to),
            to: from.max(to),
        }
    }

    /// Creates a single reserved number
    #[must_use]
    pub fn number(number: i32) -> Self {
        ReservedItem::Range {
            from: number,
            to: number,
        }
    }

    /// Returns true if `number` is reserved by this item
    #[must_use]
    pub fn contains_number(&self, number: i32) -> bool {
        match self {
            ReservedItem::Range { from, to } => (*from..=*to).contains(&number),
            ReservedItem::Name(_) => false,
        }
    }

    /// Returns true if `name` is reserved by this item
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        matches!(self, ReservedItem::Name(reserved) if reserved == name)
    }

    /// Returns true if both items are of the same shape and share a number or name
    #[must_use]
    pub fn overlaps(&self, other: &ReservedItem) -> bool {
        match (self, other) {
            (
                ReservedItem::Range { from: a, to: b },
                ReservedItem::Range { from: c, to: d },
            ) => a <= d && c <= b,
            (ReservedItem::Name(a), ReservedItem::Name(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ReservedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservedItem::Range { from, to } if from == to => write!(f, "{from}"),
            ReservedItem::Range { from, to } => write!(f, "{from}-{to}"),
            ReservedItem::Name(name) => f.write_str(name),
        }
    }
}

/// A reserved number range or name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// The reserved numbers or name
    pub item: ReservedItem,
    /// Where the reservation was made
    pub location: Location,
}

/// A subtype declared for polymorphic serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// The included subtype
    pub target: TypeRef,
    /// Field number the subtype is encoded under
    pub number: Option<i32>,
    /// Where the include was declared
    pub location: Location,
    /// Position in the shared field-number registration order
    pub ordinal: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_number_boundaries() {
        let cases = [
            (0, false),
            (1, true),
            (18_999, true),
            (19_000, false),
            (19_500, false),
            (19_999, false),
            (20_000, true),
            (536_870_911, true),
            (536_870_912, false),
            (-5, false),
        ];
        for (number, valid) in cases {
            assert_eq!(is_valid_field_number(number), valid, "field number {number}");
        }
    }

    #[test]
    fn range_overlap() {
        let a = ReservedItem::range(10, 20);
        assert!(a.overlaps(&ReservedItem::range(15, 25)));
        assert!(a.overlaps(&ReservedItem::range(20, 30)));
        assert!(a.overlaps(&ReservedItem::number(10)));
        assert!(!a.overlaps(&ReservedItem::range(21, 30)));
        assert!(!a.overlaps(&ReservedItem::Name("10".into())));
    }

    #[test]
    fn reversed_range_is_normalized() {
        assert_eq!(ReservedItem::range(20, 10), ReservedItem::range(10, 20));
        assert!(ReservedItem::range(20, 10).contains_number(15));
    }

    #[test]
    fn name_reservations() {
        let item = ReservedItem::Name("legacy".into());
        assert!(item.contains_name("legacy"));
        assert!(!item.contains_name("Legacy"));
        assert!(!item.contains_number(1));
        assert!(item.overlaps(&ReservedItem::Name("legacy".into())));
    }

    #[test]
    fn display() {
        assert_eq!(ReservedItem::number(4).to_string(), "4");
        assert_eq!(ReservedItem::range(4, 9).to_string(), "4-9");
        assert_eq!(ReservedItem::Name("old".into()).to_string(), "old");
    }

    #[test]
    fn contract_flags() {
        let flags = ContractFlags::IS_PROTO_CONTRACT | ContractFlags::SKIP_CONSTRUCTOR;
        assert!(flags.contains(ContractFlags::SKIP_CONSTRUCTOR));
        assert!(!flags.contains(ContractFlags::IGNORE_UNKNOWN_SUB_TYPES));
        assert_eq!(ContractFlags::default(), ContractFlags::empty());
    }
}
