//! Contract validation.
//!
//! This module holds the validation engine proper: the per-type [`TypeValidationContext`] that
//! accumulates declared facts and checks them, the [`ContractAnalyzer`] driver that feeds it from
//! host type declarations, the diagnostic catalog ([`Rule`]) and the [`ValidationConfig`].

mod analyzer;
mod config;
mod context;
mod facts;
mod kind;
mod rules;

pub use analyzer::ContractAnalyzer;
pub use config::ValidationConfig;
pub use context::{Anchor, TypeValidationContext};
pub use facts::{
    is_valid_field_number, ContractFlags, IgnoreDeclaration, Include, MemberDeclaration,
    Reservation, ReservedItem, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER, RESERVED_WIRE_RANGE_END,
    RESERVED_WIRE_RANGE_START,
};
pub use kind::{AttributeKind, CONTRACT_NAMESPACE};
pub use rules::{Rule, RuleDescriptor};
