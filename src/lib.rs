// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # protoscope
//!
//! A consistency validator for protobuf-style serialization contracts declared through
//! attributes. A host static-analysis framework hands over resolved type declarations (types,
//! members, constructors, base types and the attribute applications on all of them) and gets
//! back a set of diagnostics describing everything that would make the contract invalid or
//! surprising to a serializer.
//!
//! ## Features
//!
//! - **Field number checks** - legal range, the wire-format reserved block, uniqueness across
//!   members and subtype includes
//! - **Reservations** - reserved numbers and names, overlap detection between reservations
//! - **Member consistency** - partial declarations resolve, members are declared once, never
//!   both declared and ignored
//! - **Inheritance** - includes target direct subtypes, base contracts know their subtypes
//! - **Stable catalog** - every finding carries a `rule-NNNN` identifier tooling can key off
//! - **Parallel batches** - per-type isolation, [`rayon`] powered batch analysis
//!
//! ## Quick Start
//!
//! ```rust
//! use protoscope::prelude::*;
//!
//! let order = TypeDeclaration::new(Token(0x02000001), "Order", Location::new("Order.cs", 3, 1))
//!     .with_attribute(AttributeInstance::new("ProtoContract"))
//!     .with_attribute(
//!         AttributeInstance::new("ProtoReserved")
//!             .with_arg("from", AttributeArgument::I4(10))
//!             .with_arg("to", AttributeArgument::I4(20)),
//!     )
//!     .with_member(MemberSymbol::new("Id").with_attribute(
//!         AttributeInstance::new("ProtoMember").with_arg("tag", AttributeArgument::I4(15)),
//!     ));
//!
//! let diagnostics = ContractAnalyzer::default().analyze_all(&[order]);
//! assert_eq!(diagnostics.warning_count(), 1);
//! println!("{}", diagnostics);
//! ```
//!
//! ## Architecture
//!
//! - [`metadata::symbols`] and [`metadata::customattributes`] - boundary model of the host data
//! - [`metadata::validation`] - the per-type validation context, the driver, the rule catalog
//! - [`metadata::diagnostics`] - findings and the thread-safe collection container
//! - [`Error`] and [`Result`] - failures of the host boundary (never rule violations)
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` per validated type, `trace` per registered fact,
//! `warn` for skipped types) and never installs a subscriber itself.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use protoscope::prelude::*;
///
/// let analyzer = ContractAnalyzer::new(ValidationConfig::strict());
/// assert!(!analyzer.config().enable_parallel);
/// ```
pub mod prelude;

/// Symbol model, attribute model, validation and diagnostics.
pub mod metadata;

/// `protoscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `protoscope` Error type
///
/// Covers failures of the host boundary. Contract rule violations are reported as
/// [`metadata::diagnostics::Diagnostic`] values instead.
pub use error::Error;

pub use metadata::validation::{ContractAnalyzer, ValidationConfig};
