//! Attribute applications and argument extraction.
//!
//! The host resolves every attribute application before handing it over: constructor arguments
//! come paired with the name of the parameter they bind to, named arguments carry the
//! field/property name, and `typeof(...)` arguments are already resolved to a [`TypeRef`].
//! This module models that data and provides the small lookup algorithm used to read it.
//!
//! # Argument Precedence
//!
//! Named arguments are assigned after the constructor runs, therefore a named argument shadows a
//! constructor argument with the same (case-insensitive) name:
//!
//! ```rust
//! use protoscope::metadata::customattributes::{get_i32, AttributeArgument, AttributeInstance};
//!
//! let attr = AttributeInstance::new("ProtoMemberAttribute")
//!     .with_arg("tag", AttributeArgument::I4(1))
//!     .with_named("Tag", AttributeArgument::I4(2));
//!
//! assert_eq!(get_i32(&attr, "tag"), Some(2));
//! ```
//!
//! # Soft Failure
//!
//! Lookups never fail hard. An absent argument, a `null`, or a value whose concrete type differs
//! from the requested one is reported as `None`.

mod extract;
mod types;

pub use extract::{find_argument, get_bool, get_i32, get_string, get_type};
pub use types::*;
