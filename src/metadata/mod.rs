//! Symbol data, attribute model and contract validation.
//!
//! - [`symbols`] and [`customattributes`] describe what the host hands over
//! - [`validation`] checks it
//! - [`diagnostics`] describes what comes back

pub mod customattributes;
pub mod diagnostics;
pub mod location;
pub mod symbols;
pub mod token;
pub mod validation;
