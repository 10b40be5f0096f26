//! Instantiation of a template for concrete types
//!
//! - `request`: the parsed request (replacement pairs, selection, package)
//! - `driver`: the stages one request goes through, from locating the
//!   template to emitting the generated files

pub mod driver;
pub mod request;

pub use driver::{generate, instantiate, Instantiation, Stage};
pub use request::{is_identifier, parse_replacements, InstantiationRequest, ReplacementPair};
