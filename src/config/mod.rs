//! Per-template configuration
//!
//! - `loader`: locating and parsing the optional `typegen.{json,yaml,yml}`

pub mod loader;

pub use loader::TemplateConfig;
