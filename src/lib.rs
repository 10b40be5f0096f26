/// Handles argument parsing.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Extension traits for standard library types.
pub mod ext;

/// Glob patterns for template files that are never instantiated.
pub mod ignore;

/// Resolves a template location to a directory of Go sources.
pub mod loader;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Per-template configuration.
pub mod config;

/// Go source parsing and lossless printing.
pub mod syntax;

/// Plural and lower camel forms of identifiers.
pub mod inflect;

/// Morphological identifier matching.
pub mod matcher;

/// Declaration selection by qualified name.
pub mod filter;

/// Renaming of identifiers and comments.
pub mod rewrite;

/// Orchestrates one instantiation request.
pub mod instantiate;

/// Writes generated files.
pub mod emit;
