//! Error types for cxcursor-manifest.

use std::path::PathBuf;

use cxcursor_ast::AstError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors that can occur while loading a manifest.
#[derive(Error, Diagnostic, Debug)]
pub enum ManifestError {
    /// Failed to read the manifest file.
    #[error("failed to read manifest {}", path.display())]
    #[diagnostic(code(cxcursor::manifest::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML manifest.
    #[error("failed to parse TOML manifest: {0}")]
    #[diagnostic(code(cxcursor::manifest::toml))]
    ParseToml(#[from] toml::de::Error),

    /// Failed to parse a JSON manifest.
    #[error("failed to parse JSON manifest: {0}")]
    #[diagnostic(code(cxcursor::manifest::json))]
    ParseJson(#[from] serde_json::Error),

    /// Two declarations share an id.
    #[error("declaration id `{0}` is used more than once")]
    #[diagnostic(code(cxcursor::manifest::duplicate_id))]
    DuplicateId(String),

    /// A declaration names an id no declaration carries.
    #[error("`{from}` refers to unknown declaration `{target}`")]
    #[diagnostic(
        code(cxcursor::manifest::unknown_reference),
        help("references use the `id` of another [[decl]] entry")
    )]
    UnknownReference { from: String, target: String },

    /// A type spelling could not be parsed.
    #[error("`{decl}` uses unparseable type `{spelling}`")]
    #[diagnostic(code(cxcursor::manifest::bad_type))]
    BadType { decl: String, spelling: String },

    /// A declaration entry is inconsistent.
    #[error("invalid declaration `{id}`: {reason}")]
    #[diagnostic(code(cxcursor::manifest::invalid))]
    Invalid { id: String, reason: String },

    /// The lowered unit was rejected by the AST store.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ast(#[from] AstError),
}
