//! Error types for cxcursor.

use cxcursor_ast::UnitId;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for cursor accessors.
pub type Result<T> = std::result::Result<T, CursorError>;

/// The only failure a cursor accessor can report.
///
/// Kind mismatches and missing relationships are not errors; accessors
/// answer those with `None`.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor outlived the translation unit it points into.
    #[error("cursor refers to translation unit {0}, which has been disposed")]
    #[diagnostic(
        code(cxcursor::stale_unit),
        help("cursors are only valid while their translation unit is alive")
    )]
    StaleUnit(UnitId),
}
