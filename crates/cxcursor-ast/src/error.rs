//! Error types for cxcursor-ast.

use miette::Diagnostic;
use thiserror::Error;

use crate::ids::{DeclId, ExprId, TypeId, UnitId};

/// Result type for AST store operations.
pub type Result<T> = std::result::Result<T, AstError>;

/// Errors raised while building or looking up translation units.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A declaration refers to a declaration that was never added.
    #[error("{owner} refers to unknown declaration {target}")]
    #[diagnostic(code(cxcursor::ast::dangling_decl))]
    DanglingDecl { owner: String, target: DeclId },

    /// A node refers to a type that was never added.
    #[error("{owner} refers to unknown type {target}")]
    #[diagnostic(code(cxcursor::ast::dangling_type))]
    DanglingType { owner: String, target: TypeId },

    /// A node refers to an expression that was never added.
    #[error("{owner} refers to unknown expression {target}")]
    #[diagnostic(code(cxcursor::ast::dangling_expr))]
    DanglingExpr { owner: String, target: ExprId },

    /// Base specifiers can only be attached to records.
    #[error("{0} is not a record and cannot have base specifiers")]
    #[diagnostic(code(cxcursor::ast::not_a_record))]
    NotARecord(DeclId),

    /// The translation unit was disposed; every handle into it is dead.
    #[error("translation unit {0} is no longer alive")]
    #[diagnostic(
        code(cxcursor::ast::stale_unit),
        help("cursors must not outlive the translation unit they were created from")
    )]
    StaleUnit(UnitId),
}
