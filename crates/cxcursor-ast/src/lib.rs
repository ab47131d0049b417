//! In-memory C++ AST store for the cxcursor workspace.
//!
//! This crate owns the nodes that cursors point at:
//! - declarations, base specifiers, types and expressions, kept in
//!   per-unit arenas and addressed by typed ids
//! - an [`Index`] that owns translation units in generation-checked slots
//! - a [`UnitBuilder`] used by front ends (and the manifest loader) to
//!   populate a unit
//!
//! It does not parse C++. The cursor layer only reads it through the
//! accessors exposed here.

mod decl;
mod error;
mod expr;
mod ids;
mod index;
mod template;
mod types;
mod unit;

pub use decl::{
    AccessSpecifier, BaseSpecifier, ClassSpecialization, Decl, DeclKind, FunctionDecl,
    FunctionFlavor, RecordDecl, SpecializedFrom, TagKind, TemplateDecl, TemplateFlavor,
    TemplateParm, TemplatedKind, VarDecl,
};
pub use error::{AstError, Result};
pub use expr::{BinaryOp, Expr, ExprKind};
pub use ids::{BaseId, DeclId, ExprId, TypeId, UnitId};
pub use index::Index;
pub use template::{ArgKind, TemplateArgument};
pub use types::CppType;
pub use unit::{TranslationUnit, UnitBuilder};
