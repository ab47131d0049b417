//! Cursor handles over a C++ AST.
//!
//! This crate provides:
//! - [`Cursor`], a small `Copy` handle naming a declaration, base specifier,
//!   template argument or expression of one translation unit
//! - the kind taxonomy ([`CursorKind`], [`TemplateArgumentKind`])
//! - accessors that decode a cursor, check that the query is legal for its
//!   kind, and answer with a value or `None`
//! - an [`abi`] module flattening those answers to fixed sentinels
//!
//! # Architecture
//!
//! ```text
//! Cursor → kind check → Index::unit (generation check) → AST node → Cursor / value
//! ```
//!
//! Every accessor borrows the [`Index`](cxcursor_ast::Index) that owns the
//! translation unit. A cursor whose unit has since been disposed is reported
//! as [`CursorError::StaleUnit`]; any other mismatch is simply "no result".

pub mod abi;
mod access;
mod cursor;
mod dispatch;
mod error;
mod kind;
mod template;

pub use access::{access_specifier, CxxAccessSpecifier};
pub use cursor::{base_cursor, base_cursors, decl_cursor, Cursor, ParentLink, TypeHandle};
pub use dispatch::{
    is_virtual_base, semantic_parent, specialized_template, spelling, template_cursor_kind,
};
pub use error::{CursorError, Result};
pub use kind::{CursorKind, TemplateArgumentKind};
pub use template::{
    as_declaration, as_expression, as_integral, as_template, as_type, classify,
    is_template_argument, num_template_arguments, num_template_parameters, pack_size,
    template_argument, template_argument_kind, template_parameter, type_spelling,
    FunctionSpecializationKind, TemplateClass,
};
