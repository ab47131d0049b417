//! The stable, sentinel-flattened surface.
//!
//! Each function mirrors a typed accessor but never fails: "no result" and
//! stale translation units both collapse to the documented sentinel value.
//! Stale units are reported through `tracing` at warn level, since the
//! caller cannot see them otherwise.

use cxcursor_ast::Index;
use tracing::warn;

use crate::access::CxxAccessSpecifier;
use crate::cursor::{Cursor, TypeHandle};
use crate::error::Result;
use crate::kind::{CursorKind, TemplateArgumentKind};
use crate::{access, dispatch, template};

/// Count reported when a declaration has no argument or parameter list.
pub const UNKNOWN_COUNT: u32 = u32::MAX;

/// Value reported by [`template_argument_value`] for non-integral arguments.
pub const NOT_INTEGRAL: i64 = i64::MIN;

fn flatten<T>(op: &'static str, result: Result<T>, sentinel: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(op, error = %err, "cursor query on disposed translation unit");
            sentinel
        }
    }
}

fn flatten_opt<T>(op: &'static str, result: Result<Option<T>>, sentinel: T) -> T {
    flatten(op, result, None).unwrap_or(sentinel)
}

pub fn is_virtual_base(index: &Index, cursor: Cursor) -> bool {
    flatten(
        "is_virtual_base",
        dispatch::is_virtual_base(index, cursor),
        false,
    )
}

pub fn cxx_access_specifier(index: &Index, cursor: Cursor) -> CxxAccessSpecifier {
    flatten(
        "access_specifier",
        access::access_specifier(index, cursor),
        CxxAccessSpecifier::Invalid,
    )
}

pub fn template_cursor_kind(index: &Index, cursor: Cursor) -> CursorKind {
    flatten(
        "template_cursor_kind",
        dispatch::template_cursor_kind(index, cursor),
        CursorKind::NoDeclFound,
    )
}

pub fn specialized_cursor_template(index: &Index, cursor: Cursor) -> Cursor {
    flatten_opt(
        "specialized_template",
        dispatch::specialized_template(index, cursor),
        Cursor::null(),
    )
}

pub fn semantic_parent(index: &Index, cursor: Cursor) -> Cursor {
    flatten_opt(
        "semantic_parent",
        dispatch::semantic_parent(index, cursor),
        Cursor::null(),
    )
}

pub fn num_template_arguments(index: &Index, cursor: Cursor) -> u32 {
    flatten_opt(
        "num_template_arguments",
        template::num_template_arguments(index, cursor),
        UNKNOWN_COUNT,
    )
}

pub fn template_argument(index: &Index, cursor: Cursor, position: u32) -> Cursor {
    flatten_opt(
        "template_argument",
        template::template_argument(index, cursor, position),
        Cursor::null(),
    )
}

pub fn num_template_parameters(index: &Index, cursor: Cursor) -> u32 {
    flatten_opt(
        "num_template_parameters",
        template::num_template_parameters(index, cursor),
        UNKNOWN_COUNT,
    )
}

pub fn template_parameter(index: &Index, cursor: Cursor, position: u32) -> Cursor {
    flatten_opt(
        "template_parameter",
        template::template_parameter(index, cursor, position),
        Cursor::null(),
    )
}

pub fn template_argument_kind(cursor: Cursor) -> TemplateArgumentKind {
    template::template_argument_kind(cursor).unwrap_or(TemplateArgumentKind::Invalid)
}

pub fn template_argument_type(index: &Index, cursor: Cursor) -> TypeHandle {
    flatten_opt(
        "as_type",
        template::as_type(index, cursor),
        TypeHandle::Invalid,
    )
}

pub fn template_argument_value(index: &Index, cursor: Cursor) -> i64 {
    flatten_opt(
        "as_integral",
        template::as_integral(index, cursor),
        NOT_INTEGRAL,
    )
}

pub fn template_argument_declaration(index: &Index, cursor: Cursor) -> Cursor {
    flatten_opt(
        "as_declaration",
        template::as_declaration(index, cursor),
        Cursor::null(),
    )
}

pub fn template_argument_template(index: &Index, cursor: Cursor) -> Cursor {
    flatten_opt(
        "as_template",
        template::as_template(index, cursor),
        Cursor::null(),
    )
}

pub fn template_argument_expression(index: &Index, cursor: Cursor) -> Cursor {
    flatten_opt(
        "as_expression",
        template::as_expression(index, cursor),
        Cursor::null(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::decl_cursor;
    use cxcursor_ast::{CppType, Decl, DeclKind, UnitBuilder};

    #[test]
    fn test_sentinels_for_ordinary_declaration() {
        let mut b = UnitBuilder::new("abi.cpp");
        let int = b.add_type(CppType::int());
        let var = b.add_decl(Decl::new("x", DeclKind::Var(cxcursor_ast::VarDecl::new(int))));
        let mut index = Index::new();
        let unit = index.add(b).unwrap();
        let c = decl_cursor(&index, unit, var).unwrap();

        assert_eq!(num_template_arguments(&index, c), UNKNOWN_COUNT);
        assert_eq!(num_template_parameters(&index, c), UNKNOWN_COUNT);
        assert!(template_argument(&index, c, 0).is_null());
        assert!(specialized_cursor_template(&index, c).is_null());
        assert_eq!(template_cursor_kind(&index, c), CursorKind::NoDeclFound);
        assert_eq!(template_argument_kind(c), TemplateArgumentKind::Invalid);
        assert_eq!(template_argument_value(&index, c), NOT_INTEGRAL);
        assert_eq!(template_argument_type(&index, c), TypeHandle::Invalid);
        assert!(!is_virtual_base(&index, c));
    }

    #[test]
    fn test_stale_unit_flattens_to_sentinels() {
        let mut b = UnitBuilder::new("stale.cpp");
        let ns = b.add_decl(Decl::new("ns", DeclKind::Namespace));
        let mut index = Index::new();
        let unit = index.add(b).unwrap();
        let c = decl_cursor(&index, unit, ns).unwrap();
        index.dispose(unit).unwrap();

        assert!(semantic_parent(&index, c).is_null());
        assert_eq!(num_template_arguments(&index, c), UNKNOWN_COUNT);
        assert_eq!(cxx_access_specifier(&index, c), CxxAccessSpecifier::Invalid);
    }
}
