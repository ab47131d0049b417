//! Decoding cursors back into AST entities, and the accessors that need
//! nothing more than that.
//!
//! Every accessor checks the cursor kind before it touches the index. A
//! cursor of the wrong kind is answered with "no result" immediately and is
//! logged at trace level; only a cursor whose unit has been disposed is an
//! error.

use cxcursor_ast::{
    BaseSpecifier, Decl, DeclId, DeclKind, ExprId, ExprKind, Index, TagKind,
    TemplateArgument, TranslationUnit,
};
use tracing::trace;

use crate::cursor::{resolve_unit, Cursor, ParentLink};
use crate::error::Result;
use crate::kind::CursorKind;

/// A declaration recovered from a cursor.
pub(crate) struct DeclRef<'a> {
    pub unit: &'a TranslationUnit,
    pub id: DeclId,
    pub decl: &'a Decl,
}

/// Decode a declaration cursor. Any other kind yields `None`.
pub(crate) fn decode_decl<'a>(
    index: &'a Index,
    cursor: Cursor,
    op: &'static str,
) -> Result<Option<DeclRef<'a>>> {
    let (Some(unit), Some(id)) = (cursor.unit(), cursor.as_decl()) else {
        trace!(op, kind = %cursor.kind(), "not a declaration cursor");
        return Ok(None);
    };
    let unit = resolve_unit(index, unit)?;
    Ok(unit.decl(id).map(|decl| DeclRef { unit, id, decl }))
}

/// Decode a base specifier cursor. Any other kind yields `None`.
pub(crate) fn decode_base<'a>(
    index: &'a Index,
    cursor: Cursor,
    op: &'static str,
) -> Result<Option<&'a BaseSpecifier>> {
    let (Some(unit), Some(id)) = (cursor.unit(), cursor.as_base()) else {
        trace!(op, kind = %cursor.kind(), "not a base specifier cursor");
        return Ok(None);
    };
    Ok(resolve_unit(index, unit)?.base(id))
}

/// A template argument recovered from a cursor.
pub(crate) struct ArgRef<'a> {
    pub unit: &'a TranslationUnit,
    pub arg: &'a TemplateArgument,
}

/// Decode a template argument cursor. Any other kind yields `None`.
pub(crate) fn decode_argument<'a>(
    index: &'a Index,
    cursor: Cursor,
    op: &'static str,
) -> Result<Option<ArgRef<'a>>> {
    let (Some(unit), Some((owner, position))) = (cursor.unit(), cursor.as_template_argument())
    else {
        trace!(op, kind = %cursor.kind(), "not a template argument cursor");
        return Ok(None);
    };
    let unit = resolve_unit(index, unit)?;
    let arg = unit
        .decl(owner)
        .and_then(crate::template::template_arguments_of)
        .and_then(|args| args.get(position as usize));
    Ok(arg.map(|arg| ArgRef { unit, arg }))
}

/// Whether a base specifier names a virtual base. `false` for anything else.
pub fn is_virtual_base(index: &Index, cursor: Cursor) -> Result<bool> {
    Ok(decode_base(index, cursor, "is_virtual_base")?.is_some_and(BaseSpecifier::is_virtual))
}

/// The kind of declaration a template (or partial specialization) produces.
///
/// Class and function templates report the kind of their templated
/// declaration; partial specializations report the kind matching their tag.
/// Everything else, alias templates and the impossible enum-tagged partial
/// specialization included, reports [`CursorKind::NoDeclFound`].
pub fn template_cursor_kind(index: &Index, cursor: Cursor) -> Result<CursorKind> {
    match cursor.kind() {
        CursorKind::ClassTemplate | CursorKind::FunctionTemplate => {
            let Some(template) = decode_decl(index, cursor, "template_cursor_kind")? else {
                return Ok(CursorKind::NoDeclFound);
            };
            let kind = template
                .decl
                .as_template()
                .map(|t| Cursor::from_decl(template.unit, t.templated_decl()).kind())
                .filter(|kind| !kind.is_invalid());
            Ok(kind.unwrap_or(CursorKind::NoDeclFound))
        }
        CursorKind::ClassTemplatePartialSpecialization => {
            let Some(partial) = decode_decl(index, cursor, "template_cursor_kind")? else {
                return Ok(CursorKind::NoDeclFound);
            };
            let kind = match partial.decl.as_record().map(|record| record.tag) {
                Some(TagKind::Class) => CursorKind::ClassDecl,
                Some(TagKind::Struct) => CursorKind::StructDecl,
                Some(TagKind::Union) => CursorKind::UnionDecl,
                Some(TagKind::Enum) | None => CursorKind::NoDeclFound,
            };
            Ok(kind)
        }
        _ => Ok(CursorKind::NoDeclFound),
    }
}

/// The template a declaration was specialized or instantiated from.
///
/// - partial specialization: the class template it specializes
/// - class template specialization: its primary template, or the partial
///   specialization it was instantiated from
/// - other records: the member class it was instantiated from
/// - functions: the primary function template, else the member function
/// - static data members: the static data member they were instantiated from
/// - templates: the member template they were instantiated from
pub fn specialized_template(index: &Index, cursor: Cursor) -> Result<Option<Cursor>> {
    if !cursor.kind().is_declaration() {
        trace!(op = "specialized_template", kind = %cursor.kind(), "not a declaration cursor");
        return Ok(None);
    }
    let Some(decl) = decode_decl(index, cursor, "specialized_template")? else {
        return Ok(None);
    };

    let template = match &decl.decl.kind {
        DeclKind::Record(record) => record
            .partial_specialized_template()
            .or_else(|| record.specialized_template_or_partial().map(|from| from.decl()))
            .or_else(|| record.instantiated_from_member_class()),
        DeclKind::Function(function) => function
            .primary_template()
            .or_else(|| function.instantiated_from_member_function()),
        DeclKind::Var(var) => var.instantiated_from_static_data_member(),
        DeclKind::Template(template) => template.instantiated_from_member_template(),
        _ => None,
    };

    Ok(template
        .map(|id| Cursor::from_decl(decl.unit, id))
        .filter(|cursor| !cursor.is_null()))
}

/// The entity a cursor belongs to.
///
/// Declarations report their semantic parent, base specifiers their derived
/// record, template arguments their specialization. Expression cursors only
/// know their parent when it was recorded at wrap time.
pub fn semantic_parent(index: &Index, cursor: Cursor) -> Result<Option<Cursor>> {
    let Some(unit) = cursor.unit() else {
        return Ok(None);
    };
    let unit = resolve_unit(index, unit)?;

    let parent = if let Some(decl) = cursor.as_decl() {
        unit.decl(decl).and_then(|decl| decl.parent)
    } else if let Some(base) = cursor.as_base() {
        unit.base(base).map(|base| base.owner)
    } else if let Some((owner, _)) = cursor.as_template_argument() {
        Some(owner)
    } else {
        match cursor.parent_link() {
            Some(ParentLink::Decl(parent)) => Some(parent),
            Some(ParentLink::Unknown) | None => None,
        }
    };

    Ok(parent
        .map(|id| Cursor::from_decl(unit, id))
        .filter(|cursor| !cursor.is_null()))
}

/// Human-readable spelling of the entity behind a cursor.
pub fn spelling(index: &Index, cursor: Cursor) -> Result<Option<String>> {
    let Some(unit) = cursor.unit() else {
        return Ok(None);
    };
    let unit = resolve_unit(index, unit)?;

    if let Some(decl) = cursor.as_decl() {
        return Ok(unit.decl(decl).map(|decl| decl.name.to_string()));
    }
    if let Some(base) = cursor.as_base() {
        return Ok(unit
            .base(base)
            .and_then(|base| unit.ty(base.ty))
            .map(|ty| ty.spelling()));
    }
    if let Some(expr) = cursor.as_expr() {
        return Ok(Some(expr_spelling(unit, expr)));
    }
    Ok(decode_argument(index, cursor, "spelling")?
        .map(|arg| argument_spelling(arg.unit, arg.arg)))
}

pub(crate) fn argument_spelling(unit: &TranslationUnit, arg: &TemplateArgument) -> String {
    let decl_name = |id: DeclId| {
        unit.decl(id)
            .map(|decl| decl.name.to_string())
            .unwrap_or_default()
    };
    match arg {
        TemplateArgument::Null => String::new(),
        TemplateArgument::Type(ty) => unit.ty(*ty).map(|ty| ty.spelling()).unwrap_or_default(),
        TemplateArgument::Declaration(decl) => format!("&{}", decl_name(*decl)),
        TemplateArgument::Integral { value, .. } => value.to_string(),
        TemplateArgument::Template(decl) => decl_name(*decl),
        TemplateArgument::TemplateExpansion(decl) => format!("{}...", decl_name(*decl)),
        TemplateArgument::Expression(expr) => expr_spelling(unit, *expr),
        TemplateArgument::Pack(elements) => {
            let inner: Vec<String> = elements
                .iter()
                .map(|element| argument_spelling(unit, element))
                .collect();
            format!("<{}>", inner.join(", "))
        }
    }
}

pub(crate) fn expr_spelling(unit: &TranslationUnit, expr: ExprId) -> String {
    let Some(expr) = unit.expr(expr) else {
        return String::new();
    };
    match &expr.kind {
        ExprKind::IntegerLiteral(value) => value.to_string(),
        ExprKind::DeclRef(decl) => unit
            .decl(*decl)
            .map(|decl| decl.name.to_string())
            .unwrap_or_default(),
        ExprKind::BinaryOperator { op, lhs, rhs } => format!(
            "{} {} {}",
            expr_spelling(unit, *lhs),
            op.spelling(),
            expr_spelling(unit, *rhs)
        ),
        ExprKind::Unexposed(text) => text.to_string(),
    }
}
