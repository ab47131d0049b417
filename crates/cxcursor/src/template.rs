//! Template introspection: classification, argument and parameter lists,
//! and the typed extractors on template argument cursors.

use cxcursor_ast::{Decl, DeclId, DeclKind, Index, TemplateArgument, TemplatedKind};
use tracing::trace;

use crate::cursor::{resolve_unit, Cursor, ParentLink, TypeHandle};
use crate::dispatch::{decode_argument, decode_decl};
use crate::error::Result;
use crate::kind::{CursorKind, TemplateArgumentKind};

/// How a declaration takes part in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateClass {
    /// Not a templated entity at all.
    Ordinary,
    /// A class, function or alias template.
    PrimaryTemplate,
    /// A full class template specialization or instantiation.
    ClassSpecialization,
    ClassPartialSpecialization,
    FunctionSpecialization(FunctionSpecializationKind),
    /// A function that is neither a specialization nor a member of one.
    NonTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionSpecializationKind {
    /// Member function of a class template specialization.
    Member,
    /// Specialization whose primary template is still dependent.
    Dependent,
    /// Specialization of a function template.
    Template,
}

impl TemplateClass {
    /// Whether declarations of this class carry a template argument list.
    pub fn has_arguments(self) -> bool {
        matches!(
            self,
            TemplateClass::ClassSpecialization
                | TemplateClass::ClassPartialSpecialization
                | TemplateClass::FunctionSpecialization(_)
        )
    }

    /// Whether declarations of this class carry a template parameter list.
    pub fn has_parameters(self) -> bool {
        matches!(
            self,
            TemplateClass::PrimaryTemplate | TemplateClass::ClassPartialSpecialization
        )
    }
}

pub(crate) fn classify_decl(decl: &Decl) -> TemplateClass {
    match &decl.kind {
        DeclKind::Template(_) => TemplateClass::PrimaryTemplate,
        DeclKind::Record(record) if record.is_partial_specialization() => {
            TemplateClass::ClassPartialSpecialization
        }
        DeclKind::Record(record) if record.specialization.is_some() => {
            TemplateClass::ClassSpecialization
        }
        DeclKind::Function(function) => match function.templated {
            TemplatedKind::NonTemplate | TemplatedKind::Pattern { .. } => {
                TemplateClass::NonTemplate
            }
            TemplatedKind::MemberSpecialization { .. } => {
                TemplateClass::FunctionSpecialization(FunctionSpecializationKind::Member)
            }
            TemplatedKind::Specialization { .. } => {
                TemplateClass::FunctionSpecialization(FunctionSpecializationKind::Template)
            }
            TemplatedKind::DependentSpecialization { .. } => {
                TemplateClass::FunctionSpecialization(FunctionSpecializationKind::Dependent)
            }
        },
        _ => TemplateClass::Ordinary,
    }
}

/// The argument list a declaration owns, if its classification has one.
pub(crate) fn template_arguments_of(decl: &Decl) -> Option<&[TemplateArgument]> {
    match &decl.kind {
        DeclKind::Record(record) => record.template_args(),
        DeclKind::Function(function) => function.template_specialization_args(),
        _ => None,
    }
}

/// The parameter list a declaration owns, if its classification has one.
pub(crate) fn template_parameters_of(decl: &Decl) -> Option<&[DeclId]> {
    match &decl.kind {
        DeclKind::Template(template) => Some(template.template_params()),
        DeclKind::Record(record) => record.template_params(),
        _ => None,
    }
}

/// Classify the declaration behind a cursor. Non-declarations are
/// [`TemplateClass::Ordinary`].
pub fn classify(index: &Index, cursor: Cursor) -> Result<TemplateClass> {
    Ok(decode_decl(index, cursor, "classify")?
        .map(|decl| classify_decl(decl.decl))
        .unwrap_or(TemplateClass::Ordinary))
}

/// Number of template arguments, or `None` when the declaration has no
/// argument list.
pub fn num_template_arguments(index: &Index, cursor: Cursor) -> Result<Option<u32>> {
    if !cursor.kind().is_declaration() {
        trace!(op = "num_template_arguments", kind = %cursor.kind(), "not a declaration cursor");
        return Ok(None);
    }
    Ok(decode_decl(index, cursor, "num_template_arguments")?
        .and_then(|decl| template_arguments_of(decl.decl))
        .map(|args| args.len() as u32))
}

/// The `position`-th template argument as a template argument cursor.
///
/// # Panics
///
/// In debug builds, if `position` is not below the argument count.
pub fn template_argument(index: &Index, cursor: Cursor, position: u32) -> Result<Option<Cursor>> {
    if !cursor.kind().is_declaration() {
        trace!(op = "template_argument", kind = %cursor.kind(), "not a declaration cursor");
        return Ok(None);
    }
    let Some(decl) = decode_decl(index, cursor, "template_argument")? else {
        return Ok(None);
    };
    let Some(args) = template_arguments_of(decl.decl) else {
        return Ok(None);
    };
    debug_assert!(
        (position as usize) < args.len(),
        "template argument {position} out of range for {} arguments",
        args.len()
    );
    Ok(args.get(position as usize).map(|arg| {
        Cursor::template_argument(
            decl.unit.id(),
            decl.id,
            position,
            TemplateArgumentKind::from(arg.kind()),
        )
    }))
}

/// Number of template parameters, or `None` when the declaration has no
/// parameter list.
pub fn num_template_parameters(index: &Index, cursor: Cursor) -> Result<Option<u32>> {
    if !cursor.kind().is_template()
        && cursor.kind() != CursorKind::ClassTemplatePartialSpecialization
    {
        trace!(op = "num_template_parameters", kind = %cursor.kind(), "not a template cursor");
        return Ok(None);
    }
    Ok(decode_decl(index, cursor, "num_template_parameters")?
        .and_then(|decl| template_parameters_of(decl.decl))
        .map(|params| params.len() as u32))
}

/// The `position`-th template parameter declaration.
///
/// # Panics
///
/// In debug builds, if `position` is not below the parameter count.
pub fn template_parameter(index: &Index, cursor: Cursor, position: u32) -> Result<Option<Cursor>> {
    if !cursor.kind().is_template()
        && cursor.kind() != CursorKind::ClassTemplatePartialSpecialization
    {
        trace!(op = "template_parameter", kind = %cursor.kind(), "not a template cursor");
        return Ok(None);
    }
    let Some(decl) = decode_decl(index, cursor, "template_parameter")? else {
        return Ok(None);
    };
    let Some(params) = template_parameters_of(decl.decl) else {
        return Ok(None);
    };
    debug_assert!(
        (position as usize) < params.len(),
        "template parameter {position} out of range for {} parameters",
        params.len()
    );
    Ok(params
        .get(position as usize)
        .map(|&param| Cursor::from_decl(decl.unit, param))
        .filter(|cursor| !cursor.is_null()))
}

pub fn is_template_argument(cursor: Cursor) -> bool {
    cursor.kind() == CursorKind::TemplateArgument
}

/// The kind recorded on a template argument cursor.
pub fn template_argument_kind(cursor: Cursor) -> Option<TemplateArgumentKind> {
    cursor.template_argument_kind()
}

/// The type of a type argument.
pub fn as_type(index: &Index, cursor: Cursor) -> Result<Option<TypeHandle>> {
    if cursor.template_argument_kind() != Some(TemplateArgumentKind::Type) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "as_type")?.and_then(|arg| {
        arg.arg.as_type().map(|ty| TypeHandle::Valid {
            unit: arg.unit.id(),
            ty,
        })
    }))
}

/// The value of an integral argument, truncated to 64 bits.
pub fn as_integral(index: &Index, cursor: Cursor) -> Result<Option<i64>> {
    if cursor.template_argument_kind() != Some(TemplateArgumentKind::Integral) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "as_integral")?
        .and_then(|arg| arg.arg.as_integral())
        .map(|value| value as i64))
}

/// The declaration bound by a declaration argument.
pub fn as_declaration(index: &Index, cursor: Cursor) -> Result<Option<Cursor>> {
    if cursor.template_argument_kind() != Some(TemplateArgumentKind::Declaration) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "as_declaration")?.and_then(|arg| match arg.arg {
        TemplateArgument::Declaration(decl) => {
            Some(Cursor::from_decl(arg.unit, *decl)).filter(|cursor| !cursor.is_null())
        }
        _ => None,
    }))
}

/// The template named by a template or template-expansion argument.
pub fn as_template(index: &Index, cursor: Cursor) -> Result<Option<Cursor>> {
    if !matches!(
        cursor.template_argument_kind(),
        Some(TemplateArgumentKind::Template | TemplateArgumentKind::TemplateExpansion)
    ) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "as_template")?.and_then(|arg| {
        arg.arg
            .as_template_or_pattern()
            .map(|decl| Cursor::from_decl(arg.unit, decl))
            .filter(|cursor| !cursor.is_null())
    }))
}

/// The expression of an expression argument.
///
/// The returned cursor's parent is [`ParentLink::Unknown`]: arguments do not
/// record where their expression hangs in the tree.
pub fn as_expression(index: &Index, cursor: Cursor) -> Result<Option<Cursor>> {
    if cursor.template_argument_kind() != Some(TemplateArgumentKind::Expression) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "as_expression")?.and_then(|arg| match arg.arg {
        TemplateArgument::Expression(expr) => {
            Some(Cursor::from_expr(arg.unit, *expr, ParentLink::Unknown))
                .filter(|cursor| !cursor.is_null())
        }
        _ => None,
    }))
}

/// Number of elements of a pack argument.
pub fn pack_size(index: &Index, cursor: Cursor) -> Result<Option<u32>> {
    if cursor.template_argument_kind() != Some(TemplateArgumentKind::Pack) {
        return Ok(None);
    }
    Ok(decode_argument(index, cursor, "pack_size")?
        .map(|arg| arg.arg.pack_elements().len() as u32))
}

/// Spelling of a type handle.
pub fn type_spelling(index: &Index, ty: TypeHandle) -> Result<Option<String>> {
    let TypeHandle::Valid { unit, ty } = ty else {
        return Ok(None);
    };
    Ok(resolve_unit(index, unit)?.ty(ty).map(|ty| ty.spelling()))
}
