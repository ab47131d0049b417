//! The cursor handle.
//!
//! A [`Cursor`] is a small `Copy` value naming one entity of one translation
//! unit. Its representation is private: cursors are only created by the wrap
//! constructors below (or by accessors that derive new cursors), so the kind
//! always matches the entity it was built from and can never change.

use std::fmt;

use cxcursor_ast::{BaseId, DeclId, ExprId, Index, TranslationUnit, TypeId, UnitId};

use crate::error::{CursorError, Result};
use crate::kind::{CursorKind, TemplateArgumentKind};

/// A kind-tagged, copyable reference to an AST entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Null,
    Decl {
        kind: CursorKind,
        unit: UnitId,
        decl: DeclId,
    },
    BaseSpecifier {
        unit: UnitId,
        base: BaseId,
    },
    TemplateArgument {
        unit: UnitId,
        /// The specialization owning the argument list.
        owner: DeclId,
        index: u32,
        arg_kind: TemplateArgumentKind,
    },
    Expression {
        kind: CursorKind,
        unit: UnitId,
        expr: ExprId,
        parent: ParentLink,
    },
}

/// Where an expression cursor hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentLink {
    Decl(DeclId),
    /// The AST does not record the parent. Template argument expressions
    /// always end up here; the parent is never guessed.
    Unknown,
}

/// A reference to a type, or the invalid type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    Invalid,
    Valid { unit: UnitId, ty: TypeId },
}

impl TypeHandle {
    pub fn unit(self) -> Option<UnitId> {
        match self {
            TypeHandle::Valid { unit, .. } => Some(unit),
            TypeHandle::Invalid => None,
        }
    }

    pub fn id(self) -> Option<TypeId> {
        match self {
            TypeHandle::Valid { ty, .. } => Some(ty),
            TypeHandle::Invalid => None,
        }
    }
}

impl Cursor {
    /// The null cursor: no entity.
    pub const fn null() -> Self {
        Cursor(Repr::Null)
    }

    /// Wrap a declaration of `unit`. Unknown ids give the null cursor.
    pub fn from_decl(unit: &TranslationUnit, decl: DeclId) -> Self {
        match unit.decl(decl) {
            Some(node) => Cursor(Repr::Decl {
                kind: CursorKind::of_decl(node),
                unit: unit.id(),
                decl,
            }),
            None => Cursor::null(),
        }
    }

    /// Wrap a base specifier of `unit`. Unknown ids give the null cursor.
    pub fn from_base(unit: &TranslationUnit, base: BaseId) -> Self {
        match unit.base(base) {
            Some(_) => Cursor(Repr::BaseSpecifier {
                unit: unit.id(),
                base,
            }),
            None => Cursor::null(),
        }
    }

    /// Wrap an expression of `unit`. Unknown ids give the null cursor.
    pub fn from_expr(unit: &TranslationUnit, expr: ExprId, parent: ParentLink) -> Self {
        match unit.expr(expr) {
            Some(node) => Cursor(Repr::Expression {
                kind: CursorKind::of_expr(node),
                unit: unit.id(),
                expr,
                parent,
            }),
            None => Cursor::null(),
        }
    }

    pub(crate) fn template_argument(
        unit: UnitId,
        owner: DeclId,
        index: u32,
        arg_kind: TemplateArgumentKind,
    ) -> Self {
        Cursor(Repr::TemplateArgument {
            unit,
            owner,
            index,
            arg_kind,
        })
    }

    pub fn kind(&self) -> CursorKind {
        match self.0 {
            Repr::Null => CursorKind::Null,
            Repr::Decl { kind, .. } | Repr::Expression { kind, .. } => kind,
            Repr::BaseSpecifier { .. } => CursorKind::CXXBaseSpecifier,
            Repr::TemplateArgument { .. } => CursorKind::TemplateArgument,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.0, Repr::Null)
    }

    /// The translation unit this cursor points into.
    pub fn unit(&self) -> Option<UnitId> {
        match self.0 {
            Repr::Null => None,
            Repr::Decl { unit, .. }
            | Repr::BaseSpecifier { unit, .. }
            | Repr::TemplateArgument { unit, .. }
            | Repr::Expression { unit, .. } => Some(unit),
        }
    }

    pub fn as_decl(&self) -> Option<DeclId> {
        match self.0 {
            Repr::Decl { decl, .. } => Some(decl),
            _ => None,
        }
    }

    pub fn as_base(&self) -> Option<BaseId> {
        match self.0 {
            Repr::BaseSpecifier { base, .. } => Some(base),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<ExprId> {
        match self.0 {
            Repr::Expression { expr, .. } => Some(expr),
            _ => None,
        }
    }

    /// The owning specialization and position of a template argument.
    pub fn as_template_argument(&self) -> Option<(DeclId, u32)> {
        match self.0 {
            Repr::TemplateArgument { owner, index, .. } => Some((owner, index)),
            _ => None,
        }
    }

    pub fn template_argument_kind(&self) -> Option<TemplateArgumentKind> {
        match self.0 {
            Repr::TemplateArgument { arg_kind, .. } => Some(arg_kind),
            _ => None,
        }
    }

    pub fn parent_link(&self) -> Option<ParentLink> {
        match self.0 {
            Repr::Expression { parent, .. } => Some(parent),
            _ => None,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::null()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Null => f.write_str("<null>"),
            Repr::Decl { kind, unit, decl } => write!(f, "{kind} {decl} in {unit}"),
            Repr::BaseSpecifier { unit, base } => write!(f, "CXXBaseSpecifier {base} in {unit}"),
            Repr::TemplateArgument {
                unit,
                owner,
                index,
                arg_kind,
            } => write!(f, "TemplateArgument {owner}[{index}] ({arg_kind}) in {unit}"),
            Repr::Expression { kind, unit, expr, .. } => write!(f, "{kind} {expr} in {unit}"),
        }
    }
}

/// Resolve the unit a cursor points into, detecting teardown.
pub(crate) fn resolve_unit(index: &Index, unit: UnitId) -> Result<&TranslationUnit> {
    index.unit(unit).map_err(|_| CursorError::StaleUnit(unit))
}

/// Wrap a declaration, checking that its unit is still alive.
pub fn decl_cursor(index: &Index, unit: UnitId, decl: DeclId) -> Result<Cursor> {
    Ok(Cursor::from_decl(resolve_unit(index, unit)?, decl))
}

/// Wrap a base specifier, checking that its unit is still alive.
pub fn base_cursor(index: &Index, unit: UnitId, base: BaseId) -> Result<Cursor> {
    Ok(Cursor::from_base(resolve_unit(index, unit)?, base))
}

/// Cursors for the base specifiers of a record, in declaration order.
pub fn base_cursors(index: &Index, record: Cursor) -> Result<Vec<Cursor>> {
    let (Some(unit), Some(decl)) = (record.unit(), record.as_decl()) else {
        return Ok(Vec::new());
    };
    let unit = resolve_unit(index, unit)?;
    Ok(unit
        .bases_of(decl)
        .iter()
        .map(|&base| Cursor::from_base(unit, base))
        .collect())
}
