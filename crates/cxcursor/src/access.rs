//! Access specifiers.

use std::fmt;

use cxcursor_ast::{AccessSpecifier, Index};
use tracing::trace;

use crate::cursor::Cursor;
use crate::dispatch::{decode_base, decode_decl};
use crate::error::Result;
use crate::kind::CursorKind;

/// Access as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CxxAccessSpecifier {
    #[default]
    Invalid,
    Public,
    Protected,
    Private,
}

impl From<AccessSpecifier> for CxxAccessSpecifier {
    fn from(access: AccessSpecifier) -> Self {
        match access {
            AccessSpecifier::Public => CxxAccessSpecifier::Public,
            AccessSpecifier::Protected => CxxAccessSpecifier::Protected,
            AccessSpecifier::Private => CxxAccessSpecifier::Private,
            AccessSpecifier::None => CxxAccessSpecifier::Invalid,
        }
    }
}

impl CxxAccessSpecifier {
    pub fn spelling(self) -> &'static str {
        match self {
            CxxAccessSpecifier::Invalid => "invalid",
            CxxAccessSpecifier::Public => "public",
            CxxAccessSpecifier::Protected => "protected",
            CxxAccessSpecifier::Private => "private",
        }
    }
}

impl fmt::Display for CxxAccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Whether declarations of `kind` carry an access specifier.
fn carries_access(kind: CursorKind) -> bool {
    matches!(
        kind,
        CursorKind::ClassDecl
            | CursorKind::StructDecl
            | CursorKind::UnionDecl
            | CursorKind::CXXMethod
            // Constructors, destructors and conversions are methods with
            // their own cursor kinds; unions are records.
            | CursorKind::Constructor
            | CursorKind::Destructor
            | CursorKind::ConversionFunction
            | CursorKind::FieldDecl
            | CursorKind::VarDecl
            | CursorKind::EnumDecl
            | CursorKind::EnumConstantDecl
            | CursorKind::ClassTemplate
            | CursorKind::FunctionTemplate
            | CursorKind::ClassTemplatePartialSpecialization
            | CursorKind::CXXAccessSpecifier
    )
}

/// Access of a member declaration or base specifier.
///
/// Base specifiers report the access written on the specifier, which is
/// independent of the access of the base class declaration itself.
/// Namespace-scope declarations and kinds that never carry access report
/// [`CxxAccessSpecifier::Invalid`].
pub fn access_specifier(index: &Index, cursor: Cursor) -> Result<CxxAccessSpecifier> {
    let kind = cursor.kind();
    if kind == CursorKind::CXXBaseSpecifier {
        return Ok(decode_base(index, cursor, "access_specifier")?
            .map(|base| base.access().into())
            .unwrap_or_default());
    }
    if !carries_access(kind) {
        trace!(op = "access_specifier", %kind, "kind carries no access");
        return Ok(CxxAccessSpecifier::Invalid);
    }
    Ok(decode_decl(index, cursor, "access_specifier")?
        .map(|decl| decl.decl.access().into())
        .unwrap_or_default())
}
