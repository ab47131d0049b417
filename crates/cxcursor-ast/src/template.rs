//! Template arguments.

use crate::ids::{DeclId, ExprId, TypeId};

/// A template argument as stored on a specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArgument {
    /// An empty argument (not yet deduced).
    Null,
    Type(TypeId),
    /// A declaration bound to a non-type parameter (`&global`).
    Declaration(DeclId),
    /// An integral constant. Kept at full width; consumers narrow it.
    Integral { value: i128, ty: TypeId },
    /// A template bound to a template template parameter.
    Template(DeclId),
    /// A pack expansion of a template template parameter (`Tmpl...`).
    TemplateExpansion(DeclId),
    /// A value-dependent expression.
    Expression(ExprId),
    Pack(Vec<TemplateArgument>),
}

/// The argument category, as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Null,
    Type,
    Declaration,
    Integral,
    Template,
    TemplateExpansion,
    Expression,
    Pack,
}

impl TemplateArgument {
    pub fn kind(&self) -> ArgKind {
        match self {
            TemplateArgument::Null => ArgKind::Null,
            TemplateArgument::Type(_) => ArgKind::Type,
            TemplateArgument::Declaration(_) => ArgKind::Declaration,
            TemplateArgument::Integral { .. } => ArgKind::Integral,
            TemplateArgument::Template(_) => ArgKind::Template,
            TemplateArgument::TemplateExpansion(_) => ArgKind::TemplateExpansion,
            TemplateArgument::Expression(_) => ArgKind::Expression,
            TemplateArgument::Pack(_) => ArgKind::Pack,
        }
    }

    pub fn as_type(&self) -> Option<TypeId> {
        match self {
            TemplateArgument::Type(ty) => Some(*ty),
            _ => None,
        }
    }

    pub fn as_integral(&self) -> Option<i128> {
        match self {
            TemplateArgument::Integral { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The template named by a template or template-expansion argument.
    pub fn as_template_or_pattern(&self) -> Option<DeclId> {
        match self {
            TemplateArgument::Template(id) | TemplateArgument::TemplateExpansion(id) => Some(*id),
            _ => None,
        }
    }

    pub fn pack_elements(&self) -> &[TemplateArgument] {
        match self {
            TemplateArgument::Pack(elements) => elements,
            _ => &[],
        }
    }
}
