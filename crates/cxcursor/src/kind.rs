//! The kind taxonomy.

use std::fmt;

use cxcursor_ast::{
    ArgKind, Decl, DeclKind, Expr, ExprKind, FunctionFlavor, TagKind, TemplateFlavor,
};

/// What a cursor denotes. Decides which operations are legal on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    // Declarations
    StructDecl,
    UnionDecl,
    ClassDecl,
    EnumDecl,
    FieldDecl,
    EnumConstantDecl,
    FunctionDecl,
    VarDecl,
    ParmDecl,
    TypedefDecl,
    CXXMethod,
    Namespace,
    Constructor,
    Destructor,
    ConversionFunction,
    TemplateTypeParameter,
    NonTypeTemplateParameter,
    TemplateTemplateParameter,
    FunctionTemplate,
    ClassTemplate,
    ClassTemplatePartialSpecialization,
    TypeAliasDecl,
    TypeAliasTemplateDecl,
    CXXAccessSpecifier,

    CXXBaseSpecifier,
    TemplateArgument,

    // Expressions
    UnexposedExpr,
    DeclRefExpr,
    IntegerLiteral,
    BinaryOperator,

    // Invalid
    NoDeclFound,
    /// The null cursor.
    Null,
}

impl CursorKind {
    /// Kind of the cursor that wraps `decl`.
    pub fn of_decl(decl: &Decl) -> Self {
        match &decl.kind {
            DeclKind::Namespace => CursorKind::Namespace,
            DeclKind::Record(record) if record.is_partial_specialization() => {
                CursorKind::ClassTemplatePartialSpecialization
            }
            DeclKind::Record(record) => match record.tag {
                TagKind::Class => CursorKind::ClassDecl,
                TagKind::Struct => CursorKind::StructDecl,
                TagKind::Union => CursorKind::UnionDecl,
                TagKind::Enum => CursorKind::EnumDecl,
            },
            DeclKind::Enum => CursorKind::EnumDecl,
            DeclKind::EnumConstant { .. } => CursorKind::EnumConstantDecl,
            DeclKind::Field { .. } => CursorKind::FieldDecl,
            DeclKind::Var(_) => CursorKind::VarDecl,
            DeclKind::Parm { .. } => CursorKind::ParmDecl,
            DeclKind::Function(function) => match function.flavor {
                FunctionFlavor::Free => CursorKind::FunctionDecl,
                FunctionFlavor::Method => CursorKind::CXXMethod,
                FunctionFlavor::Constructor => CursorKind::Constructor,
                FunctionFlavor::Destructor => CursorKind::Destructor,
                FunctionFlavor::Conversion => CursorKind::ConversionFunction,
            },
            DeclKind::Template(template) => match template.flavor {
                TemplateFlavor::Class => CursorKind::ClassTemplate,
                TemplateFlavor::Function => CursorKind::FunctionTemplate,
                TemplateFlavor::TypeAlias => CursorKind::TypeAliasTemplateDecl,
            },
            DeclKind::AccessSpec => CursorKind::CXXAccessSpecifier,
            DeclKind::Typedef { .. } => CursorKind::TypedefDecl,
            DeclKind::TypeAlias { .. } => CursorKind::TypeAliasDecl,
            DeclKind::TemplateTypeParm(_) => CursorKind::TemplateTypeParameter,
            DeclKind::NonTypeTemplateParm { .. } => CursorKind::NonTypeTemplateParameter,
            DeclKind::TemplateTemplateParm(_) => CursorKind::TemplateTemplateParameter,
        }
    }

    /// Kind of the cursor that wraps `expr`.
    pub fn of_expr(expr: &Expr) -> Self {
        match expr.kind {
            ExprKind::IntegerLiteral(_) => CursorKind::IntegerLiteral,
            ExprKind::DeclRef(_) => CursorKind::DeclRefExpr,
            ExprKind::BinaryOperator { .. } => CursorKind::BinaryOperator,
            ExprKind::Unexposed(_) => CursorKind::UnexposedExpr,
        }
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            CursorKind::StructDecl
                | CursorKind::UnionDecl
                | CursorKind::ClassDecl
                | CursorKind::EnumDecl
                | CursorKind::FieldDecl
                | CursorKind::EnumConstantDecl
                | CursorKind::FunctionDecl
                | CursorKind::VarDecl
                | CursorKind::ParmDecl
                | CursorKind::TypedefDecl
                | CursorKind::CXXMethod
                | CursorKind::Namespace
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction
                | CursorKind::TemplateTypeParameter
                | CursorKind::NonTypeTemplateParameter
                | CursorKind::TemplateTemplateParameter
                | CursorKind::FunctionTemplate
                | CursorKind::ClassTemplate
                | CursorKind::ClassTemplatePartialSpecialization
                | CursorKind::TypeAliasDecl
                | CursorKind::TypeAliasTemplateDecl
                | CursorKind::CXXAccessSpecifier
        )
    }

    pub fn is_expression(self) -> bool {
        matches!(
            self,
            CursorKind::UnexposedExpr
                | CursorKind::DeclRefExpr
                | CursorKind::IntegerLiteral
                | CursorKind::BinaryOperator
        )
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, CursorKind::NoDeclFound | CursorKind::Null)
    }

    /// Redeclarable templates: the kinds that own a parameter list.
    pub fn is_template(self) -> bool {
        matches!(
            self,
            CursorKind::ClassTemplate
                | CursorKind::FunctionTemplate
                | CursorKind::TypeAliasTemplateDecl
        )
    }

    pub fn spelling(self) -> &'static str {
        match self {
            CursorKind::StructDecl => "StructDecl",
            CursorKind::UnionDecl => "UnionDecl",
            CursorKind::ClassDecl => "ClassDecl",
            CursorKind::EnumDecl => "EnumDecl",
            CursorKind::FieldDecl => "FieldDecl",
            CursorKind::EnumConstantDecl => "EnumConstantDecl",
            CursorKind::FunctionDecl => "FunctionDecl",
            CursorKind::VarDecl => "VarDecl",
            CursorKind::ParmDecl => "ParmDecl",
            CursorKind::TypedefDecl => "TypedefDecl",
            CursorKind::CXXMethod => "CXXMethod",
            CursorKind::Namespace => "Namespace",
            CursorKind::Constructor => "CXXConstructor",
            CursorKind::Destructor => "CXXDestructor",
            CursorKind::ConversionFunction => "CXXConversion",
            CursorKind::TemplateTypeParameter => "TemplateTypeParameter",
            CursorKind::NonTypeTemplateParameter => "NonTypeTemplateParameter",
            CursorKind::TemplateTemplateParameter => "TemplateTemplateParameter",
            CursorKind::FunctionTemplate => "FunctionTemplate",
            CursorKind::ClassTemplate => "ClassTemplate",
            CursorKind::ClassTemplatePartialSpecialization => {
                "ClassTemplatePartialSpecialization"
            }
            CursorKind::TypeAliasDecl => "TypeAliasDecl",
            CursorKind::TypeAliasTemplateDecl => "TypeAliasTemplateDecl",
            CursorKind::CXXAccessSpecifier => "CXXAccessSpecifier",
            CursorKind::CXXBaseSpecifier => "C++ base class specifier",
            CursorKind::TemplateArgument => "TemplateArgument",
            CursorKind::UnexposedExpr => "UnexposedExpr",
            CursorKind::DeclRefExpr => "DeclRefExpr",
            CursorKind::IntegerLiteral => "IntegerLiteral",
            CursorKind::BinaryOperator => "BinaryOperator",
            CursorKind::NoDeclFound => "NoDeclFound",
            CursorKind::Null => "Null",
        }
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Category of a template argument cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateArgumentKind {
    Null,
    Type,
    Declaration,
    Integral,
    Template,
    TemplateExpansion,
    Expression,
    Pack,
    /// Not a template argument.
    Invalid,
}

impl TemplateArgumentKind {
    pub fn spelling(self) -> &'static str {
        match self {
            TemplateArgumentKind::Null => "Null",
            TemplateArgumentKind::Type => "Type",
            TemplateArgumentKind::Declaration => "Declaration",
            TemplateArgumentKind::Integral => "Integral",
            TemplateArgumentKind::Template => "Template",
            TemplateArgumentKind::TemplateExpansion => "TemplateExpansion",
            TemplateArgumentKind::Expression => "Expression",
            TemplateArgumentKind::Pack => "Pack",
            TemplateArgumentKind::Invalid => "Invalid",
        }
    }
}

impl From<ArgKind> for TemplateArgumentKind {
    fn from(kind: ArgKind) -> Self {
        match kind {
            ArgKind::Null => TemplateArgumentKind::Null,
            ArgKind::Type => TemplateArgumentKind::Type,
            ArgKind::Declaration => TemplateArgumentKind::Declaration,
            ArgKind::Integral => TemplateArgumentKind::Integral,
            ArgKind::Template => TemplateArgumentKind::Template,
            ArgKind::TemplateExpansion => TemplateArgumentKind::TemplateExpansion,
            ArgKind::Expression => TemplateArgumentKind::Expression,
            ArgKind::Pack => TemplateArgumentKind::Pack,
        }
    }
}

impl fmt::Display for TemplateArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxcursor_ast::{ClassSpecialization, RecordDecl, TemplateParm, UnitBuilder};

    #[test]
    fn test_kind_ranges_are_disjoint() {
        let kinds = [
            CursorKind::ClassDecl,
            CursorKind::CXXAccessSpecifier,
            CursorKind::CXXBaseSpecifier,
            CursorKind::TemplateArgument,
            CursorKind::IntegerLiteral,
            CursorKind::NoDeclFound,
            CursorKind::Null,
        ];
        for kind in kinds {
            let memberships = [kind.is_declaration(), kind.is_expression(), kind.is_invalid()]
                .iter()
                .filter(|&&b| b)
                .count();
            assert!(memberships <= 1, "{kind} belongs to {memberships} ranges");
        }
        assert!(!CursorKind::CXXBaseSpecifier.is_declaration());
        assert!(!CursorKind::TemplateArgument.is_declaration());
        assert!(CursorKind::CXXAccessSpecifier.is_declaration());
    }

    #[test]
    fn test_partial_specialization_kind_wins_over_tag() {
        let mut record = RecordDecl::new(TagKind::Struct);
        record.specialization = Some(ClassSpecialization::Partial {
            template: UnitBuilder::new("kinds.cpp").next_decl_id(),
            params: Vec::new(),
            args: Vec::new(),
        });
        let decl = Decl::new("Pair", DeclKind::Record(record));
        assert_eq!(
            CursorKind::of_decl(&decl),
            CursorKind::ClassTemplatePartialSpecialization
        );

        let plain = Decl::new("Pair", DeclKind::Record(RecordDecl::new(TagKind::Union)));
        assert_eq!(CursorKind::of_decl(&plain), CursorKind::UnionDecl);
    }

    #[test]
    fn test_template_parameter_kinds() {
        let decl = Decl::new("T", DeclKind::TemplateTypeParm(TemplateParm::default()));
        assert_eq!(CursorKind::of_decl(&decl), CursorKind::TemplateTypeParameter);
        assert!(CursorKind::TemplateTypeParameter.is_declaration());
        assert!(!CursorKind::TemplateTypeParameter.is_template());
    }

    #[test]
    fn test_argument_kind_spelling() {
        assert_eq!(TemplateArgumentKind::from(ArgKind::Integral).spelling(), "Integral");
        assert_eq!(TemplateArgumentKind::Invalid.to_string(), "Invalid");
    }
}
