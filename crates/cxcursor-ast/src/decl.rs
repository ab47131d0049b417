//! Declarations, base specifiers and the template relationships between them.
//!
//! The declaration hierarchy is a closed enum. Relationship accessors on the
//! concrete declaration structs mirror the questions a C++ front end can
//! answer about a declaration ("which template was this specialized from?",
//! "which member was this instantiated from?") and are the only way the
//! cursor layer looks at them.

use smol_str::SmolStr;

use crate::ids::{BaseId, DeclId, TypeId};
use crate::template::TemplateArgument;

/// Access level recorded on a declaration or base specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
    /// No access applies (namespace-scope declarations).
    #[default]
    None,
}

/// Tag keyword of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Class,
    Struct,
    Union,
    /// Only reachable on malformed input: enums cannot be specialized.
    Enum,
}

/// A declaration in a translation unit.
#[derive(Debug, Clone)]
pub struct Decl {
    pub name: SmolStr,
    pub access: AccessSpecifier,
    /// Semantic parent (enclosing record, template or namespace).
    pub parent: Option<DeclId>,
    pub kind: DeclKind,
}

impl Decl {
    pub fn new(name: impl Into<SmolStr>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            access: AccessSpecifier::None,
            parent: None,
            kind,
        }
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_parent(mut self, parent: DeclId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn access(&self) -> AccessSpecifier {
        self.access
    }

    pub fn as_record(&self) -> Option<&RecordDecl> {
        match &self.kind {
            DeclKind::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&TemplateDecl> {
        match &self.kind {
            DeclKind::Template(template) => Some(template),
            _ => None,
        }
    }
}

/// Kinds of declarations the store knows about.
#[derive(Debug, Clone)]
pub enum DeclKind {
    Namespace,
    /// Class, struct or union, including class template specializations.
    Record(RecordDecl),
    Enum,
    EnumConstant { value: i128 },
    Field { ty: TypeId },
    Var(VarDecl),
    Parm { ty: TypeId },
    /// Free functions and member functions of every flavor.
    Function(FunctionDecl),
    /// Class, function and alias templates.
    Template(TemplateDecl),
    /// A `public:` / `protected:` / `private:` label inside a record.
    AccessSpec,
    Typedef { underlying: TypeId },
    TypeAlias { underlying: TypeId },
    TemplateTypeParm(TemplateParm),
    NonTypeTemplateParm { ty: TypeId, parm: TemplateParm },
    TemplateTemplateParm(TemplateParm),
}

/// Position of a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateParm {
    pub depth: u32,
    pub index: u32,
    pub is_pack: bool,
}

/// A record declaration.
#[derive(Debug, Clone)]
pub struct RecordDecl {
    pub tag: TagKind,
    pub bases: Vec<BaseId>,
    /// Member class of a class template this record was instantiated from.
    pub instantiated_from_member: Option<DeclId>,
    pub specialization: Option<ClassSpecialization>,
}

impl RecordDecl {
    pub fn new(tag: TagKind) -> Self {
        Self {
            tag,
            bases: Vec::new(),
            instantiated_from_member: None,
            specialization: None,
        }
    }

    pub fn is_partial_specialization(&self) -> bool {
        matches!(self.specialization, Some(ClassSpecialization::Partial { .. }))
    }

    /// The class template a partial specialization specializes.
    pub fn partial_specialized_template(&self) -> Option<DeclId> {
        match &self.specialization {
            Some(ClassSpecialization::Partial { template, .. }) => Some(*template),
            _ => None,
        }
    }

    /// For a full specialization, the primary template or the partial
    /// specialization it was instantiated from.
    pub fn specialized_template_or_partial(&self) -> Option<SpecializedFrom> {
        match &self.specialization {
            Some(ClassSpecialization::Full { from, .. }) => Some(*from),
            _ => None,
        }
    }

    pub fn instantiated_from_member_class(&self) -> Option<DeclId> {
        self.instantiated_from_member
    }

    /// Arguments of a full or partial specialization.
    pub fn template_args(&self) -> Option<&[TemplateArgument]> {
        match &self.specialization {
            Some(ClassSpecialization::Full { args, .. })
            | Some(ClassSpecialization::Partial { args, .. }) => Some(args),
            None => None,
        }
    }

    /// Parameters declared by a partial specialization.
    pub fn template_params(&self) -> Option<&[DeclId]> {
        match &self.specialization {
            Some(ClassSpecialization::Partial { params, .. }) => Some(params),
            _ => None,
        }
    }
}

/// How a record relates to a class template.
#[derive(Debug, Clone)]
pub enum ClassSpecialization {
    /// `template<> class Box<int>` or an implicit instantiation.
    Full {
        from: SpecializedFrom,
        args: Vec<TemplateArgument>,
    },
    /// `template<typename T> class Box<T*>`.
    Partial {
        template: DeclId,
        params: Vec<DeclId>,
        args: Vec<TemplateArgument>,
    },
}

/// What a full class template specialization was instantiated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializedFrom {
    Primary(DeclId),
    Partial(DeclId),
}

impl SpecializedFrom {
    pub fn decl(self) -> DeclId {
        match self {
            SpecializedFrom::Primary(id) | SpecializedFrom::Partial(id) => id,
        }
    }
}

/// A variable declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: TypeId,
    pub is_static_data_member: bool,
    pub instantiated_from: Option<DeclId>,
}

impl VarDecl {
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            is_static_data_member: false,
            instantiated_from: None,
        }
    }

    /// Only static data members of class templates carry this link.
    pub fn instantiated_from_static_data_member(&self) -> Option<DeclId> {
        if self.is_static_data_member {
            self.instantiated_from
        } else {
            None
        }
    }
}

/// Flavor of a function declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionFlavor {
    Free,
    Method,
    Constructor,
    Destructor,
    Conversion,
}

/// A function declaration.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub flavor: FunctionFlavor,
    pub return_type: TypeId,
    pub params: Vec<DeclId>,
    pub templated: TemplatedKind,
}

impl FunctionDecl {
    pub fn new(flavor: FunctionFlavor, return_type: TypeId) -> Self {
        Self {
            flavor,
            return_type,
            params: Vec::new(),
            templated: TemplatedKind::NonTemplate,
        }
    }

    /// The function template this is a specialization of.
    pub fn primary_template(&self) -> Option<DeclId> {
        match &self.templated {
            TemplatedKind::Specialization { primary, .. } => Some(*primary),
            _ => None,
        }
    }

    /// The member function of a class template this was instantiated from.
    pub fn instantiated_from_member_function(&self) -> Option<DeclId> {
        match &self.templated {
            TemplatedKind::MemberSpecialization { from, .. } => Some(*from),
            _ => None,
        }
    }

    pub fn template_specialization_args(&self) -> Option<&[TemplateArgument]> {
        match &self.templated {
            TemplatedKind::MemberSpecialization { args, .. }
            | TemplatedKind::Specialization { args, .. }
            | TemplatedKind::DependentSpecialization { args, .. } => Some(args),
            TemplatedKind::NonTemplate | TemplatedKind::Pattern { .. } => None,
        }
    }
}

/// How a function takes part in templates.
#[derive(Debug, Clone)]
pub enum TemplatedKind {
    NonTemplate,
    /// The pattern declaration of a function template.
    Pattern { template: DeclId },
    /// A member function of a class template specialization.
    MemberSpecialization {
        from: DeclId,
        args: Vec<TemplateArgument>,
    },
    /// A specialization of a function template.
    Specialization {
        primary: DeclId,
        args: Vec<TemplateArgument>,
    },
    /// A specialization whose template is still dependent (friend
    /// specializations inside templates).
    DependentSpecialization {
        candidates: Vec<DeclId>,
        args: Vec<TemplateArgument>,
    },
}

/// Flavor of a redeclarable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFlavor {
    Class,
    Function,
    TypeAlias,
}

/// A class, function or alias template.
#[derive(Debug, Clone)]
pub struct TemplateDecl {
    pub flavor: TemplateFlavor,
    /// The underlying (pattern) declaration.
    pub templated: DeclId,
    pub params: Vec<DeclId>,
    pub instantiated_from_member: Option<DeclId>,
}

impl TemplateDecl {
    pub fn new(flavor: TemplateFlavor, templated: DeclId, params: Vec<DeclId>) -> Self {
        Self {
            flavor,
            templated,
            params,
            instantiated_from_member: None,
        }
    }

    pub fn templated_decl(&self) -> DeclId {
        self.templated
    }

    pub fn instantiated_from_member_template(&self) -> Option<DeclId> {
        self.instantiated_from_member
    }

    pub fn template_params(&self) -> &[DeclId] {
        &self.params
    }
}

/// A base-class specifier (`public virtual Base`).
#[derive(Debug, Clone)]
pub struct BaseSpecifier {
    pub ty: TypeId,
    pub access: AccessSpecifier,
    pub is_virtual: bool,
    /// The derived record this specifier belongs to.
    pub owner: DeclId,
}

impl BaseSpecifier {
    pub fn access(&self) -> AccessSpecifier {
        self.access
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }
}
