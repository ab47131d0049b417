//! Translation units and their builder.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::decl::{
    AccessSpecifier, BaseSpecifier, ClassSpecialization, Decl, DeclKind, TemplatedKind,
};
use crate::error::{AstError, Result};
use crate::expr::{Expr, ExprKind};
use crate::ids::{BaseId, DeclId, ExprId, TypeId, UnitId};
use crate::template::TemplateArgument;
use crate::types::CppType;

/// A translation unit: arenas of every node parsed from one source file.
///
/// Only reachable through the [`Index`](crate::Index) that owns it.
#[derive(Debug)]
pub struct TranslationUnit {
    id: UnitId,
    name: SmolStr,
    decls: Vec<Decl>,
    bases: Vec<BaseSpecifier>,
    types: Vec<CppType>,
    exprs: Vec<Expr>,
    by_name: FxHashMap<SmolStr, Vec<DeclId>>,
}

impl TranslationUnit {
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    pub fn base(&self, id: BaseId) -> Option<&BaseSpecifier> {
        self.bases.get(id.index())
    }

    pub fn ty(&self, id: TypeId) -> Option<&CppType> {
        self.types.get(id.index())
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    /// All declarations in allocation order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> + '_ {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, decl)| (DeclId::from_index(i), decl))
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Every declaration carrying `name`, in allocation order.
    pub fn find_decls(&self, name: &str) -> &[DeclId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first declaration carrying `name`.
    pub fn find_decl(&self, name: &str) -> Option<DeclId> {
        self.find_decls(name).first().copied()
    }

    /// Base specifiers of a record, in declaration order.
    pub fn bases_of(&self, record: DeclId) -> &[BaseId] {
        self.decl(record)
            .and_then(Decl::as_record)
            .map(|record| record.bases.as_slice())
            .unwrap_or(&[])
    }
}

/// Incrementally builds a [`TranslationUnit`].
///
/// Ids handed out by the builder may be referenced before the node they
/// point at exists (templates and their patterns refer to each other); every
/// reference is checked when the unit is registered with an index.
#[derive(Debug, Default)]
pub struct UnitBuilder {
    name: SmolStr,
    decls: Vec<Decl>,
    bases: Vec<BaseSpecifier>,
    types: Vec<CppType>,
    type_ids: FxHashMap<CppType, TypeId>,
    exprs: Vec<Expr>,
}

impl UnitBuilder {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Intern a type. Structurally equal types share one id.
    pub fn add_type(&mut self, ty: CppType) -> TypeId {
        if let Some(&id) = self.type_ids.get(&ty) {
            return id;
        }
        let id = TypeId::from_index(self.types.len());
        self.types.push(ty.clone());
        self.type_ids.insert(ty, id);
        id
    }

    pub fn add_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::from_index(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    pub fn add_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::from_index(self.decls.len());
        self.decls.push(decl);
        id
    }

    /// The id the next [`add_decl`](Self::add_decl) call will return.
    pub fn next_decl_id(&self) -> DeclId {
        DeclId::from_index(self.decls.len())
    }

    pub fn decl_mut(&mut self, id: DeclId) -> Option<&mut Decl> {
        self.decls.get_mut(id.index())
    }

    /// Attach a base specifier to the record `owner`.
    pub fn add_base(
        &mut self,
        owner: DeclId,
        ty: TypeId,
        access: AccessSpecifier,
        is_virtual: bool,
    ) -> Result<BaseId> {
        let id = BaseId::from_index(self.bases.len());
        match self.decls.get_mut(owner.index()).map(|decl| &mut decl.kind) {
            Some(DeclKind::Record(record)) => record.bases.push(id),
            _ => return Err(AstError::NotARecord(owner)),
        }
        self.bases.push(BaseSpecifier {
            ty,
            access,
            is_virtual,
            owner,
        });
        Ok(id)
    }

    pub(crate) fn build(self, id: UnitId) -> Result<TranslationUnit> {
        Checker::new(&self).check()?;

        let mut by_name: FxHashMap<SmolStr, Vec<DeclId>> = FxHashMap::default();
        for (i, decl) in self.decls.iter().enumerate() {
            if !decl.name.is_empty() {
                by_name
                    .entry(decl.name.clone())
                    .or_default()
                    .push(DeclId::from_index(i));
            }
        }

        Ok(TranslationUnit {
            id,
            name: self.name,
            decls: self.decls,
            bases: self.bases,
            types: self.types,
            exprs: self.exprs,
            by_name,
        })
    }
}

/// Verifies that every id stored in the builder points at an existing node.
struct Checker<'a> {
    builder: &'a UnitBuilder,
}

impl<'a> Checker<'a> {
    fn new(builder: &'a UnitBuilder) -> Self {
        Self { builder }
    }

    fn check(&self) -> Result<()> {
        for (i, decl) in self.builder.decls.iter().enumerate() {
            let owner = || format!("{} `{}`", DeclId::from_index(i), decl.name);
            self.check_decl(decl, &owner)?;
        }
        for (i, base) in self.builder.bases.iter().enumerate() {
            let owner = || BaseId::from_index(i).to_string();
            self.ty(base.ty, &owner)?;
            self.decl(base.owner, &owner)?;
        }
        for (i, expr) in self.builder.exprs.iter().enumerate() {
            let owner = || ExprId::from_index(i).to_string();
            self.ty(expr.ty, &owner)?;
            match &expr.kind {
                ExprKind::DeclRef(target) => self.decl(*target, &owner)?,
                ExprKind::BinaryOperator { lhs, rhs, .. } => {
                    self.expr(*lhs, &owner)?;
                    self.expr(*rhs, &owner)?;
                }
                ExprKind::IntegerLiteral(_) | ExprKind::Unexposed(_) => {}
            }
        }
        Ok(())
    }

    fn check_decl(&self, decl: &Decl, owner: &dyn Fn() -> String) -> Result<()> {
        if let Some(parent) = decl.parent {
            self.decl(parent, owner)?;
        }
        match &decl.kind {
            DeclKind::Record(record) => {
                self.opt_decl(record.instantiated_from_member, owner)?;
                match &record.specialization {
                    Some(ClassSpecialization::Full { from, args }) => {
                        self.decl(from.decl(), owner)?;
                        self.args(args, owner)?;
                    }
                    Some(ClassSpecialization::Partial {
                        template,
                        params,
                        args,
                    }) => {
                        self.decl(*template, owner)?;
                        self.decls(params, owner)?;
                        self.args(args, owner)?;
                    }
                    None => {}
                }
            }
            DeclKind::Field { ty } | DeclKind::Parm { ty } => self.ty(*ty, owner)?,
            DeclKind::Typedef { underlying } | DeclKind::TypeAlias { underlying } => {
                self.ty(*underlying, owner)?
            }
            DeclKind::NonTypeTemplateParm { ty, .. } => self.ty(*ty, owner)?,
            DeclKind::Var(var) => {
                self.ty(var.ty, owner)?;
                self.opt_decl(var.instantiated_from, owner)?;
            }
            DeclKind::Function(function) => {
                self.ty(function.return_type, owner)?;
                self.decls(&function.params, owner)?;
                match &function.templated {
                    TemplatedKind::NonTemplate => {}
                    TemplatedKind::Pattern { template } => self.decl(*template, owner)?,
                    TemplatedKind::MemberSpecialization { from, args } => {
                        self.decl(*from, owner)?;
                        self.args(args, owner)?;
                    }
                    TemplatedKind::Specialization { primary, args } => {
                        self.decl(*primary, owner)?;
                        self.args(args, owner)?;
                    }
                    TemplatedKind::DependentSpecialization { candidates, args } => {
                        self.decls(candidates, owner)?;
                        self.args(args, owner)?;
                    }
                }
            }
            DeclKind::Template(template) => {
                self.decl(template.templated, owner)?;
                self.decls(&template.params, owner)?;
                self.opt_decl(template.instantiated_from_member, owner)?;
            }
            DeclKind::Namespace
            | DeclKind::Enum
            | DeclKind::EnumConstant { .. }
            | DeclKind::AccessSpec
            | DeclKind::TemplateTypeParm(_)
            | DeclKind::TemplateTemplateParm(_) => {}
        }
        Ok(())
    }

    fn args(&self, args: &[TemplateArgument], owner: &dyn Fn() -> String) -> Result<()> {
        for arg in args {
            match arg {
                TemplateArgument::Null => {}
                TemplateArgument::Type(ty) | TemplateArgument::Integral { ty, .. } => {
                    self.ty(*ty, owner)?
                }
                TemplateArgument::Declaration(decl)
                | TemplateArgument::Template(decl)
                | TemplateArgument::TemplateExpansion(decl) => self.decl(*decl, owner)?,
                TemplateArgument::Expression(expr) => self.expr(*expr, owner)?,
                TemplateArgument::Pack(elements) => self.args(elements, owner)?,
            }
        }
        Ok(())
    }

    fn decls(&self, ids: &[DeclId], owner: &dyn Fn() -> String) -> Result<()> {
        ids.iter().try_for_each(|id| self.decl(*id, owner))
    }

    fn opt_decl(&self, id: Option<DeclId>, owner: &dyn Fn() -> String) -> Result<()> {
        id.map_or(Ok(()), |id| self.decl(id, owner))
    }

    fn decl(&self, target: DeclId, owner: &dyn Fn() -> String) -> Result<()> {
        if target.index() < self.builder.decls.len() {
            Ok(())
        } else {
            Err(AstError::DanglingDecl {
                owner: owner(),
                target,
            })
        }
    }

    fn ty(&self, target: TypeId, owner: &dyn Fn() -> String) -> Result<()> {
        if target.index() < self.builder.types.len() {
            Ok(())
        } else {
            Err(AstError::DanglingType {
                owner: owner(),
                target,
            })
        }
    }

    fn expr(&self, target: ExprId, owner: &dyn Fn() -> String) -> Result<()> {
        if target.index() < self.builder.exprs.len() {
            Ok(())
        } else {
            Err(AstError::DanglingExpr {
                owner: owner(),
                target,
            })
        }
    }
}
