//! Lowering a manifest into the AST store.

use cxcursor_ast::{
    AccessSpecifier, BinaryOp, ClassSpecialization, CppType, Decl, DeclId, DeclKind, Expr,
    ExprId, ExprKind, FunctionDecl, FunctionFlavor, Index, RecordDecl, SpecializedFrom, TagKind,
    TemplateArgument, TemplateDecl, TemplateFlavor, TemplateParm, TemplatedKind, TypeId,
    UnitBuilder, UnitId, VarDecl,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{ManifestError, Result};
use crate::manifest::{
    AccessSpec, ArgSpec, DeclEntry, DeclSpec, FunctionSpec, Manifest, NonTypeParmSpec, ParmSpec,
    TagSpec, TemplateSpec,
};

impl Manifest {
    /// Lower into a unit builder, resolving every id reference.
    pub fn to_builder(&self) -> Result<UnitBuilder> {
        Lowering::new(self).run()
    }

    /// Lower and register the unit with `index`.
    pub fn load_into(&self, index: &mut Index) -> Result<UnitId> {
        let builder = self.to_builder()?;
        let id = index.add(builder)?;
        debug!(unit = %id, name = %self.unit.name, decls = self.decls.len(), "loaded manifest");
        Ok(id)
    }
}

impl From<AccessSpec> for AccessSpecifier {
    fn from(access: AccessSpec) -> Self {
        match access {
            AccessSpec::Public => AccessSpecifier::Public,
            AccessSpec::Protected => AccessSpecifier::Protected,
            AccessSpec::Private => AccessSpecifier::Private,
        }
    }
}

impl From<TagSpec> for TagKind {
    fn from(tag: TagSpec) -> Self {
        match tag {
            TagSpec::Class => TagKind::Class,
            TagSpec::Struct => TagKind::Struct,
            TagSpec::Union => TagKind::Union,
            TagSpec::Enum => TagKind::Enum,
        }
    }
}

struct Lowering<'m> {
    manifest: &'m Manifest,
    builder: UnitBuilder,
    ids: FxHashMap<&'m str, DeclId>,
    /// Template type parameter names, for turning `T` in a type spelling
    /// into a template parameter type.
    params: FxHashMap<&'m str, (u32, u32)>,
    /// (pattern, template) pairs of function templates.
    patterns: Vec<(DeclId, DeclId)>,
}

impl<'m> Lowering<'m> {
    fn new(manifest: &'m Manifest) -> Self {
        Self {
            manifest,
            builder: UnitBuilder::new(manifest.unit.name.as_str()),
            ids: FxHashMap::default(),
            params: FxHashMap::default(),
            patterns: Vec::new(),
        }
    }

    fn run(mut self) -> Result<UnitBuilder> {
        let manifest = self.manifest;

        // Allocate every id up front so entries may refer forward.
        for entry in &manifest.decls {
            let id = self
                .builder
                .add_decl(Decl::new(entry.name(), DeclKind::Namespace));
            if self.ids.insert(entry.id.as_str(), id).is_some() {
                return Err(ManifestError::DuplicateId(entry.id.clone()));
            }
            if let DeclSpec::TemplateTypeParm(parm) = &entry.kind {
                self.params
                    .entry(entry.name())
                    .or_insert((parm.depth, parm.index));
            }
        }

        for entry in &manifest.decls {
            let id = self.resolve(&entry.id, &entry.id)?;
            let decl = self.lower_decl(id, entry)?;
            trace!(id = %entry.id, decl = %id, "lowered declaration");
            if let Some(slot) = self.builder.decl_mut(id) {
                *slot = decl;
            }
        }

        for entry in &manifest.decls {
            let owner = self.resolve(&entry.id, &entry.id)?;
            for base in entry.kind.bases() {
                let ty = self.ty(&entry.id, &base.ty)?;
                let access = match (base.access, entry.kind.tag()) {
                    (Some(access), _) => access.into(),
                    (None, Some(TagSpec::Class)) => AccessSpecifier::Private,
                    (None, _) => AccessSpecifier::Public,
                };
                self.builder.add_base(owner, ty, access, base.is_virtual)?;
            }
        }

        for (pattern, template) in std::mem::take(&mut self.patterns) {
            if let Some(DeclKind::Function(function)) =
                self.builder.decl_mut(pattern).map(|decl| &mut decl.kind)
            {
                if matches!(function.templated, TemplatedKind::NonTemplate) {
                    function.templated = TemplatedKind::Pattern { template };
                }
            }
        }

        Ok(self.builder)
    }

    fn lower_decl(&mut self, id: DeclId, entry: &'m DeclEntry) -> Result<Decl> {
        let from = entry.id.as_str();
        let kind = match &entry.kind {
            DeclSpec::Namespace => DeclKind::Namespace,
            DeclSpec::Class(record) | DeclSpec::Struct(record) | DeclSpec::Union(record) => {
                let tag = entry.kind.tag().unwrap_or(TagSpec::Class);
                let mut decl = RecordDecl::new(tag.into());
                decl.instantiated_from_member = self.resolve_opt(from, &record.instantiated_from)?;
                DeclKind::Record(decl)
            }
            DeclSpec::Enum => DeclKind::Enum,
            DeclSpec::EnumConstant { value } => DeclKind::EnumConstant {
                value: i128::from(*value),
            },
            DeclSpec::Field { ty } => DeclKind::Field {
                ty: self.ty(from, ty)?,
            },
            DeclSpec::Var(var) => {
                let mut decl = VarDecl::new(self.ty(from, &var.ty)?);
                decl.is_static_data_member = var.static_member;
                decl.instantiated_from = self.resolve_opt(from, &var.instantiated_from)?;
                DeclKind::Var(decl)
            }
            DeclSpec::Parm { ty } => DeclKind::Parm {
                ty: self.ty(from, ty)?,
            },
            DeclSpec::Function(function) => self.function(from, FunctionFlavor::Free, function)?,
            DeclSpec::Method(function) => self.function(from, FunctionFlavor::Method, function)?,
            DeclSpec::Constructor(function) => {
                self.function(from, FunctionFlavor::Constructor, function)?
            }
            DeclSpec::Destructor(function) => {
                self.function(from, FunctionFlavor::Destructor, function)?
            }
            DeclSpec::Conversion(function) => {
                self.function(from, FunctionFlavor::Conversion, function)?
            }
            DeclSpec::ClassTemplate(template) => {
                self.template(id, from, TemplateFlavor::Class, template)?
            }
            DeclSpec::FunctionTemplate(template) => {
                self.template(id, from, TemplateFlavor::Function, template)?
            }
            DeclSpec::AliasTemplate(template) => {
                self.template(id, from, TemplateFlavor::TypeAlias, template)?
            }
            DeclSpec::PartialSpecialization(partial) => {
                let mut decl = RecordDecl::new(partial.tag.into());
                decl.specialization = Some(ClassSpecialization::Partial {
                    template: self.resolve(from, &partial.template)?,
                    params: self.resolve_all(from, &partial.params)?,
                    args: self.args(from, &partial.args)?,
                });
                DeclKind::Record(decl)
            }
            DeclSpec::Specialization(spec) => {
                let specialized_from = match (&spec.template, &spec.partial) {
                    (Some(template), None) => SpecializedFrom::Primary(self.resolve(from, template)?),
                    (None, Some(partial)) => SpecializedFrom::Partial(self.resolve(from, partial)?),
                    _ => {
                        return Err(ManifestError::Invalid {
                            id: entry.id.clone(),
                            reason: "a specialization names exactly one of `template` and `partial`"
                                .to_string(),
                        })
                    }
                };
                let mut decl = RecordDecl::new(spec.tag.into());
                decl.specialization = Some(ClassSpecialization::Full {
                    from: specialized_from,
                    args: self.args(from, &spec.args)?,
                });
                DeclKind::Record(decl)
            }
            DeclSpec::AccessSpec => DeclKind::AccessSpec,
            DeclSpec::Typedef { ty } => DeclKind::Typedef {
                underlying: self.ty(from, ty)?,
            },
            DeclSpec::TypeAlias { ty } => DeclKind::TypeAlias {
                underlying: self.ty(from, ty)?,
            },
            DeclSpec::TemplateTypeParm(parm) => DeclKind::TemplateTypeParm(template_parm(parm)),
            DeclSpec::NonTypeTemplateParm(NonTypeParmSpec {
                ty,
                depth,
                index,
                pack,
            }) => DeclKind::NonTypeTemplateParm {
                ty: self.ty(from, ty)?,
                parm: TemplateParm {
                    depth: *depth,
                    index: *index,
                    is_pack: *pack,
                },
            },
            DeclSpec::TemplateTemplateParm(parm) => {
                DeclKind::TemplateTemplateParm(template_parm(parm))
            }
        };

        let mut decl = Decl::new(entry.name(), kind);
        decl.access = entry.access.map(Into::into).unwrap_or_default();
        decl.parent = self.resolve_opt(from, &entry.parent)?;
        Ok(decl)
    }

    fn function(
        &mut self,
        from: &str,
        flavor: FunctionFlavor,
        spec: &FunctionSpec,
    ) -> Result<DeclKind> {
        let returns = spec.returns.as_deref().unwrap_or("void");
        let mut function = FunctionDecl::new(flavor, self.ty(from, returns)?);
        function.params = self.resolve_all(from, &spec.params)?;

        let has_candidates = !spec.candidates.is_empty();
        function.templated = match (&spec.specializes, &spec.instantiated_from, has_candidates) {
            (None, None, false) => TemplatedKind::NonTemplate,
            (Some(primary), None, false) => TemplatedKind::Specialization {
                primary: self.resolve(from, primary)?,
                args: self.args(from, &spec.args)?,
            },
            (None, Some(member), false) => TemplatedKind::MemberSpecialization {
                from: self.resolve(from, member)?,
                args: self.args(from, &spec.args)?,
            },
            (None, None, true) => TemplatedKind::DependentSpecialization {
                candidates: self.resolve_all(from, &spec.candidates)?,
                args: self.args(from, &spec.args)?,
            },
            _ => {
                return Err(ManifestError::Invalid {
                    id: from.to_string(),
                    reason: "`specializes`, `instantiated_from` and `candidates` are exclusive"
                        .to_string(),
                })
            }
        };
        Ok(DeclKind::Function(function))
    }

    fn template(
        &mut self,
        id: DeclId,
        from: &str,
        flavor: TemplateFlavor,
        spec: &TemplateSpec,
    ) -> Result<DeclKind> {
        let templated = self.resolve(from, &spec.templated)?;
        if flavor == TemplateFlavor::Function {
            self.patterns.push((templated, id));
        }
        let mut template =
            TemplateDecl::new(flavor, templated, self.resolve_all(from, &spec.params)?);
        template.instantiated_from_member = self.resolve_opt(from, &spec.instantiated_from)?;
        Ok(DeclKind::Template(template))
    }

    fn args(&mut self, from: &str, args: &[ArgSpec]) -> Result<Vec<TemplateArgument>> {
        args.iter().map(|arg| self.arg(from, arg)).collect()
    }

    fn arg(&mut self, from: &str, arg: &ArgSpec) -> Result<TemplateArgument> {
        let arg = match arg {
            ArgSpec::Null { .. } => TemplateArgument::Null,
            ArgSpec::Type { ty } => TemplateArgument::Type(self.ty(from, ty)?),
            ArgSpec::Integral { integral, ty } => TemplateArgument::Integral {
                value: i128::from(*integral),
                ty: self.ty(from, ty)?,
            },
            ArgSpec::Decl { decl } => TemplateArgument::Declaration(self.resolve(from, decl)?),
            ArgSpec::Template { template } => {
                TemplateArgument::Template(self.resolve(from, template)?)
            }
            ArgSpec::Expansion { expansion } => {
                TemplateArgument::TemplateExpansion(self.resolve(from, expansion)?)
            }
            ArgSpec::Expression { expr, ty } => {
                let ty = self.ty(from, ty)?;
                TemplateArgument::Expression(self.expr(expr, ty))
            }
            ArgSpec::Pack { pack } => TemplateArgument::Pack(self.args(from, pack)?),
        };
        Ok(arg)
    }

    /// Lower `a op b op c ...` (operators separated by whitespace, folded
    /// left to right). Anything else becomes a single operand, or an
    /// unexposed expression if it spans several tokens.
    fn expr(&mut self, text: &str, ty: TypeId) -> ExprId {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let ops: Option<Vec<BinaryOp>> = tokens
            .iter()
            .skip(1)
            .step_by(2)
            .map(|token| BinaryOp::from_spelling(token))
            .collect();

        match (tokens.as_slice(), ops) {
            ([single], _) => self.operand(single, ty),
            ([first, rest @ ..], Some(ops)) if !rest.is_empty() && rest.len() % 2 == 0 => {
                let mut lhs = self.operand(first, ty);
                for (op, operand) in ops.into_iter().zip(rest.iter().skip(1).step_by(2)) {
                    let rhs = self.operand(operand, ty);
                    lhs = self
                        .builder
                        .add_expr(Expr::new(ExprKind::BinaryOperator { op, lhs, rhs }, ty));
                }
                lhs
            }
            _ => self
                .builder
                .add_expr(Expr::new(ExprKind::Unexposed(text.trim().into()), ty)),
        }
    }

    fn operand(&mut self, token: &str, ty: TypeId) -> ExprId {
        let kind = if let Ok(value) = token.parse::<i128>() {
            ExprKind::IntegerLiteral(value)
        } else if let Some(&decl) = self.ids.get(token) {
            ExprKind::DeclRef(decl)
        } else {
            ExprKind::Unexposed(token.into())
        };
        self.builder.add_expr(Expr::new(kind, ty))
    }

    fn ty(&mut self, from: &str, spelling: &str) -> Result<TypeId> {
        let ty = CppType::parse(spelling).ok_or_else(|| ManifestError::BadType {
            decl: from.to_string(),
            spelling: spelling.to_string(),
        })?;
        let ty = self.substitute_params(ty);
        Ok(self.builder.add_type(ty))
    }

    fn substitute_params(&self, ty: CppType) -> CppType {
        match ty {
            CppType::Named(name) => match self.params.get(name.as_str()) {
                Some(&(depth, index)) => CppType::TemplateParam { name, depth, index },
                None => CppType::Named(name),
            },
            CppType::Pointer { pointee, is_const } => CppType::Pointer {
                pointee: Box::new(self.substitute_params(*pointee)),
                is_const,
            },
            CppType::Reference {
                referent,
                is_const,
                is_rvalue,
            } => CppType::Reference {
                referent: Box::new(self.substitute_params(*referent)),
                is_const,
                is_rvalue,
            },
            CppType::Array { element, size } => CppType::Array {
                element: Box::new(self.substitute_params(*element)),
                size,
            },
            other => other,
        }
    }

    fn resolve(&self, from: &str, target: &str) -> Result<DeclId> {
        self.ids
            .get(target)
            .copied()
            .ok_or_else(|| ManifestError::UnknownReference {
                from: from.to_string(),
                target: target.to_string(),
            })
    }

    fn resolve_opt(&self, from: &str, target: &Option<String>) -> Result<Option<DeclId>> {
        target
            .as_deref()
            .map(|target| self.resolve(from, target))
            .transpose()
    }

    fn resolve_all(&self, from: &str, targets: &[String]) -> Result<Vec<DeclId>> {
        targets.iter().map(|target| self.resolve(from, target)).collect()
    }
}

fn template_parm(parm: &ParmSpec) -> TemplateParm {
    TemplateParm {
        depth: parm.depth,
        index: parm.index,
        is_pack: parm.pack,
    }
}
