//! Per-declaration cursor reports.

use std::fmt::Write as _;

use cxcursor::{
    Cursor, CursorKind, CxxAccessSpecifier, Result, TemplateArgumentKind, TemplateClass,
};
use cxcursor_ast::{Index, UnitId};
use serde::Serialize;

/// Everything the cursor layer can say about one unit.
#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub unit: String,
    pub decls: Vec<DeclReport>,
}

#[derive(Debug, Serialize)]
pub struct DeclReport {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    pub template_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialized_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<ArgReport>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<BaseReport>,
}

#[derive(Debug, Serialize)]
pub struct ArgReport {
    pub kind: String,
    pub spelling: String,
}

#[derive(Debug, Serialize)]
pub struct BaseReport {
    #[serde(rename = "type")]
    pub ty: String,
    pub access: String,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

/// Build the report for `unit`, optionally restricted to declarations
/// named `only`.
pub fn build(index: &Index, unit: UnitId, only: Option<&str>) -> Result<UnitReport> {
    let tu = index
        .unit(unit)
        .map_err(|_| cxcursor::CursorError::StaleUnit(unit))?;
    let mut decls = Vec::new();
    for (id, decl) in tu.decls() {
        if only.is_some_and(|name| decl.name != name) {
            continue;
        }
        let cursor = cxcursor::decl_cursor(index, unit, id)?;
        decls.push(describe(index, cursor)?);
    }
    Ok(UnitReport {
        unit: tu.name().to_string(),
        decls,
    })
}

fn describe(index: &Index, cursor: Cursor) -> Result<DeclReport> {
    let label = |cursor: Cursor| -> Result<String> {
        let name = cxcursor::spelling(index, cursor)?.unwrap_or_default();
        Ok(format!("{name} ({})", cursor.kind()))
    };

    let parent = cxcursor::semantic_parent(index, cursor)?
        .map(label)
        .transpose()?;
    let access = match cxcursor::access_specifier(index, cursor)? {
        CxxAccessSpecifier::Invalid => None,
        access => Some(access.to_string()),
    };
    let specialized_from = cxcursor::specialized_template(index, cursor)?
        .map(label)
        .transpose()?;
    let produces = match cxcursor::template_cursor_kind(index, cursor)? {
        CursorKind::NoDeclFound => None,
        kind => Some(kind.to_string()),
    };

    let parameters = match cxcursor::num_template_parameters(index, cursor)? {
        Some(count) => {
            let mut params = Vec::with_capacity(count as usize);
            for i in 0..count {
                if let Some(param) = cxcursor::template_parameter(index, cursor, i)? {
                    params.push(label(param)?);
                }
            }
            Some(params)
        }
        None => None,
    };

    let arguments = match cxcursor::num_template_arguments(index, cursor)? {
        Some(count) => {
            let mut args = Vec::with_capacity(count as usize);
            for i in 0..count {
                if let Some(arg) = cxcursor::template_argument(index, cursor, i)? {
                    let kind = cxcursor::template_argument_kind(arg)
                        .unwrap_or(TemplateArgumentKind::Invalid);
                    args.push(ArgReport {
                        kind: kind.to_string(),
                        spelling: cxcursor::spelling(index, arg)?.unwrap_or_default(),
                    });
                }
            }
            Some(args)
        }
        None => None,
    };

    let mut bases = Vec::new();
    for base in cxcursor::base_cursors(index, cursor)? {
        bases.push(BaseReport {
            ty: cxcursor::spelling(index, base)?.unwrap_or_default(),
            access: cxcursor::access_specifier(index, base)?.to_string(),
            is_virtual: cxcursor::is_virtual_base(index, base)?,
        });
    }

    Ok(DeclReport {
        id: cursor
            .as_decl()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: cxcursor::spelling(index, cursor)?.unwrap_or_default(),
        kind: cursor.kind().to_string(),
        parent,
        access,
        template_class: template_class_name(cxcursor::classify(index, cursor)?).to_string(),
        specialized_from,
        produces,
        parameters,
        arguments,
        bases,
    })
}

fn template_class_name(class: TemplateClass) -> &'static str {
    use cxcursor::FunctionSpecializationKind as Kind;
    match class {
        TemplateClass::Ordinary => "ordinary",
        TemplateClass::PrimaryTemplate => "primary template",
        TemplateClass::ClassSpecialization => "class specialization",
        TemplateClass::ClassPartialSpecialization => "class partial specialization",
        TemplateClass::FunctionSpecialization(Kind::Member) => "member specialization",
        TemplateClass::FunctionSpecialization(Kind::Dependent) => "dependent specialization",
        TemplateClass::FunctionSpecialization(Kind::Template) => "function specialization",
        TemplateClass::NonTemplate => "non-template function",
    }
}

/// Render a report as indented text.
pub fn render_text(report: &UnitReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "unit {} ({} declarations)", report.unit, report.decls.len());
    for decl in &report.decls {
        let _ = writeln!(out, "{} {}: {}", decl.id, decl.name, decl.kind);
        let _ = writeln!(out, "  template: {}", decl.template_class);
        if let Some(parent) = &decl.parent {
            let _ = writeln!(out, "  parent: {parent}");
        }
        if let Some(access) = &decl.access {
            let _ = writeln!(out, "  access: {access}");
        }
        if let Some(from) = &decl.specialized_from {
            let _ = writeln!(out, "  specialized from: {from}");
        }
        if let Some(kind) = &decl.produces {
            let _ = writeln!(out, "  produces: {kind}");
        }
        if let Some(params) = &decl.parameters {
            let _ = writeln!(out, "  parameters ({}):", params.len());
            for (i, param) in params.iter().enumerate() {
                let _ = writeln!(out, "    [{i}] {param}");
            }
        }
        if let Some(args) = &decl.arguments {
            let _ = writeln!(out, "  arguments ({}):", args.len());
            for (i, arg) in args.iter().enumerate() {
                let _ = writeln!(out, "    [{i}] {} {}", arg.kind, arg.spelling);
            }
        }
        if !decl.bases.is_empty() {
            let _ = writeln!(out, "  bases ({}):", decl.bases.len());
            for base in &decl.bases {
                let virtual_ = if base.is_virtual { " virtual" } else { "" };
                let _ = writeln!(out, "    {}{virtual_} {}", base.access, base.ty);
            }
        }
    }
    out
}
