//! Manifest types (`*.cxu.toml` / `*.cxu.json` format).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, Result};

/// Root manifest: one translation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Unit metadata.
    pub unit: UnitSection,

    /// Declarations, in allocation order.
    #[serde(rename = "decl", default)]
    pub decls: Vec<DeclEntry>,
}

/// Unit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSection {
    /// Source file name the unit stands for.
    pub name: String,
}

/// One `[[decl]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclEntry {
    /// Manifest-unique id other entries refer to.
    pub id: String,

    /// Declared name (default: the id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Id of the semantic parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessSpec>,

    #[serde(flatten)]
    pub kind: DeclSpec,
}

impl DeclEntry {
    /// The declared name.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Access keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpec {
    Public,
    Protected,
    Private,
}

/// Record tag keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSpec {
    Class,
    Struct,
    Union,
    /// Accepted so malformed front-end output can be reproduced.
    Enum,
}

/// Declaration kind and its kind-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclSpec {
    Namespace,
    Class(RecordSpec),
    Struct(RecordSpec),
    Union(RecordSpec),
    Enum,
    EnumConstant {
        value: i64,
    },
    Field {
        #[serde(rename = "type")]
        ty: String,
    },
    Var(VarSpec),
    Parm {
        #[serde(rename = "type")]
        ty: String,
    },
    Function(FunctionSpec),
    Method(FunctionSpec),
    Constructor(FunctionSpec),
    Destructor(FunctionSpec),
    Conversion(FunctionSpec),
    ClassTemplate(TemplateSpec),
    FunctionTemplate(TemplateSpec),
    AliasTemplate(TemplateSpec),
    PartialSpecialization(PartialSpec),
    Specialization(SpecializationSpec),
    AccessSpec,
    Typedef {
        #[serde(rename = "type")]
        ty: String,
    },
    TypeAlias {
        #[serde(rename = "type")]
        ty: String,
    },
    TemplateTypeParm(ParmSpec),
    NonTypeTemplateParm(NonTypeParmSpec),
    TemplateTemplateParm(ParmSpec),
}

impl DeclSpec {
    /// Base specifiers written on a record-like entry.
    pub fn bases(&self) -> &[BaseSpec] {
        match self {
            DeclSpec::Class(record) | DeclSpec::Struct(record) | DeclSpec::Union(record) => {
                &record.bases
            }
            DeclSpec::PartialSpecialization(partial) => &partial.bases,
            DeclSpec::Specialization(spec) => &spec.bases,
            _ => &[],
        }
    }

    /// Tag of a record-like entry.
    pub fn tag(&self) -> Option<TagSpec> {
        match self {
            DeclSpec::Class(_) => Some(TagSpec::Class),
            DeclSpec::Struct(_) => Some(TagSpec::Struct),
            DeclSpec::Union(_) => Some(TagSpec::Union),
            DeclSpec::PartialSpecialization(partial) => Some(partial.tag),
            DeclSpec::Specialization(spec) => Some(spec.tag),
            _ => None,
        }
    }
}

/// Fields of a plain class, struct or union.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<BaseSpec>,

    /// Member class of a class template this record was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantiated_from: Option<String>,
}

/// A base specifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSpec {
    /// Spelling of the base type.
    #[serde(rename = "type")]
    pub ty: String,

    /// Written access (default: `private` for classes, `public` otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessSpec>,

    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,
}

/// Fields of a variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarSpec {
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub static_member: bool,

    /// Static data member this one was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantiated_from: Option<String>,
}

/// Fields of a function of any flavor.
///
/// At most one of `specializes`, `instantiated_from` and `candidates` may be
/// given; `args` belongs to whichever it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Return type spelling (default: `void`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,

    /// Ids of the parameter declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,

    /// Function template this is a specialization of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,

    /// Member function of a class template this was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantiated_from: Option<String>,

    /// Candidate templates of a dependent specialization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
}

/// Fields of a class, function or alias template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Id of the pattern declaration.
    pub templated: String,

    #[serde(default)]
    pub params: Vec<String>,

    /// Member template this was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantiated_from: Option<String>,
}

/// Fields of a class template partial specialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialSpec {
    pub tag: TagSpec,

    /// Id of the class template being specialized.
    pub template: String,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub args: Vec<ArgSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<BaseSpec>,
}

/// Fields of a full class template specialization.
///
/// Exactly one of `template` (the primary) and `partial` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationSpec {
    pub tag: TagSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Partial specialization this was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<String>,

    #[serde(default)]
    pub args: Vec<ArgSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<BaseSpec>,
}

/// Position of a type or template template parameter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParmSpec {
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub pack: bool,
}

/// A non-type template parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonTypeParmSpec {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub pack: bool,
}

/// A template argument, written as an inline table.
///
/// Variants are tried in order, so the more specific shapes come first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgSpec {
    /// `{ null = true }`
    Null { null: bool },
    /// `{ integral = 3, type = "int" }`
    Integral {
        integral: i64,
        #[serde(rename = "type")]
        ty: String,
    },
    /// `{ expr = "N + 1", type = "int" }`
    Expression {
        expr: String,
        #[serde(rename = "type")]
        ty: String,
    },
    /// `{ type = "int" }`
    Type {
        #[serde(rename = "type")]
        ty: String,
    },
    /// `{ decl = "global" }`
    Decl { decl: String },
    /// `{ template = "Vec" }`
    Template { template: String },
    /// `{ expansion = "Vec" }`
    Expansion { expansion: String },
    /// `{ pack = [...] }`
    Pack { pack: Vec<ArgSpec> },
}

impl Manifest {
    /// Load a manifest file. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Find a declaration entry by id.
    pub fn find_decl(&self, id: &str) -> Option<&DeclEntry> {
        self.decls.iter().find(|decl| decl.id == id)
    }
}
