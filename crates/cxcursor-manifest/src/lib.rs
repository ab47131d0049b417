//! Translation-unit manifests for the cxcursor AST store.
//!
//! This crate provides:
//! - The manifest format (TOML, or JSON with the same shape)
//! - Lowering a manifest into a [`UnitBuilder`](cxcursor_ast::UnitBuilder)
//! - Loading a manifest file straight into an [`Index`]
//!
//! # Example
//!
//! ```toml
//! # vec.cxu.toml
//! [unit]
//! name = "vec.cpp"
//!
//! [[decl]]
//! id = "T"
//! kind = "template_type_parm"
//!
//! [[decl]]
//! id = "Vec.pattern"
//! name = "Vec"
//! kind = "class"
//!
//! [[decl]]
//! id = "Vec"
//! kind = "class_template"
//! templated = "Vec.pattern"
//! params = ["T"]
//!
//! [[decl]]
//! id = "Vec<int>"
//! name = "Vec"
//! kind = "specialization"
//! tag = "class"
//! template = "Vec"
//! args = [{ type = "int" }]
//! ```

mod error;
mod lower;
mod manifest;

pub use error::{ManifestError, Result};
pub use manifest::{
    AccessSpec, ArgSpec, BaseSpec, DeclEntry, DeclSpec, FunctionSpec, Manifest, NonTypeParmSpec,
    ParmSpec, PartialSpec, RecordSpec, SpecializationSpec, TagSpec, TemplateSpec, UnitSection,
    VarSpec,
};

use std::path::Path;

use cxcursor_ast::{Index, UnitId};

/// Load a manifest file and register its unit with `index`.
pub fn load(index: &mut Index, path: &Path) -> Result<UnitId> {
    Manifest::from_file(path)?.load_into(index)
}
