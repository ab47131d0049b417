//! Loading manifest files from disk and querying them through cursors.

use std::fs;

use cxcursor::{CursorKind, CxxAccessSpecifier, TemplateArgumentKind};
use cxcursor_ast::Index;
use cxcursor_manifest::{load, ManifestError};

const VEC_TOML: &str = r#"
[unit]
name = "vec.cpp"

[[decl]]
id = "T"
kind = "template_type_parm"
parent = "Vec"

[[decl]]
id = "Vec.pattern"
name = "Vec"
kind = "class"

[[decl]]
id = "Vec"
kind = "class_template"
templated = "Vec.pattern"
params = ["T"]

[[decl]]
id = "V"
kind = "template_type_parm"

[[decl]]
id = "Vec<V*>"
name = "Vec"
kind = "partial_specialization"
tag = "class"
template = "Vec"
params = ["V"]
args = [{ type = "V *" }]

[[decl]]
id = "Vec<int>"
name = "Vec"
kind = "specialization"
tag = "class"
template = "Vec"
args = [{ type = "int" }]
bases = [{ type = "Base", access = "protected" }]
"#;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write manifest");
    path
}

#[test]
fn test_load_toml_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "vec.cxu.toml", VEC_TOML);

    let mut index = Index::new();
    let unit_id = load(&mut index, &path).expect("manifest should load");
    let unit = index.unit(unit_id).unwrap();
    assert_eq!(unit.name(), "vec.cpp");

    let ids = unit.find_decls("Vec");
    let (template, partial, full) = (ids[1], ids[2], ids[3]);

    let template = cxcursor::decl_cursor(&index, unit_id, template).unwrap();
    let partial = cxcursor::decl_cursor(&index, unit_id, partial).unwrap();
    let full = cxcursor::decl_cursor(&index, unit_id, full).unwrap();

    assert_eq!(template.kind(), CursorKind::ClassTemplate);
    assert_eq!(partial.kind(), CursorKind::ClassTemplatePartialSpecialization);
    assert_eq!(full.kind(), CursorKind::ClassDecl);

    assert_eq!(
        cxcursor::specialized_template(&index, full).unwrap(),
        Some(template)
    );
    assert_eq!(
        cxcursor::specialized_template(&index, partial).unwrap(),
        Some(template)
    );

    let arg = cxcursor::template_argument(&index, full, 0).unwrap().unwrap();
    assert_eq!(
        cxcursor::template_argument_kind(arg),
        Some(TemplateArgumentKind::Type)
    );
    assert_eq!(cxcursor::spelling(&index, arg).unwrap().as_deref(), Some("int"));

    let base = cxcursor::base_cursors(&index, full).unwrap()[0];
    assert_eq!(
        cxcursor::access_specifier(&index, base).unwrap(),
        CxxAccessSpecifier::Protected
    );
}

#[test]
fn test_load_json_manifest() {
    let json = r#"{
        "unit": { "name": "json.cpp" },
        "decl": [
            { "id": "S", "kind": "struct" },
            { "id": "x", "kind": "field", "type": "const int *", "parent": "S", "access": "private" }
        ]
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "unit.json", json);

    let mut index = Index::new();
    let unit_id = load(&mut index, &path).unwrap();
    let unit = index.unit(unit_id).unwrap();
    let field = cxcursor::decl_cursor(&index, unit_id, unit.find_decl("x").unwrap()).unwrap();

    assert_eq!(field.kind(), CursorKind::FieldDecl);
    assert_eq!(
        cxcursor::access_specifier(&index, field).unwrap(),
        CxxAccessSpecifier::Private
    );
    let parent = cxcursor::semantic_parent(&index, field).unwrap().unwrap();
    assert_eq!(parent.kind(), CursorKind::StructDecl);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = Index::new();
    let err = load(&mut index, &dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
    assert_eq!(index.units().count(), 0);
}
