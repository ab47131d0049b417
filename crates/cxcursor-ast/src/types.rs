//! C++ type representation.

use std::fmt;

/// A C++ type as recorded in the AST store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CppType {
    /// void
    Void,
    /// bool
    Bool,
    /// char, unsigned char
    Char { signed: bool },
    /// short, unsigned short
    Short { signed: bool },
    /// int, unsigned int
    Int { signed: bool },
    /// long, unsigned long
    Long { signed: bool },
    /// long long, unsigned long long
    LongLong { signed: bool },
    /// float
    Float,
    /// double
    Double,
    /// Pointer type: T* (`is_const` marks a pointer to const)
    Pointer {
        pointee: Box<CppType>,
        is_const: bool,
    },
    /// Reference type: T& (lvalue) or T&& (rvalue)
    Reference {
        referent: Box<CppType>,
        is_const: bool,
        is_rvalue: bool,
    },
    /// Array type: T[N]
    Array {
        element: Box<CppType>,
        size: Option<usize>,
    },
    /// Named type (struct, class, enum, typedef, template-id)
    Named(String),
    /// Template parameter type, e.g. `T` inside `template<typename T>`.
    TemplateParam {
        name: String,
        /// Template nesting depth (0 for outermost template)
        depth: u32,
        /// Index in the template parameter list
        index: u32,
    },
}

impl CppType {
    /// Create a signed int type.
    pub fn int() -> Self {
        CppType::Int { signed: true }
    }

    /// Create an unsigned int type.
    pub fn uint() -> Self {
        CppType::Int { signed: false }
    }

    /// Create a named type.
    pub fn named(name: impl Into<String>) -> Self {
        CppType::Named(name.into())
    }

    /// Create a pointer to this type.
    pub fn ptr(self) -> Self {
        CppType::Pointer {
            pointee: Box::new(self),
            is_const: false,
        }
    }

    /// Create a const lvalue reference to this type.
    pub fn const_ref(self) -> Self {
        CppType::Reference {
            referent: Box::new(self),
            is_const: true,
            is_rvalue: false,
        }
    }

    /// Whether this type mentions a template parameter anywhere.
    pub fn is_dependent(&self) -> bool {
        match self {
            CppType::TemplateParam { .. } => true,
            CppType::Pointer { pointee: inner, .. }
            | CppType::Reference { referent: inner, .. }
            | CppType::Array { element: inner, .. } => inner.is_dependent(),
            _ => false,
        }
    }

    /// The C++ spelling of this type, e.g. `const int &`.
    pub fn spelling(&self) -> String {
        match self {
            CppType::Void => "void".to_string(),
            CppType::Bool => "bool".to_string(),
            CppType::Char { signed } => unsigned_prefix(*signed, "char"),
            CppType::Short { signed } => unsigned_prefix(*signed, "short"),
            CppType::Int { signed } => unsigned_prefix(*signed, "int"),
            CppType::Long { signed } => unsigned_prefix(*signed, "long"),
            CppType::LongLong { signed } => unsigned_prefix(*signed, "long long"),
            CppType::Float => "float".to_string(),
            CppType::Double => "double".to_string(),
            CppType::Pointer { pointee, is_const } => {
                format!("{}{} *", const_prefix(*is_const), pointee.spelling())
            }
            CppType::Reference {
                referent,
                is_const,
                is_rvalue,
            } => {
                let amp = if *is_rvalue { "&&" } else { "&" };
                format!("{}{} {}", const_prefix(*is_const), referent.spelling(), amp)
            }
            CppType::Array { element, size } => match size {
                Some(n) => format!("{}[{}]", element.spelling(), n),
                None => format!("{}[]", element.spelling()),
            },
            CppType::Named(name) => name.clone(),
            CppType::TemplateParam { name, .. } => name.clone(),
        }
    }

    /// Parse a C++ type spelling.
    ///
    /// Understands builtin types, trailing `*`, `&`, `&&` and `[N]`
    /// declarators with an optional leading `const`, and falls back to a
    /// named type for anything that looks like a (qualified) identifier.
    /// Returns `None` for spellings that are neither.
    pub fn parse(spelling: &str) -> Option<CppType> {
        let s = spelling.trim();
        if s.is_empty() {
            return None;
        }

        if let Some(rest) = s.strip_suffix("&&") {
            let (inner, is_const) = strip_const(rest);
            return Some(CppType::Reference {
                referent: Box::new(CppType::parse(inner)?),
                is_const,
                is_rvalue: true,
            });
        }
        if let Some(rest) = s.strip_suffix('&') {
            let (inner, is_const) = strip_const(rest);
            return Some(CppType::Reference {
                referent: Box::new(CppType::parse(inner)?),
                is_const,
                is_rvalue: false,
            });
        }
        if let Some(rest) = s.strip_suffix('*') {
            let (inner, is_const) = strip_const(rest);
            return Some(CppType::Pointer {
                pointee: Box::new(CppType::parse(inner)?),
                is_const,
            });
        }
        if let Some(rest) = s.strip_suffix(']') {
            let open = rest.rfind('[')?;
            let size = rest[open + 1..].trim();
            let size = if size.is_empty() {
                None
            } else {
                Some(size.parse().ok()?)
            };
            return Some(CppType::Array {
                element: Box::new(CppType::parse(&rest[..open])?),
                size,
            });
        }

        builtin(s).or_else(|| looks_like_name(s).then(|| CppType::Named(s.to_string())))
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling())
    }
}

fn unsigned_prefix(signed: bool, base: &str) -> String {
    if signed {
        base.to_string()
    } else {
        format!("unsigned {}", base)
    }
}

fn const_prefix(is_const: bool) -> &'static str {
    if is_const {
        "const "
    } else {
        ""
    }
}

fn strip_const(s: &str) -> (&str, bool) {
    let s = s.trim();
    match s.strip_prefix("const ") {
        Some(inner) => (inner.trim(), true),
        None => (s, false),
    }
}

fn builtin(s: &str) -> Option<CppType> {
    let ty = match s {
        "void" => CppType::Void,
        "bool" => CppType::Bool,
        "char" | "signed char" => CppType::Char { signed: true },
        "unsigned char" => CppType::Char { signed: false },
        "short" | "short int" => CppType::Short { signed: true },
        "unsigned short" | "unsigned short int" => CppType::Short { signed: false },
        "int" | "signed" | "signed int" => CppType::Int { signed: true },
        "unsigned" | "unsigned int" => CppType::Int { signed: false },
        "long" | "long int" => CppType::Long { signed: true },
        "unsigned long" | "unsigned long int" => CppType::Long { signed: false },
        "long long" | "long long int" => CppType::LongLong { signed: true },
        "unsigned long long" | "unsigned long long int" => CppType::LongLong { signed: false },
        "float" => CppType::Float,
        "double" => CppType::Double,
        _ => return None,
    };
    Some(ty)
}

fn looks_like_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '<' | '>' | ',' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtins() {
        assert_eq!(CppType::parse("int"), Some(CppType::int()));
        assert_eq!(CppType::parse("unsigned"), Some(CppType::uint()));
        assert_eq!(
            CppType::parse("unsigned long long"),
            Some(CppType::LongLong { signed: false })
        );
        assert_eq!(CppType::parse("  double "), Some(CppType::Double));
    }

    #[test]
    fn test_parse_declarators() {
        assert_eq!(
            CppType::parse("const int &"),
            Some(CppType::int().const_ref())
        );
        assert_eq!(
            CppType::parse("const char *"),
            Some(CppType::Pointer {
                pointee: Box::new(CppType::Char { signed: true }),
                is_const: true,
            })
        );
        assert_eq!(
            CppType::parse("Widget&&"),
            Some(CppType::Reference {
                referent: Box::new(CppType::named("Widget")),
                is_const: false,
                is_rvalue: true,
            })
        );
        assert_eq!(
            CppType::parse("int[4]"),
            Some(CppType::Array {
                element: Box::new(CppType::int()),
                size: Some(4),
            })
        );
    }

    #[test]
    fn test_parse_named_and_rejects() {
        assert_eq!(
            CppType::parse("std::vector<int>"),
            Some(CppType::named("std::vector<int>"))
        );
        assert_eq!(CppType::parse(""), None);
        assert_eq!(CppType::parse("3"), None);
        assert_eq!(CppType::parse("int[x]"), None);
    }

    #[test]
    fn test_spelling() {
        assert_eq!(CppType::int().ptr().spelling(), "int *");
        assert_eq!(CppType::int().const_ref().spelling(), "const int &");
        assert_eq!(CppType::Short { signed: false }.spelling(), "unsigned short");
        let param = CppType::TemplateParam {
            name: "T".to_string(),
            depth: 0,
            index: 0,
        };
        assert_eq!(param.to_string(), "T");
        assert!(param.clone().ptr().is_dependent());
        assert!(!CppType::int().is_dependent());
    }

    #[test]
    fn test_spelling_reparses() {
        for spelling in ["const int &", "unsigned char *", "Box<int>[3]", "long long &&"] {
            let ty = CppType::parse(spelling).expect("spelling should parse");
            assert_eq!(CppType::parse(&ty.spelling()), Some(ty));
        }
    }
}
