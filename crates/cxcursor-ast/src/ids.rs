//! Typed indices into the arenas of a translation unit.
//!
//! Entity ids are only meaningful together with the [`UnitId`] of the unit
//! that allocated them. A `UnitId` carries the generation of its slot in the
//! [`Index`](crate::Index), so an id that outlived its unit is detected
//! instead of silently aliasing whatever took the slot over.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub fn as_u32(self) -> u32 {
                self.0
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// A declaration in a translation unit.
    DeclId,
    "decl#"
);
arena_id!(
    /// A base-class specifier in a translation unit.
    BaseId,
    "base#"
);
arena_id!(
    /// A type in a translation unit.
    TypeId,
    "type#"
);
arena_id!(
    /// An expression in a translation unit.
    ExprId,
    "expr#"
);

/// Identifies a translation unit registered in an [`Index`](crate::Index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl UnitId {
    pub fn slot(self) -> u32 {
        self.slot
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}.{}", self.slot, self.generation)
    }
}
