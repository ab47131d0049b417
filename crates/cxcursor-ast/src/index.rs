//! The index owning every live translation unit.

use tracing::debug;

use crate::error::{AstError, Result};
use crate::ids::UnitId;
use crate::unit::{TranslationUnit, UnitBuilder};

/// Owns translation units in generation-checked slots.
///
/// Disposing a unit bumps its slot's generation, so ids (and cursors) that
/// still name the old generation fail with [`AstError::StaleUnit`] even
/// after the slot has been reused.
#[derive(Debug, Default)]
pub struct Index {
    slots: Vec<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    unit: Option<TranslationUnit>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a unit, returning its id.
    pub fn add(&mut self, builder: UnitBuilder) -> Result<UnitId> {
        let slot = match self.slots.iter().position(|slot| slot.unit.is_none()) {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let id = UnitId {
            slot: slot as u32,
            generation: self.slots[slot].generation,
        };
        let unit = builder.build(id)?;
        debug!(unit = %id, name = unit.name(), decls = unit.decl_count(), "registered translation unit");
        self.slots[slot].unit = Some(unit);
        Ok(id)
    }

    /// Look up a live unit.
    pub fn unit(&self, id: UnitId) -> Result<&TranslationUnit> {
        self.slots
            .get(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.unit.as_ref())
            .ok_or(AstError::StaleUnit(id))
    }

    pub fn is_alive(&self, id: UnitId) -> bool {
        self.unit(id).is_ok()
    }

    /// Tear a unit down. Every id into it becomes stale.
    pub fn dispose(&mut self, id: UnitId) -> Result<TranslationUnit> {
        let slot = self
            .slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation && slot.unit.is_some())
            .ok_or(AstError::StaleUnit(id))?;
        let unit = slot.unit.take().ok_or(AstError::StaleUnit(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        debug!(unit = %id, name = unit.name(), "disposed translation unit");
        Ok(unit)
    }

    /// Live units in slot order.
    pub fn units(&self) -> impl Iterator<Item = &TranslationUnit> + '_ {
        self.slots.iter().filter_map(|slot| slot.unit.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Decl, DeclKind, RecordDecl, TagKind};
    use crate::decl::AccessSpecifier;
    use crate::ids::DeclId;
    use crate::types::CppType;

    fn unit_with_struct(name: &str) -> UnitBuilder {
        let mut builder = UnitBuilder::new(name);
        builder.add_decl(Decl::new("Point", DeclKind::Record(RecordDecl::new(TagKind::Struct))));
        builder
    }

    #[test]
    fn test_add_and_lookup() {
        let mut index = Index::new();
        let id = index.add(unit_with_struct("a.cpp")).expect("unit should build");

        let unit = index.unit(id).expect("unit should be alive");
        assert_eq!(unit.name(), "a.cpp");
        assert_eq!(unit.id(), id);
        assert_eq!(unit.find_decl("Point"), Some(DeclId(0)));
        assert_eq!(unit.find_decl("Missing"), None);
    }

    #[test]
    fn test_dispose_makes_ids_stale() {
        let mut index = Index::new();
        let id = index.add(unit_with_struct("a.cpp")).unwrap();

        index.dispose(id).expect("first dispose succeeds");
        assert!(!index.is_alive(id));
        assert_eq!(index.unit(id).unwrap_err(), AstError::StaleUnit(id));
        assert_eq!(index.dispose(id).unwrap_err(), AstError::StaleUnit(id));
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_ids() {
        let mut index = Index::new();
        let old = index.add(unit_with_struct("a.cpp")).unwrap();
        index.dispose(old).unwrap();

        let new = index.add(unit_with_struct("b.cpp")).unwrap();
        assert_eq!(old.slot(), new.slot());
        assert_ne!(old, new);
        assert!(index.unit(old).is_err());
        assert_eq!(index.unit(new).unwrap().name(), "b.cpp");
        assert_eq!(index.units().count(), 1);
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let mut builder = UnitBuilder::new("bad.cpp");
        builder.add_decl(Decl::new("x", DeclKind::Namespace).with_parent(DeclId(7)));

        let err = Index::new().add(builder).unwrap_err();
        assert!(matches!(err, AstError::DanglingDecl { target: DeclId(7), .. }));
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn test_base_requires_record_owner() {
        let mut builder = UnitBuilder::new("bases.cpp");
        let ns = builder.add_decl(Decl::new("ns", DeclKind::Namespace));
        let record = builder.add_decl(Decl::new(
            "Derived",
            DeclKind::Record(RecordDecl::new(TagKind::Class)),
        ));
        let base_ty = builder.add_type(CppType::named("Base"));

        assert_eq!(
            builder.add_base(ns, base_ty, AccessSpecifier::Public, false),
            Err(AstError::NotARecord(ns))
        );
        let base = builder
            .add_base(record, base_ty, AccessSpecifier::Protected, true)
            .expect("records accept bases");

        let mut index = Index::new();
        let id = index.add(builder).unwrap();
        let unit = index.unit(id).unwrap();
        assert_eq!(unit.bases_of(record), &[base]);
        assert!(unit.base(base).unwrap().is_virtual());
        assert_eq!(unit.base(base).unwrap().owner, record);
    }

    #[test]
    fn test_types_are_interned() {
        let mut builder = UnitBuilder::new("types.cpp");
        let a = builder.add_type(CppType::int().ptr());
        let b = builder.add_type(CppType::int().ptr());
        let c = builder.add_type(CppType::int());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
