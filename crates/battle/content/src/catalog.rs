//! The catalog container backing the `Definitions` oracle.

use battle_core::defs::{
    CreepDefinition, CreepType, Definitions, HeroDefinition, HeroType, ItemDefinition, ItemId,
    MinionDefinition, MinionType, SpellDefinition, SpellId,
};

/// A complete set of definition tables.
///
/// Lookups are linear scans; the tables are tiny and read once per
/// produced action, so an index would buy nothing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub heroes: Vec<HeroDefinition>,
    pub creeps: Vec<CreepDefinition>,
    pub minions: Vec<MinionDefinition>,
    pub items: Vec<ItemDefinition>,
    pub spells: Vec<SpellDefinition>,
}

impl Definitions for Catalog {
    fn hero(&self, kind: HeroType) -> Option<&HeroDefinition> {
        self.heroes.iter().find(|d| d.kind == kind)
    }

    fn creep(&self, kind: CreepType) -> Option<&CreepDefinition> {
        self.creeps.iter().find(|d| d.kind == kind)
    }

    fn minion(&self, kind: MinionType) -> Option<&MinionDefinition> {
        self.minions.iter().find(|d| d.kind == kind)
    }

    fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.iter().find(|d| d.id == id)
    }

    fn spell(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.iter().find(|d| d.id == id)
    }
}
