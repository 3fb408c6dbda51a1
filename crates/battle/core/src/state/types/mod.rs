pub mod ability;
pub mod common;
pub mod modifier;
pub mod player;
pub mod props;
pub mod unit;

pub use ability::{Ability, AbilityKind, BenchedAbility};
pub use common::{
    AbilityId, ModifierHandle, ModifierId, PlayerId, Position, RuneId, ShopId, Source, TreeId,
    UnitId,
};
pub use modifier::{Modifier, ModifierChange, ModifierKind};
pub use player::{Card, DeploymentZone, Player};
pub use props::{Rune, RuneType, Shop, Tree};
pub use unit::{
    Attack, BaseStats, BonusStats, HeroState, SpecialState, StatField, Status, Unit, UnitKind,
};
