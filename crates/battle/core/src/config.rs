/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    pub grid_width: u32,
    pub grid_height: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum cards a player can hold; draws past this discard.
    pub const MAX_HAND_SIZE: usize = 6;

    // ===== rule constants =====
    pub const STARTING_GOLD: i32 = 100;
    /// Gold paid to the owner of a hero that kills an enemy hero.
    pub const HERO_KILL_BOUNTY: i32 = 50;
    /// Experience granted per kill.
    pub const XP_PER_KILL: u32 = 50;
    /// Experience required per hero level.
    pub const XP_PER_LEVEL: u32 = 100;
    pub const MAX_HERO_LEVEL: u8 = 5;
    /// Gold granted by a gold rune.
    pub const GOLD_RUNE_VALUE: i32 = 50;
    /// Health restored by a regeneration rune.
    pub const REGENERATION_RUNE_HEAL: i32 = 8;
    /// Move points granted by a haste rune while its modifier lasts.
    pub const HASTE_RUNE_MOVE_BONUS: i32 = 2;
    /// Turns a haste rune's modifier lasts.
    pub const HASTE_RUNE_DURATION: u8 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_WIDTH: u32 = 12;
    pub const DEFAULT_GRID_HEIGHT: u32 = 12;

    pub fn new() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
        }
    }

    pub fn with_grid(grid_width: u32, grid_height: u32) -> Self {
        Self {
            grid_width,
            grid_height,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
