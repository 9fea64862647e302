//! Data-driven content definitions and loaders.
//!
//! Monster catalogs and weapon lists are authored in RON, rules overrides in
//! TOML. Loaders turn them into `hunt-core` types; nothing in this crate
//! holds encounter state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, MonsterCatalog, MonsterLoader, MonsterTemplate,
    WeaponCatalog, WeaponLoader,
};

/// Stock data shipped with the crate, used when no data directory is given.
pub mod builtin {
    pub const MONSTERS: &str = include_str!("../data/monsters.ron");
    pub const WEAPONS: &str = include_str!("../data/weapons.ron");
    pub const RULES: &str = include_str!("../data/rules.toml");
}
