//! Definition catalogs for the battle simulation.
//!
//! `battle-content` supplies the immutable data the core reads through its
//! `Definitions` oracle: hero, creep, and minion stat blocks, ability
//! shapes, item prices and effects, and spell payloads. The built-in
//! catalog is constructed in code; with the `loaders` feature, external
//! catalogs load from RON files into the same [`Catalog`] type.

mod builtin;
mod catalog;
#[cfg(feature = "loaders")]
mod loader;

pub use builtin::builtin;
pub use catalog::Catalog;
