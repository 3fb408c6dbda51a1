//! RON catalog loading.
//!
//! External catalogs are RON renderings of [`Catalog`]; the built-in
//! catalog serializes to the same format, so an exported builtin is a
//! valid starting point for a custom one.

use std::path::Path;

use anyhow::{Context, Result};

use crate::Catalog;

impl Catalog {
    /// Parses a catalog from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).context("parsing RON catalog")
    }

    /// Loads a catalog from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_ron(&text)
    }

    /// Renders the catalog as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing catalog to RON")
    }
}
