use std::{cmp::Ordering, collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::Rgb8,
    error::{TernError, TernResult},
};

/// Fill used for selected entities that have no catalog entry.
pub const FALLBACK_COLOR: Rgb8 = Rgb8::new(0x94, 0xa3, 0xb8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Aggregate regions are listed before individual countries.
pub enum EntityKind {
    Region,
    Country,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Display metadata for one entity.
pub struct EntityInfo {
    pub kind: EntityKind,
    pub color: Rgb8,
    /// Three-letter label.
    pub short: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Known entities with their colors, and the initial selection.
pub struct Catalog {
    entities: BTreeMap<String, EntityInfo>,
    #[serde(default)]
    default_selection: Vec<String>,
}

const REGIONS: &[(&str, &str, &str)] = &[
    ("Asia (Total)", "#fca5a5", "ASI"),
    ("Europe", "#3b82f6", "EUR"),
    ("Former Soviet Union", "#818cf8", "FSU"),
    ("Latin America & Caribbean", "#fbbf24", "LAC"),
    ("Middle East & Africa", "#f472b6", "MEA"),
    ("North America", "#7c3aed", "NAM"),
    ("OECD (1990 Members)", "#34d399", "O90"),
    ("World", "#000000", "WLD"),
];

const COUNTRIES: &[(&str, &str, &str)] = &[
    ("Australia", "#0d9488", "AUS"),
    ("Brazil", "#16a34a", "BRA"),
    ("Canada", "#9333ea", "CAN"),
    ("China", "#dc2626", "CHN"),
    ("France", "#0891b2", "FRA"),
    ("Germany", "#d97706", "DEU"),
    ("India", "#ea580c", "IND"),
    ("Italy", "#65a30d", "ITA"),
    ("Japan", "#db2777", "JPN"),
    ("Nigeria", "#ca8a04", "NGA"),
    ("Poland", "#dc2626", "POL"),
    ("South Africa", "#e11d48", "ZAF"),
    ("United States", "#2563eb", "USA"),
];

const DEFAULT_SELECTION: &[&str] = &[
    "United States",
    "China",
    "Germany",
    "India",
    "Brazil",
    "World",
    "Europe",
];

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Regions and countries shipped with the chart.
    pub fn builtin() -> Self {
        let mut entities = BTreeMap::new();
        for (table, kind) in [(REGIONS, EntityKind::Region), (COUNTRIES, EntityKind::Country)] {
            for &(name, hex, short) in table {
                let color = Rgb8::from_hex(hex).unwrap_or(FALLBACK_COLOR);
                entities.insert(
                    name.to_string(),
                    EntityInfo {
                        kind,
                        color,
                        short: short.to_string(),
                    },
                );
            }
        }
        Self {
            entities,
            default_selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn new(entities: BTreeMap<String, EntityInfo>, default_selection: Vec<String>) -> Self {
        Self {
            entities,
            default_selection,
        }
    }

    pub fn from_json_path(path: &Path) -> TernResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        let catalog: Self =
            serde_json::from_str(&text).map_err(|e| TernError::serde(format!("catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> TernResult<()> {
        for name in &self.default_selection {
            if !self.entities.contains_key(name) {
                return Err(TernError::validation(format!(
                    "default selection '{name}' is not in the catalog"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntityInfo> {
        self.entities.get(name)
    }

    pub fn kind(&self, name: &str) -> Option<EntityKind> {
        self.get(name).map(|e| e.kind)
    }

    pub fn color(&self, name: &str) -> Rgb8 {
        self.get(name).map_or(FALLBACK_COLOR, |e| e.color)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All catalog names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.display_order(self.entities.keys().map(String::as_str))
    }

    /// Names of one kind, alphabetical.
    pub fn names_of(&self, kind: EntityKind) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn default_selection(&self) -> &[String] {
        &self.default_selection
    }

    /// Regions first, then countries, then names unknown to the catalog; alphabetical within each.
    pub fn display_order<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut out: Vec<&str> = names.into_iter().collect();
        out.sort_by(|a, b| self.display_cmp(a, b));
        out.dedup();
        out
    }

    /// Ordering behind [`Catalog::display_order`].
    pub fn display_cmp(&self, a: &str, b: &str) -> Ordering {
        let rank = |n: &str| match self.kind(n) {
            Some(EntityKind::Region) => 0u8,
            Some(EntityKind::Country) => 1,
            None => 2,
        };
        rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/catalog.rs"]
mod tests;
