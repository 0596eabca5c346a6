use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LensError, LensResult};

/// One selectable scenario and the artifact that backs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub id: String,
    pub name: String,
    pub file: String,
}

impl ScenarioEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Ordered scenario list, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScenarioCatalog {
    entries: IndexMap<String, ScenarioEntry>,
}

impl ScenarioCatalog {
    /// Builds a catalog, rejecting empty fields and duplicate ids.
    pub fn new(entries: Vec<ScenarioEntry>) -> LensResult<Self> {
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            if entry.id.is_empty() || entry.file.is_empty() {
                return Err(LensError::InvalidConfig(
                    "scenario id and file must not be empty".to_owned(),
                ));
            }
            if map.contains_key(&entry.id) {
                return Err(LensError::InvalidConfig(format!(
                    "duplicate scenario id `{}`",
                    entry.id
                )));
            }
            map.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    pub fn from_json_str(input: &str) -> LensResult<Self> {
        let entries: Vec<ScenarioEntry> = serde_json::from_str(input)
            .map_err(|e| LensError::Load(format!("failed to parse scenario catalog: {e}")))?;
        Self::new(entries)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ScenarioEntry> {
        self.entries.get(id)
    }

    pub fn resolve(&self, id: &str) -> LensResult<&ScenarioEntry> {
        self.get(id)
            .ok_or_else(|| LensError::UnknownScenario(id.to_owned()))
    }

    /// Scenario shown before the user picks one.
    #[must_use]
    pub fn default_entry(&self) -> Option<&ScenarioEntry> {
        self.entries.first().map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScenarioCatalog, ScenarioEntry};
    use crate::error::LensError;

    #[test]
    fn catalog_keeps_order_and_resolves_ids() {
        let catalog = ScenarioCatalog::from_json_str(
            r#"[
                {"id": "pythag", "name": "Pythagorean", "file": "pythag.json"},
                {"id": "fig8", "name": "Figure eight", "file": "fig8.json"}
            ]"#,
        )
        .expect("catalog");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.default_entry().map(|entry| entry.id.as_str()), Some("pythag"));
        assert_eq!(catalog.resolve("fig8").expect("known").file, "fig8.json");
        assert_eq!(
            catalog.resolve("nope"),
            Err(LensError::UnknownScenario("nope".to_owned()))
        );
    }

    #[test]
    fn duplicate_or_empty_ids_are_rejected() {
        let duplicate = ScenarioCatalog::new(vec![
            ScenarioEntry::new("a", "A", "a.json"),
            ScenarioEntry::new("a", "A again", "a2.json"),
        ]);
        assert!(matches!(duplicate, Err(LensError::InvalidConfig(_))));

        let empty = ScenarioCatalog::new(vec![ScenarioEntry::new("", "A", "a.json")]);
        assert!(matches!(empty, Err(LensError::InvalidConfig(_))));
    }
}
