//! Monster catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use hunt_core::{ActorId, MonsterActor, PartId, PartTemplate, StatusTrackSpec};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Authoring form of a monster sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub max_health: u32,
    pub max_stamina: u32,
    /// Parts in slot order; they become `Part0`, `Part1`, ...
    #[serde(default)]
    pub parts: Vec<PartTemplate>,
    /// Status tracks keyed by element name.
    #[serde(default)]
    pub statuses: BTreeMap<String, StatusTrackSpec>,
}

impl MonsterTemplate {
    /// Builds a fresh sheet; a template without parts gets the stock body.
    pub fn build(&self) -> MonsterActor {
        let mut monster = MonsterActor::new(
            ActorId::new(self.id.clone()),
            self.name.clone(),
            self.max_health,
            self.max_stamina,
        );

        if self.parts.is_empty() {
            monster = monster.with_part(PartId::indexed(0), PartTemplate::default());
        }
        for (index, part) in self.parts.iter().enumerate() {
            monster = monster.with_part(PartId::indexed(index), part.clone());
        }
        for (status, spec) in &self.statuses {
            monster = monster.with_status(status, *spec);
        }
        monster
    }
}

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn find(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn build_all(&self) -> Vec<MonsterActor> {
        self.monsters.iter().map(MonsterTemplate::build).collect()
    }
}

/// Loader for monster catalogs from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog and build every sheet in it.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterActor>> {
        Ok(Self::load_catalog(path)?.build_all())
    }

    pub fn load_catalog(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        tracing::debug!(monsters = catalog.monsters.len(), "monster catalog loaded");
        Ok(catalog)
    }
}
