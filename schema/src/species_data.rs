use crate::element_types::ElementType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

/// One entry in a species' learnset: the registry key of a move and the
/// level at which it is unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMove {
    pub move_key: String,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// One or two element types.
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub learnset: Vec<LearnableMove>,
}

impl SpeciesData {
    /// The move keys a creature of this species would know at `level`: the
    /// four most recently unlocked learnset entries.
    pub fn moves_known_at(&self, level: u8) -> Vec<String> {
        let mut known: Vec<&LearnableMove> = self
            .learnset
            .iter()
            .filter(|entry| entry.level <= level)
            .collect();
        known.sort_by_key(|entry| entry.level);

        known
            .into_iter()
            .rev()
            .take(4)
            .rev()
            .map(|entry| entry.move_key.clone())
            .collect()
    }
}
