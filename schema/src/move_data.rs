use crate::element_types::ElementType;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Which side of the field an effect bundle lands on, relative to the
/// creature using the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    User,
    Target,
}

impl Default for MoveTarget {
    fn default() -> Self {
        MoveTarget::Target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StatKind {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Atk")]
    SpAttack,
    #[strum(to_string = "Sp. Def")]
    SpDefense,
    Speed,
    #[strum(to_string = "accuracy")]
    Accuracy,
    #[strum(to_string = "evasiveness")]
    Evasion,
}

/// Persistent status conditions a move can inflict. Mutually exclusive on a
/// creature; the engine attaches duration payloads where relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Burn,
    Paralysis,
    Freeze,
    Sleep,
}

/// Volatile conditions a move can inflict. These coexist with a persistent
/// status and clear when the creature leaves the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatileKind {
    Confusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: StatKind,
    pub stages: i8,
}

/// The bundle of changes a move's primary or secondary effect applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    #[serde(default)]
    pub boosts: Vec<StatBoost>,
    #[serde(default)]
    pub status: Option<StatusKind>,
    #[serde(default)]
    pub volatile_status: Option<VolatileKind>,
}

impl EffectSpec {
    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty() && self.status.is_none() && self.volatile_status.is_none()
    }
}

/// A secondary effect with its own independent trigger chance and target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    /// Percent chance (1-100) that the bundle applies after the move hits.
    pub chance: u8,
    #[serde(default)]
    pub target: MoveTarget,
    pub effects: EffectSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: ElementType,
    pub category: MoveCategory,
    /// Base power; 0 for Status-category moves.
    #[serde(default)]
    pub power: u8,
    /// Hit chance out of 100. `None` means the move never misses.
    pub accuracy: Option<u8>,
    /// Higher priority resolves first regardless of speed.
    #[serde(default)]
    pub priority: i8,
    pub max_pp: u8,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub effects: EffectSpec,
    #[serde(default)]
    pub secondaries: Vec<SecondaryEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        matches!(self.category, MoveCategory::Physical | MoveCategory::Special)
    }
}
