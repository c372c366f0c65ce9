use crate::creature::CreatureInst;
use crate::errors::{BattleResult, BattleStateError};
use serde::{Deserialize, Serialize};

/// An action submitted by the input layer while the engine is collecting
/// input for a turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PlayerAction {
    /// The index refers to the move's position in the active creature's
    /// move list.
    UseMove { move_index: usize },

    /// The index refers to the creature's position in the party.
    SwitchTo { party_index: usize },

    /// Use an item from the bag. No item table exists in this subsystem, so
    /// the engine rejects these as invalid actions.
    UseItem { item_id: String },

    /// Flee from the battle.
    Run,
}

/// One side of the battle: a party of creatures and the index of the one
/// currently on the field.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Combatant {
    pub name: String,
    party: Vec<CreatureInst>,
    active_index: usize,
}

impl Combatant {
    /// Create a combatant. The first healthy party member starts on the
    /// field.
    pub fn new(name: impl Into<String>, party: Vec<CreatureInst>) -> BattleResult<Self> {
        if party.is_empty() {
            return Err(BattleStateError::EmptyParty.into());
        }
        let active_index = party
            .iter()
            .position(|creature| !creature.is_fainted())
            .unwrap_or(0);

        Ok(Combatant {
            name: name.into(),
            party,
            active_index,
        })
    }

    /// The creature currently on the field.
    pub fn active(&self) -> &CreatureInst {
        &self.party[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut CreatureInst {
        &mut self.party[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn party(&self) -> &[CreatureInst] {
        &self.party
    }

    pub(crate) fn party_mut(&mut self) -> &mut [CreatureInst] {
        &mut self.party
    }

    /// Bind a different party member to the field. The caller validates the
    /// index.
    pub(crate) fn set_active(&mut self, index: usize) {
        debug_assert!(index < self.party.len());
        self.active_index = index;
    }

    /// Whether any party member can still fight.
    pub fn has_healthy(&self) -> bool {
        self.party.iter().any(|creature| !creature.is_fainted())
    }

    /// The first healthy creature that is not already on the field, if any.
    /// Used to satisfy a forced replacement.
    pub fn first_healthy_replacement(&self) -> Option<usize> {
        self.party
            .iter()
            .enumerate()
            .find(|(index, creature)| *index != self.active_index && !creature.is_fainted())
            .map(|(index, _)| index)
    }
}
