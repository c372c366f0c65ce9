//! Pluggable move-selection policies for the opposing side.

use crate::battle::combatant::Combatant;
use crate::battle::state::TurnRng;

/// A system that can pick the opposing side's move for a turn. The engine
/// only requires that the choice be legal; anything smarter is a drop-in
/// replacement.
pub trait Behavior {
    /// Pick the index of the move the combatant's active creature will use
    /// this turn, or `None` when no move has PP remaining.
    fn choose_action(&self, combatant: &Combatant, rng: &mut TurnRng) -> Option<usize>;
}

/// The default policy: a uniform pick among the moves that still have PP.
pub struct RandomPolicy;

impl Behavior for RandomPolicy {
    fn choose_action(&self, combatant: &Combatant, rng: &mut TurnRng) -> Option<usize> {
        let usable: Vec<usize> = combatant
            .active()
            .moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.pp > 0)
            .map(|(index, _)| index)
            .collect();

        if usable.is_empty() {
            return None;
        }

        let pick = rng.next_in_range("Enemy Move Selection", 1, usable.len() as u8) as usize - 1;
        Some(usable[pick])
    }
}
