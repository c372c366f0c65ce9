//! The status-condition registry: a closed catalog of persistent and
//! volatile condition behaviors, dispatched by `match` on the condition
//! variant. Each hook is pure apart from mutating the creature it is handed
//! and writing to that creature's narration queue.

use crate::battle::state::TurnRng;
use crate::creature::CreatureInst;
use schema::{StatusKind, VolatileKind};
use serde::{Deserialize, Serialize};

/// A persistent status condition. At most one is held at a time and it
/// survives switching out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Poison,
    Burn,
    Paralysis,
    Freeze,
    Sleep { turns_remaining: u8 },
}

impl StatusCondition {
    /// Short HUD label for the condition.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCondition::Poison => "PSN",
            StatusCondition::Burn => "BRN",
            StatusCondition::Paralysis => "PAR",
            StatusCondition::Freeze => "FRZ",
            StatusCondition::Sleep { .. } => "SLP",
        }
    }

    fn start_message(&self) -> &'static str {
        match self {
            StatusCondition::Poison => "has been poisoned",
            StatusCondition::Burn => "has been burned",
            StatusCondition::Paralysis => "has been paralyzed",
            StatusCondition::Freeze => "has been frozen",
            StatusCondition::Sleep { .. } => "has fallen asleep",
        }
    }
}

/// A volatile condition. Coexists with a persistent status and clears when
/// the creature leaves the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatileCondition {
    Confusion { turns_remaining: u8 },
}

impl VolatileCondition {
    fn start_message(&self) -> &'static str {
        match self {
            VolatileCondition::Confusion { .. } => "has been confused",
        }
    }
}

/// Set a persistent status. Applying a second status while one is active is
/// a no-op: the first-applied condition wins and its counters are untouched.
pub fn apply_status(creature: &mut CreatureInst, kind: StatusKind, rng: &mut TurnRng) {
    if creature.status.is_some() {
        return;
    }

    let condition = match kind {
        StatusKind::Poison => StatusCondition::Poison,
        StatusKind::Burn => StatusCondition::Burn,
        StatusKind::Paralysis => StatusCondition::Paralysis,
        StatusKind::Freeze => StatusCondition::Freeze,
        StatusKind::Sleep => {
            let turns = rng.next_in_range("Sleep Duration", 1, 3);
            log::debug!("{} will be asleep for {} turns", creature.name, turns);
            StatusCondition::Sleep {
                turns_remaining: turns,
            }
        }
    };

    creature.push_status_change(format!("{} {}", creature.name, condition.start_message()));
    creature.status = Some(condition);
}

/// Set a volatile condition, replacing any prior one and re-rolling its
/// duration.
pub fn apply_volatile(creature: &mut CreatureInst, kind: VolatileKind, rng: &mut TurnRng) {
    let condition = match kind {
        VolatileKind::Confusion => {
            let turns = rng.next_in_range("Confusion Duration", 1, 4);
            log::debug!("{} will be confused for {} turns", creature.name, turns);
            VolatileCondition::Confusion {
                turns_remaining: turns,
            }
        }
    };

    creature.push_status_change(format!("{} {}", creature.name, condition.start_message()));
    creature.volatile_status = Some(condition);
}

/// Run the before-acting gates for the creature's conditions. Returns
/// whether the creature may act this turn.
///
/// The volatile gate runs even when the persistent gate already blocked the
/// action, so confusion counts down (and can hurt the creature) while it is
/// asleep or frozen.
pub fn before_act_gate(creature: &mut CreatureInst, rng: &mut TurnRng) -> bool {
    let mut can_act = true;

    match creature.status {
        Some(StatusCondition::Paralysis) => {
            if rng.next_outcome("Paralysis Check") <= 25 {
                creature.push_status_change(format!(
                    "{} is paralyzed and can't move",
                    creature.name
                ));
                can_act = false;
            }
        }
        Some(StatusCondition::Freeze) => {
            if rng.next_outcome("Thaw Check") <= 25 {
                creature.status = None;
                creature.push_status_change(format!("{} is not frozen anymore", creature.name));
            } else {
                creature.push_status_change(format!("{} is frozen solid", creature.name));
                can_act = false;
            }
        }
        Some(StatusCondition::Sleep { turns_remaining }) => {
            if turns_remaining == 0 {
                creature.status = None;
                creature.push_status_change(format!("{} woke up!", creature.name));
            } else {
                creature.status = Some(StatusCondition::Sleep {
                    turns_remaining: turns_remaining - 1,
                });
                creature.push_status_change(format!("{} is sleeping", creature.name));
                can_act = false;
            }
        }
        _ => {}
    }

    if let Some(VolatileCondition::Confusion { turns_remaining }) = creature.volatile_status {
        if turns_remaining == 0 {
            creature.volatile_status = None;
            creature.push_status_change(format!("{} is no longer confused!", creature.name));
        } else {
            creature.volatile_status = Some(VolatileCondition::Confusion {
                turns_remaining: turns_remaining - 1,
            });

            if rng.next_outcome("Confusion Check") > 50 {
                let hurt = (creature.max_hp() / 8).max(1);
                creature.push_status_change(format!("{} is confused", creature.name));
                creature.take_damage(hurt);
                creature
                    .push_status_change(format!("{} hurt itself in its confusion", creature.name));
                can_act = false;
            }
        }
    }

    can_act
}

/// Run the end-of-turn hooks for the creature's persistent status after its
/// action this turn resolved. Damage floors at zero HP.
pub fn end_of_turn(creature: &mut CreatureInst) {
    match creature.status {
        Some(StatusCondition::Poison) => {
            let hurt = (creature.max_hp() / 8).max(1);
            creature.take_damage(hurt);
            creature.push_status_change(format!("{} is hurt by poison", creature.name));
        }
        Some(StatusCondition::Burn) => {
            let hurt = (creature.max_hp() / 16).max(1);
            creature.take_damage(hurt);
            creature.push_status_change(format!("{} is hurt by its burn", creature.name));
        }
        _ => {}
    }
}
