use crate::battle::state::TurnRng;
use crate::creature::CreatureInst;
use schema::{MoveCategory, MoveData, StatKind};

/// Multiplier table shared by accuracy and evasion stages. A positive stage
/// multiplies by the entry at that index; a negative stage divides by the
/// entry at its absolute value.
pub const ACCURACY_STAGE_TABLE: [f32; 7] = [
    1.0,
    4.0 / 3.0,
    5.0 / 3.0,
    2.0,
    7.0 / 3.0,
    8.0 / 3.0,
    3.0,
];

/// Accuracy/evasion multiplier for a stage in -6..=6.
pub fn accuracy_stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(-6, 6);
    if stage >= 0 {
        ACCURACY_STAGE_TABLE[stage as usize]
    } else {
        1.0 / ACCURACY_STAGE_TABLE[(-stage) as usize]
    }
}

/// General stat-stage multiplier for attack, defense and speed.
/// Positive stages: `(2 + stage) / 2`; negative stages: `2 / (2 + |stage|)`,
/// i.e. the {1, 1.5, 2, ..., 4} ladder in closed form.
pub fn stat_stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(-6, 6) as f32;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

/// A base stat scaled by its current stage.
pub fn effective_stat(base: u16, stage: i8) -> u16 {
    ((base as f32) * stat_stage_multiplier(stage)).round() as u16
}

/// The attacking stat a move draws on, scaled by the attacker's stage.
/// Status moves draw on no stat.
pub fn effective_attack(creature: &CreatureInst, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => {
            effective_stat(creature.attack(), creature.stat_stage(StatKind::Attack))
        }
        MoveCategory::Special => {
            effective_stat(creature.sp_attack(), creature.stat_stage(StatKind::SpAttack))
        }
        MoveCategory::Status => 0,
    }
}

/// The defending stat a move is resisted with, scaled by the defender's
/// stage.
pub fn effective_defense(creature: &CreatureInst, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => {
            effective_stat(creature.defense(), creature.stat_stage(StatKind::Defense))
        }
        MoveCategory::Special => effective_stat(
            creature.sp_defense(),
            creature.stat_stage(StatKind::SpDefense),
        ),
        MoveCategory::Status => 0,
    }
}

/// Speed used for turn ordering, scaled by the creature's Speed stage.
pub fn effective_speed(creature: &CreatureInst) -> u16 {
    effective_stat(creature.speed(), creature.stat_stage(StatKind::Speed))
}

/// Effective accuracy before the hit roll: the move's base accuracy times
/// the attacker's accuracy multiplier, divided by the defender's evasion
/// multiplier. Uncapped; the hit check clamps before rolling.
pub fn effective_accuracy(base_accuracy: u8, accuracy_stage: i8, evasion_stage: i8) -> f32 {
    base_accuracy as f32 * accuracy_stage_multiplier(accuracy_stage)
        / accuracy_stage_multiplier(evasion_stage)
}

/// Roll whether a move connects. Moves without an accuracy value never
/// miss. Effective accuracy is clamped to 1..=100 so the percentile roll
/// semantics are preserved.
pub fn move_hits(
    move_data: &MoveData,
    attacker: &CreatureInst,
    defender: &CreatureInst,
    rng: &mut TurnRng,
) -> bool {
    let Some(base_accuracy) = move_data.accuracy else {
        return true;
    };

    let chance = effective_accuracy(
        base_accuracy,
        attacker.stat_stage(StatKind::Accuracy),
        defender.stat_stage(StatKind::Evasion),
    );
    let clamped = chance.round().clamp(1.0, 100.0) as u8;

    rng.next_outcome("Accuracy Check") <= clamped
}
