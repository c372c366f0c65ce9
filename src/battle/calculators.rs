use crate::battle::state::TurnRng;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::creature::CreatureInst;
use schema::{ElementType, MoveData};

/// Percentile gate for the critical-hit roll, approximating the classic
/// 1-in-16 ratio on the 1..=100 oracle.
pub const CRITICAL_HIT_CHANCE: u8 = 6;

/// Everything the resolver needs to narrate one damaging hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageDetails {
    pub damage: u16,
    pub critical: bool,
    pub type_effectiveness: f32,
}

/// Compute the damage one hit of a damaging move deals.
///
/// The base term is `((2 * level / 5 + 2) * power * attack / defense) / 50
/// + 2`, with the attack/defense pair chosen by the move's category and
/// scaled by the respective stat stages. That is then multiplied by the
/// critical multiplier (x2 on a critical), the product of the type
/// effectiveness against each of the defender's types, and a uniform roll
/// in [0.85, 1.00], and finally truncated. A connecting hit against a
/// non-immune target always deals at least 1.
///
/// Status-category moves never reach this function.
pub fn compute_damage(
    move_data: &MoveData,
    attacker: &CreatureInst,
    defender: &CreatureInst,
    rng: &mut TurnRng,
) -> DamageDetails {
    debug_assert!(
        move_data.is_damaging(),
        "damage requested for a status move"
    );

    let critical = rng.next_outcome("Critical Hit Check") <= CRITICAL_HIT_CHANCE;
    let critical_multiplier = if critical { 2.0 } else { 1.0 };

    let type_effectiveness: f32 = defender
        .types
        .iter()
        .map(|defense_type| ElementType::effectiveness(move_data.move_type, *defense_type))
        .product();

    let attack = effective_attack(attacker, move_data.category) as f32;
    let defense = effective_defense(defender, move_data.category).max(1) as f32;

    let roll = rng.next_in_range("Damage Roll", 85, 100) as f32 / 100.0;
    let modifiers = roll * type_effectiveness * critical_multiplier;

    let level_term = (2.0 * attacker.level as f32) / 5.0 + 2.0;
    let base = level_term * move_data.power as f32 * attack / defense / 50.0 + 2.0;

    let mut damage = (base * modifiers) as u16;
    if damage == 0 && type_effectiveness > 0.0 {
        damage = 1;
    }

    DamageDetails {
        damage,
        critical,
        type_effectiveness,
    }
}
