//! Executes one move: status gate, PP spend, hit check, damage or effect
//! application, secondary effects, faint notification and the actor's
//! end-of-turn status tick, in that order. Every step appends to the turn
//! script; partial results (HP already applied) are visible to later steps.

use crate::battle::calculators::compute_damage;
use crate::battle::conditions;
use crate::battle::state::{BattleEvent, BattleState, CombatantSlot, EventBus, TurnRng};
use crate::battle::stats::move_hits;
use crate::creature::CreatureInst;
use crate::errors::BattleResult;
use schema::{EffectSpec, MoveCategory, MoveTarget};

/// Resolve one use of the move in `move_index` by the creature active in
/// `attacker_slot` against the opposing slot.
pub(crate) fn execute_move(
    state: &mut BattleState,
    attacker_slot: CombatantSlot,
    move_index: usize,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let defender_slot = attacker_slot.opponent();

    // 1. Status gate. Blocked actors spend no PP and take no end-of-turn
    //    tick; confusion self-damage surfaces here.
    let gate_passed = run_before_act_gate(state, attacker_slot, bus, rng);
    if !gate_passed {
        if state.active(attacker_slot).is_fainted() {
            announce_faint(state, attacker_slot, bus);
        }
        return Ok(());
    }

    // 2. Spend PP and announce the move.
    let actor_name = state.active(attacker_slot).name.clone();
    let move_data = {
        let slot = &mut state.active_mut(attacker_slot).moves[move_index];
        let data = slot.data()?;
        slot.pp = slot.pp.saturating_sub(1);
        data
    };
    bus.push(BattleEvent::Message {
        text: format!("{} used {}!", actor_name, move_data.name),
    });

    // 3. Hit check.
    let hit = move_hits(
        &move_data,
        state.active(attacker_slot),
        state.active(defender_slot),
        rng,
    );

    if !hit {
        bus.push(BattleEvent::Message {
            text: format!("{}'s attack missed", actor_name),
        });
    } else {
        // 4. Primary outcome: effect bundle for Status moves, damage
        //    otherwise.
        if move_data.category == MoveCategory::Status {
            apply_effect_spec(state, &move_data.effects, attacker_slot, move_data.target, bus, rng);
        } else {
            let details = compute_damage(
                &move_data,
                state.active(attacker_slot),
                state.active(defender_slot),
                rng,
            );

            let defender = state.active_mut(defender_slot);
            defender.take_damage(details.damage);
            let hp_fraction = defender.hp_fraction();
            bus.push(BattleEvent::HpChanged {
                slot: defender_slot,
                hp_fraction,
            });

            if details.critical {
                bus.push(BattleEvent::Message {
                    text: "A critical hit!".to_string(),
                });
            }
            if details.type_effectiveness > 1.0 {
                bus.push(BattleEvent::Message {
                    text: "It's super effective!".to_string(),
                });
            } else if details.type_effectiveness == 0.0 {
                bus.push(BattleEvent::Message {
                    text: "It had no effect!".to_string(),
                });
            } else if details.type_effectiveness < 1.0 {
                bus.push(BattleEvent::Message {
                    text: "It's not very effective!".to_string(),
                });
            }
        }

        // 5. Secondary effects: each rolls independently and only lands if
        //    its declared target is still standing.
        for secondary in &move_data.secondaries {
            let recipient_slot = match secondary.target {
                MoveTarget::User => attacker_slot,
                MoveTarget::Target => defender_slot,
            };
            if state.active(recipient_slot).is_fainted() {
                continue;
            }
            if rng.next_outcome("Secondary Effect Chance") <= secondary.chance {
                apply_effect_spec(state, &secondary.effects, attacker_slot, secondary.target, bus, rng);
            }
        }

        // 6. Faint check on the target.
        if state.active(defender_slot).is_fainted() {
            announce_faint(state, defender_slot, bus);
        }
    }

    // 7. End-of-turn status tick on the actor (poison, burn), with a faint
    //    re-check. Runs after a miss too, but not after a blocked gate.
    let actor = state.active_mut(attacker_slot);
    if !actor.is_fainted() {
        let hp_before = actor.hp();
        conditions::end_of_turn(actor);
        drain_messages(actor, bus);

        let actor = state.active(attacker_slot);
        if actor.hp() != hp_before {
            bus.push(BattleEvent::HpChanged {
                slot: attacker_slot,
                hp_fraction: actor.hp_fraction(),
            });
        }
        if actor.is_fainted() {
            announce_faint(state, attacker_slot, bus);
        }
    }

    Ok(())
}

/// Run both condition gates for the actor and emit everything they
/// produced: narration, an HP change from confusion self-damage, and a
/// status label change from waking up or thawing.
fn run_before_act_gate(
    state: &mut BattleState,
    slot: CombatantSlot,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> bool {
    let actor = state.active_mut(slot);
    let label_before = actor.status_label();
    let hp_before = actor.hp();

    let can_act = conditions::before_act_gate(actor, rng);
    drain_messages(actor, bus);

    let actor = state.active(slot);
    if actor.status_label() != label_before {
        bus.push(BattleEvent::StatusChanged {
            slot,
            status: actor.status_label().map(str::to_string),
        });
    }
    if actor.hp() != hp_before {
        bus.push(BattleEvent::HpChanged {
            slot,
            hp_fraction: actor.hp_fraction(),
        });
    }

    can_act
}

/// Apply an effect bundle to the slot its declared target resolves to:
/// stat stages, persistent status and volatile status, each with its own
/// narration and mutual-exclusivity rules.
fn apply_effect_spec(
    state: &mut BattleState,
    effects: &EffectSpec,
    user_slot: CombatantSlot,
    declared_target: MoveTarget,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    let recipient_slot = match declared_target {
        MoveTarget::User => user_slot,
        MoveTarget::Target => user_slot.opponent(),
    };

    let recipient = state.active_mut(recipient_slot);
    let label_before = recipient.status_label();

    if !effects.boosts.is_empty() {
        recipient.apply_boosts(&effects.boosts);
    }
    if let Some(kind) = effects.status {
        conditions::apply_status(recipient, kind, rng);
    }
    if let Some(kind) = effects.volatile_status {
        conditions::apply_volatile(recipient, kind, rng);
    }

    drain_messages(recipient, bus);

    let recipient = state.active(recipient_slot);
    if recipient.status_label() != label_before {
        bus.push(BattleEvent::StatusChanged {
            slot: recipient_slot,
            status: recipient.status_label().map(str::to_string),
        });
    }
}

/// Move the creature's queued narration lines into the script, in order.
pub(crate) fn drain_messages(creature: &mut CreatureInst, bus: &mut EventBus) {
    for text in creature.drain_status_changes() {
        bus.push(BattleEvent::Message { text });
    }
}

/// Emit the faint notification for a slot's active creature.
pub(crate) fn announce_faint(state: &BattleState, slot: CombatantSlot, bus: &mut EventBus) {
    bus.push(BattleEvent::Message {
        text: format!("{} fainted!", state.active(slot).name),
    });
    bus.push(BattleEvent::Fainted { slot });
}
