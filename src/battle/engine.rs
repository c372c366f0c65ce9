//! The top-level battle state machine: validates submitted actions, orders
//! the turn's two actions, drives the move resolver, and tracks forced
//! replacements and the battle-over condition.

use crate::battle::ai::{Behavior, RandomPolicy};
use crate::battle::combatant::{Combatant, PlayerAction};
use crate::battle::resolver::execute_move;
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattleState, CombatantSlot, EnginePhase, EventBus, TurnRng,
};
use crate::battle::stats::effective_speed;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct BattleEngine {
    state: BattleState,
    policy: Box<dyn Behavior>,
    rng: StdRng,
}

impl BattleEngine {
    /// Create an engine with a random seed and the default random opposing
    /// policy.
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        Self::with_seed(player, opponent, rand::rng().random())
    }

    /// Create an engine whose whole battle is reproducible from `seed`.
    pub fn with_seed(player: Combatant, opponent: Combatant, seed: u64) -> Self {
        BattleEngine {
            state: BattleState::new(player, opponent),
            policy: Box::new(RandomPolicy),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Swap the opposing side's move-selection policy.
    pub fn set_policy(&mut self, policy: Box<dyn Behavior>) {
        self.policy = policy;
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> EnginePhase {
        self.state.phase
    }

    /// The battle-opening script.
    pub fn start(&mut self) -> EventBus {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::Message {
            text: format!(
                "A wild {} appeared!",
                self.state.active(CombatantSlot::Opponent).name
            ),
        });
        bus.push(BattleEvent::Message {
            text: format!("Go {}!", self.state.active(CombatantSlot::Player).name),
        });
        bus
    }

    /// Submit the player's action for this turn and resolve it, returning
    /// the turn's event script. Uses a fresh oracle derived from the
    /// engine's seed.
    pub fn submit_action(&mut self, action: PlayerAction) -> BattleResult<EventBus> {
        let rng = TurnRng::from_seed(self.rng.random());
        self.submit_action_with_rng(action, rng)
    }

    /// Submit the player's action with an explicit outcome oracle. Tests
    /// script the oracle to force hits, misses, criticals and status rolls.
    pub fn submit_action_with_rng(
        &mut self,
        action: PlayerAction,
        mut rng: TurnRng,
    ) -> BattleResult<EventBus> {
        match self.state.phase {
            EnginePhase::WaitingForAction => {}
            EnginePhase::WaitingForReplacement => {
                return self.resolve_replacement(action);
            }
            EnginePhase::Finished(_) => {
                log::warn!("action submitted after the battle concluded: {:?}", action);
                return Err(BattleStateError::BattleFinished.into());
            }
            EnginePhase::ResolvingTurn => {
                log::warn!("action submitted mid-resolution: {:?}", action);
                return Err(BattleStateError::NotAcceptingActions.into());
            }
        }

        self.validate_action(&action)?;

        let mut bus = EventBus::new();
        self.state.phase = EnginePhase::ResolvingTurn;

        match action {
            PlayerAction::UseMove { move_index } => {
                self.run_move_turn(move_index, &mut bus, &mut rng)?;
            }
            PlayerAction::SwitchTo { party_index } => {
                self.run_switch_turn(party_index, &mut bus, &mut rng)?;
            }
            PlayerAction::Run => self.run_escape(&mut bus),
            PlayerAction::UseItem { .. } => {
                unreachable!("use-item actions are rejected during validation")
            }
        }

        self.finish_turn(&mut bus);
        Ok(bus)
    }

    // === Turn execution ===

    /// Both sides act with a move this turn. Higher move priority goes
    /// first; ties fall to higher effective speed, and a full tie resolves
    /// player-first, deterministically.
    fn run_move_turn(
        &mut self,
        move_index: usize,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> BattleResult<()> {
        let enemy_choice = self
            .policy
            .choose_action(self.state.combatant(CombatantSlot::Opponent), rng);

        let order: Vec<(CombatantSlot, usize)> = match enemy_choice {
            None => vec![(CombatantSlot::Player, move_index)],
            Some(enemy_index) => {
                let player_priority = self.state.active(CombatantSlot::Player).moves[move_index]
                    .data()?
                    .priority;
                let enemy_priority = self.state.active(CombatantSlot::Opponent).moves[enemy_index]
                    .data()?
                    .priority;

                if player_acts_first(
                    player_priority,
                    enemy_priority,
                    effective_speed(self.state.active(CombatantSlot::Player)),
                    effective_speed(self.state.active(CombatantSlot::Opponent)),
                ) {
                    vec![
                        (CombatantSlot::Player, move_index),
                        (CombatantSlot::Opponent, enemy_index),
                    ]
                } else {
                    vec![
                        (CombatantSlot::Opponent, enemy_index),
                        (CombatantSlot::Player, move_index),
                    ]
                }
            }
        };

        for (position, (slot, index)) in order.into_iter().enumerate() {
            // A faint anywhere short-circuits the rest of the turn.
            if position > 0 && self.any_active_fainted() {
                break;
            }
            execute_move(&mut self.state, slot, index, bus, rng)?;
        }

        Ok(())
    }

    /// The player switches; a non-move action always resolves first, then
    /// the opposing move hits the incoming creature.
    fn run_switch_turn(
        &mut self,
        party_index: usize,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) -> BattleResult<()> {
        let enemy_choice = self
            .policy
            .choose_action(self.state.combatant(CombatantSlot::Opponent), rng);

        self.perform_switch(party_index, bus);

        if let Some(enemy_index) = enemy_choice {
            execute_move(&mut self.state, CombatantSlot::Opponent, enemy_index, bus, rng)?;
        }

        Ok(())
    }

    fn run_escape(&mut self, bus: &mut EventBus) {
        bus.push(BattleEvent::Message {
            text: "Got away safely!".to_string(),
        });
        self.conclude(BattleOutcome::Escaped, bus);
    }

    /// Recall the active creature (clearing its volatile status and stat
    /// stages) and send out the chosen replacement.
    fn perform_switch(&mut self, party_index: usize, bus: &mut EventBus) {
        let player = self.state.combatant_mut(CombatantSlot::Player);

        let outgoing = player.active_mut();
        if !outgoing.is_fainted() {
            bus.push(BattleEvent::Message {
                text: format!("Come back {}!", outgoing.name),
            });
        }
        outgoing.reset_on_switch_out();

        player.set_active(party_index);
        let incoming = player.active();
        bus.push(BattleEvent::Message {
            text: format!("Go {}!", incoming.name),
        });
        bus.push(BattleEvent::HpChanged {
            slot: CombatantSlot::Player,
            hp_fraction: incoming.hp_fraction(),
        });
        bus.push(BattleEvent::StatusChanged {
            slot: CombatantSlot::Player,
            status: incoming.status_label().map(str::to_string),
        });
    }

    /// A forced replacement after a faint. Consumes no turn and grants the
    /// opponent no move.
    fn resolve_replacement(&mut self, action: PlayerAction) -> BattleResult<EventBus> {
        let PlayerAction::SwitchTo { party_index } = action else {
            return Err(ActionError::SwitchRequired.into());
        };
        self.validate_switch(party_index)?;

        let mut bus = EventBus::new();
        self.perform_switch(party_index, &mut bus);
        self.state.phase = EnginePhase::WaitingForAction;
        Ok(bus)
    }

    /// Post-turn bookkeeping: battle-over detection, forced replacement, or
    /// the hand-back to input collection.
    fn finish_turn(&mut self, bus: &mut EventBus) {
        if let EnginePhase::Finished(_) = self.state.phase {
            return;
        }

        // The opposing side fainting wins the battle; no opponent
        // switching in single-opponent battles.
        if self.state.active(CombatantSlot::Opponent).is_fainted() {
            self.conclude(BattleOutcome::Victory, bus);
            return;
        }

        if self.state.active(CombatantSlot::Player).is_fainted() {
            if self.state.combatant(CombatantSlot::Player).has_healthy() {
                bus.push(BattleEvent::RequestSwitch {
                    forced_by: CombatantSlot::Player,
                });
                self.state.phase = EnginePhase::WaitingForReplacement;
            } else {
                self.conclude(BattleOutcome::Defeat, bus);
            }
            return;
        }

        self.state.turn_number += 1;
        self.state.phase = EnginePhase::WaitingForAction;
    }

    fn conclude(&mut self, outcome: BattleOutcome, bus: &mut EventBus) {
        self.state.phase = EnginePhase::Finished(outcome);

        for combatant in self.state.combatants.iter_mut() {
            for creature in combatant.party_mut() {
                creature.on_battle_over();
            }
        }

        bus.push(BattleEvent::BattleEnded {
            won: outcome == BattleOutcome::Victory,
        });
    }

    fn any_active_fainted(&self) -> bool {
        self.state.active(CombatantSlot::Player).is_fainted()
            || self.state.active(CombatantSlot::Opponent).is_fainted()
    }

    // === Validation ===

    /// Reject anything the current state makes illegal before any state is
    /// mutated.
    fn validate_action(&self, action: &PlayerAction) -> BattleResult<()> {
        match action {
            PlayerAction::UseMove { move_index } => {
                let active = self.state.active(CombatantSlot::Player);
                let slot = active
                    .moves
                    .get(*move_index)
                    .ok_or(ActionError::InvalidMoveIndex(*move_index))?;
                if slot.pp == 0 {
                    return Err(ActionError::NoPpRemaining(slot.key.clone()).into());
                }
                Ok(())
            }
            PlayerAction::SwitchTo { party_index } => self.validate_switch(*party_index),
            PlayerAction::UseItem { item_id } => {
                Err(ActionError::NoUsableItem(item_id.clone()).into())
            }
            PlayerAction::Run => Ok(()),
        }
    }

    fn validate_switch(&self, party_index: usize) -> BattleResult<()> {
        let combatant = self.state.combatant(CombatantSlot::Player);
        let target = combatant
            .party()
            .get(party_index)
            .ok_or(ActionError::InvalidPartyIndex(party_index))?;

        if target.is_fainted() {
            return Err(ActionError::SwitchTargetFainted(target.name.clone()).into());
        }
        if party_index == combatant.active_index() {
            return Err(ActionError::SwitchTargetActive(target.name.clone()).into());
        }
        Ok(())
    }
}

/// Turn-order rule: higher move priority first, then higher effective
/// speed, then the player on a full tie.
pub(crate) fn player_acts_first(
    player_priority: i8,
    enemy_priority: i8,
    player_speed: u16,
    enemy_speed: u16,
) -> bool {
    match player_priority.cmp(&enemy_priority) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => player_speed >= enemy_speed,
    }
}
