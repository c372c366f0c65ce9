use crate::battle::combatant::Combatant;
use crate::creature::CreatureInst;
use serde::{Deserialize, Serialize};

/// One of the two active battle positions. Provides type safety over raw
/// indices into the combatant array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantSlot {
    Player,
    Opponent,
}

impl CombatantSlot {
    pub fn to_index(self) -> usize {
        match self {
            CombatantSlot::Player => 0,
            CombatantSlot::Opponent => 1,
        }
    }

    pub fn opponent(self) -> CombatantSlot {
        match self {
            CombatantSlot::Player => CombatantSlot::Opponent,
            CombatantSlot::Opponent => CombatantSlot::Player,
        }
    }
}

/// One step of the turn script consumed by the presentation layer. This
/// event sequence is the stable boundary of the engine: the consumer plays
/// it back at its own pace while the engine itself never waits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    /// A line of battle narration.
    Message { text: String },
    /// A combatant's active creature changed HP; the fraction drives the
    /// HP bar animation.
    HpChanged {
        slot: CombatantSlot,
        hp_fraction: f32,
    },
    /// The active creature's persistent status label changed
    /// (`None` = status cleared).
    StatusChanged {
        slot: CombatantSlot,
        status: Option<String>,
    },
    /// The active creature in this slot fainted.
    Fainted { slot: CombatantSlot },
    /// The named side must send out a replacement before play continues.
    RequestSwitch { forced_by: CombatantSlot },
    /// The battle concluded.
    BattleEnded { won: bool },
}

/// Ordered collection of events produced while resolving one phase.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Just the narration lines, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::Message { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Oracle of pre-generated percentile outcomes (1..=100) consumed during one
/// turn's resolution. Injecting the oracle keeps every probabilistic gate
/// (accuracy, criticals, status rolls, durations) reproducible: tests script
/// the exact outcomes, and the engine derives fresh oracles from a seed.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Derive a turn's worth of outcomes from a seed.
    pub fn from_seed(seed: u64) -> Self {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    /// The next percentile outcome in 1..=100. The reason string names the
    /// check being rolled so exhaustion and test traces stay debuggable.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }

    /// Map the next percentile outcome onto `lo..=hi`. Outcome 1 maps to
    /// `lo`, outcome 100 to `hi`, monotonically in between.
    pub fn next_in_range(&mut self, reason: &str, lo: u8, hi: u8) -> u8 {
        debug_assert!(lo <= hi);
        let span = (hi - lo + 1) as u32;
        let outcome = self.next_outcome(reason) as u32;
        lo + (((outcome - 1) * span) / 100) as u8
    }
}

/// How the engine is currently sequenced. Input-collection states of the UI
/// (action menu, move menu, party screen) live outside the engine; these
/// phases only describe what the resolution core is doing and what input it
/// will accept next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Waiting for the player's next turn action.
    WaitingForAction,
    /// A turn script is being produced; no input is accepted.
    ResolvingTurn,
    /// The player's active creature fainted and a replacement must be
    /// chosen. Resolving it does not consume a turn.
    WaitingForReplacement,
    Finished(BattleOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Escaped,
}

/// The whole mutable state of one battle. Owned exclusively by the engine;
/// collaborators read summaries (HP, status labels) and submit actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub combatants: [Combatant; 2],
    pub turn_number: u32,
    pub phase: EnginePhase,
}

impl BattleState {
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        BattleState {
            combatants: [player, opponent],
            turn_number: 1,
            phase: EnginePhase::WaitingForAction,
        }
    }

    pub fn combatant(&self, slot: CombatantSlot) -> &Combatant {
        &self.combatants[slot.to_index()]
    }

    pub fn combatant_mut(&mut self, slot: CombatantSlot) -> &mut Combatant {
        &mut self.combatants[slot.to_index()]
    }

    /// The creature currently on the field for a slot.
    pub fn active(&self, slot: CombatantSlot) -> &CreatureInst {
        self.combatant(slot).active()
    }

    pub fn active_mut(&mut self, slot: CombatantSlot) -> &mut CreatureInst {
        self.combatant_mut(slot).active_mut()
    }
}
