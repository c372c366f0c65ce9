//! Creature Battle Engine
//!
//! A deterministic rules engine for turn-based creature battles: turn-order
//! scheduling, the move-execution pipeline, the damage formula, elemental
//! type effectiveness, stat-stage math and the status-condition state
//! machine. The engine resolves one full turn at a time and emits an ordered
//! script of typed events for a presentation layer to play back at its own
//! pace; it performs no I/O, waiting or rendering of its own.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod creature;
pub mod data;
pub mod errors;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `creature-battle` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    BaseStats,
    EffectSpec,
    ElementType,
    LearnableMove,
    MoveCategory,
    MoveData,
    MoveTarget,
    SecondaryEffect,
    SpeciesData,
    StatBoost,
    StatKind,
    StatusKind,
    VolatileKind,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine types and per-turn API.
pub use battle::ai::{Behavior, RandomPolicy};
pub use battle::combatant::{Combatant, PlayerAction};
pub use battle::conditions::{StatusCondition, VolatileCondition};
pub use battle::engine::BattleEngine;
pub use battle::state::{
    BattleEvent, BattleOutcome, BattleState, CombatantSlot, EnginePhase, EventBus, TurnRng,
};

// Core runtime types for a battle.
pub use creature::{CreatureInst, MoveSlot};

// Primary data access functions.
pub use data::{
    get_move_data, get_species_data, initialize_move_data, initialize_species_data,
    register_move_data, register_species_data,
};

// Crate-specific error and result types.
pub use errors::{ActionError, BattleEngineError, BattleResult, BattleStateError, DataError};
