use crate::battle::conditions::{StatusCondition, VolatileCondition};
use crate::data::get_move_data;
use crate::errors::BattleResult;
use schema::{ElementType, MoveData, SpeciesData, StatBoost, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// One of a creature's up to four known moves, with its remaining PP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    /// Registry key of the move (e.g. `VINE_LASH`).
    pub key: String,
    pub pp: u8,
}

impl MoveSlot {
    /// Create a slot at full PP for a registered move.
    pub fn new(key: &str) -> BattleResult<Self> {
        let data = get_move_data(key)?;
        Ok(MoveSlot {
            key: key.to_string(),
            pp: data.max_pp,
        })
    }

    /// Look up this move's full specification.
    pub fn data(&self) -> BattleResult<MoveData> {
        get_move_data(&self.key)
    }
}

/// A battling creature: the mutable instance built from read-only species
/// data at party assembly time.
///
/// Invariants the methods maintain: current HP stays in `[0, max_hp]`, stat
/// stages stay in `[-6, 6]`, PP never goes below zero, and at most one
/// persistent status is held at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureInst {
    /// Species display name, used in narration.
    pub name: String,
    /// Registry key of the species this instance was built from.
    pub species: String,
    pub level: u8,
    pub types: Vec<ElementType>,
    max_hp: u16,
    curr_hp: u16,
    // ATK, DEF, SP.ATK, SP.DEF, SPD
    stats: [u16; 5],
    pub moves: Vec<MoveSlot>,
    pub status: Option<StatusCondition>,
    pub volatile_status: Option<VolatileCondition>,
    stat_stages: HashMap<StatKind, i8>,
    status_changes: VecDeque<String>,
}

impl CreatureInst {
    /// Create a new creature instance from species data.
    ///
    /// When `moves` is `None` the creature knows the four most recently
    /// unlocked learnset entries for its level.
    pub fn new(
        species_key: &str,
        species_data: &SpeciesData,
        level: u8,
        moves: Option<Vec<String>>,
    ) -> BattleResult<Self> {
        let base = &species_data.base_stats;
        let max_hp = Self::scale_stat(base.hp, level) + 5;
        let stats = [
            Self::scale_stat(base.attack, level),
            Self::scale_stat(base.defense, level),
            Self::scale_stat(base.sp_attack, level),
            Self::scale_stat(base.sp_defense, level),
            Self::scale_stat(base.speed, level),
        ];

        let move_keys = moves.unwrap_or_else(|| species_data.moves_known_at(level));
        let moves = move_keys
            .iter()
            .take(4)
            .map(|key| MoveSlot::new(key))
            .collect::<BattleResult<Vec<_>>>()?;

        Ok(CreatureInst {
            name: species_data.name.clone(),
            species: species_key.to_uppercase(),
            level,
            types: species_data.types.clone(),
            max_hp,
            curr_hp: max_hp,
            stats,
            moves,
            status: None,
            volatile_status: None,
            stat_stages: HashMap::new(),
            status_changes: VecDeque::new(),
        })
    }

    // Stat scaling is monotonic in level: `base * level / 100 + 5`, with HP
    // getting a further flat +5 on top.
    fn scale_stat(base: u8, level: u8) -> u16 {
        (base as u16 * level as u16) / 100 + 5
    }

    // === HP ===

    pub fn hp(&self) -> u16 {
        self.curr_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    /// Current HP as a fraction of max HP, for HUD playback.
    pub fn hp_fraction(&self) -> f32 {
        self.curr_hp as f32 / self.max_hp as f32
    }

    pub fn is_fainted(&self) -> bool {
        self.curr_hp == 0
    }

    /// Subtract HP, flooring at zero. Returns true if this damage fainted
    /// the creature.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        let was_standing = self.curr_hp > 0;
        self.curr_hp = self.curr_hp.saturating_sub(amount);
        was_standing && self.curr_hp == 0
    }

    /// Set HP directly, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u16) {
        self.curr_hp = hp.min(self.max_hp);
    }

    // === Stat line ===

    pub fn attack(&self) -> u16 {
        self.stats[0]
    }

    pub fn defense(&self) -> u16 {
        self.stats[1]
    }

    pub fn sp_attack(&self) -> u16 {
        self.stats[2]
    }

    pub fn sp_defense(&self) -> u16 {
        self.stats[3]
    }

    pub fn speed(&self) -> u16 {
        self.stats[4]
    }

    // === Stat stages ===

    /// The current stage for a stat, 0 if unmodified.
    pub fn stat_stage(&self, stat: StatKind) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Apply a bundle of stage changes. Each stage clamps to `[-6, 6]`
    /// rather than erroring, and every applied boost enqueues a narration
    /// line.
    pub fn apply_boosts(&mut self, boosts: &[StatBoost]) {
        for boost in boosts {
            let current = self.stat_stage(boost.stat);
            let updated = (current + boost.stages).clamp(-6, 6);
            if updated == 0 {
                self.stat_stages.remove(&boost.stat);
            } else {
                self.stat_stages.insert(boost.stat, updated);
            }

            if boost.stages > 0 {
                self.push_status_change(format!("{}'s {} rose!", self.name, boost.stat));
            } else {
                self.push_status_change(format!("{}'s {} fell!", self.name, boost.stat));
            }
        }
    }

    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }

    // === Narration queue ===

    /// Enqueue a narration line produced during resolution. The resolver
    /// drains these into the event script after each phase.
    pub fn push_status_change(&mut self, message: String) {
        self.status_changes.push_back(message);
    }

    pub fn drain_status_changes(&mut self) -> Vec<String> {
        self.status_changes.drain(..).collect()
    }

    // === Status ===

    /// The HUD label of the persistent status, if any ("PSN", "BRN", ...).
    pub fn status_label(&self) -> Option<&'static str> {
        self.status.map(|status| status.label())
    }

    /// Clear transient battle state when this creature leaves the field.
    /// Volatile status and stat stages reset; persistent status survives.
    pub fn reset_on_switch_out(&mut self) {
        self.volatile_status = None;
        self.clear_stat_stages();
    }

    /// End-of-battle cleanup for every party member.
    pub fn on_battle_over(&mut self) {
        self.reset_on_switch_out();
    }
}
