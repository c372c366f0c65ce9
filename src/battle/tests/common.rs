use crate::battle::combatant::Combatant;
use crate::battle::conditions::{StatusCondition, VolatileCondition};
use crate::battle::engine::BattleEngine;
use crate::battle::state::TurnRng;
use crate::creature::CreatureInst;
use crate::data::{get_species_data, register_move_data, register_species_data};
use schema::{
    BaseStats, EffectSpec, ElementType, MoveCategory, MoveData, MoveTarget, SecondaryEffect,
    SpeciesData, StatBoost, StatKind, StatusKind, VolatileKind,
};
use std::sync::Once;

static TEST_DATA: Once = Once::new();

/// Register the canned moves and species the battle tests share. Species
/// stats are crafted so a level-10 creature has attack/defense 11, max HP
/// 30 and an easily distinguished speed.
pub fn ensure_test_data() {
    TEST_DATA.call_once(|| {
        register_move_data("SLAM", physical("Slam", ElementType::Normal, 40, Some(100), 0));
        register_move_data(
            "QUICK_HIT",
            physical("Quick Hit", ElementType::Normal, 40, Some(100), 1),
        );
        register_move_data(
            "ROCK_HURL",
            physical("Rock Hurl", ElementType::Normal, 50, Some(90), 0),
        );
        register_move_data("CRUSH", physical("Crush", ElementType::Normal, 100, Some(100), 0));
        register_move_data("TORCH", physical("Torch", ElementType::Fire, 40, Some(100), 0));
        register_move_data(
            "FLICK_FLAME",
            physical("Flick Flame", ElementType::Fire, 1, Some(100), 0),
        );

        let mut tail_sting = physical("Tail Sting", ElementType::Normal, 40, Some(100), 0);
        tail_sting.secondaries.push(SecondaryEffect {
            chance: 30,
            target: MoveTarget::Target,
            effects: EffectSpec {
                status: Some(StatusKind::Poison),
                ..EffectSpec::default()
            },
        });
        register_move_data("TAIL_STING", tail_sting);

        register_move_data(
            "SNARL",
            status_move(
                "Snarl",
                Some(100),
                MoveTarget::Target,
                EffectSpec {
                    boosts: vec![StatBoost {
                        stat: StatKind::Attack,
                        stages: -1,
                    }],
                    ..EffectSpec::default()
                },
            ),
        );
        register_move_data(
            "FORTIFY",
            status_move(
                "Fortify",
                None,
                MoveTarget::User,
                EffectSpec {
                    boosts: vec![StatBoost {
                        stat: StatKind::Defense,
                        stages: 1,
                    }],
                    ..EffectSpec::default()
                },
            ),
        );
        register_move_data(
            "DOZE_DUST",
            status_move(
                "Doze Dust",
                Some(100),
                MoveTarget::Target,
                EffectSpec {
                    status: Some(StatusKind::Sleep),
                    ..EffectSpec::default()
                },
            ),
        );
        register_move_data(
            "NUMB_SPRAY",
            status_move(
                "Numb Spray",
                Some(100),
                MoveTarget::Target,
                EffectSpec {
                    status: Some(StatusKind::Paralysis),
                    ..EffectSpec::default()
                },
            ),
        );
        register_move_data(
            "BEFUDDLE",
            status_move(
                "Befuddle",
                Some(100),
                MoveTarget::Target,
                EffectSpec {
                    volatile_status: Some(VolatileKind::Confusion),
                    ..EffectSpec::default()
                },
            ),
        );

        register_species_data("PLAINRAT", species("Plainrat", vec![ElementType::Normal], 50));
        register_species_data(
            "SWIFTHAWK",
            species("Swifthawk", vec![ElementType::Normal], 150),
        );
        register_species_data("TIDEPIKE", species("Tidepike", vec![ElementType::Water], 50));
        register_species_data(
            "MOSSCALF",
            species(
                "Mosscalf",
                vec![ElementType::Grass, ElementType::Poison],
                50,
            ),
        );
        register_species_data(
            "SPECTERCAT",
            species("Spectercat", vec![ElementType::Ghost], 50),
        );
        register_species_data(
            "STEAMOTTER",
            species(
                "Steamotter",
                vec![ElementType::Fire, ElementType::Water],
                50,
            ),
        );
    });
}

fn physical(
    name: &str,
    move_type: ElementType,
    power: u8,
    accuracy: Option<u8>,
    priority: i8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        category: MoveCategory::Physical,
        power,
        accuracy,
        priority,
        max_pp: 30,
        target: MoveTarget::Target,
        effects: EffectSpec::default(),
        secondaries: Vec::new(),
    }
}

fn status_move(
    name: &str,
    accuracy: Option<u8>,
    target: MoveTarget,
    effects: EffectSpec,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type: ElementType::Normal,
        category: MoveCategory::Status,
        power: 0,
        accuracy,
        priority: 0,
        max_pp: 20,
        target,
        effects,
        secondaries: Vec::new(),
    }
}

fn species(name: &str, types: Vec<ElementType>, speed: u8) -> SpeciesData {
    SpeciesData {
        name: name.to_string(),
        description: String::new(),
        types,
        base_stats: BaseStats {
            hp: 200,
            attack: 60,
            defense: 60,
            sp_attack: 60,
            sp_defense: 60,
            speed,
        },
        learnset: Vec::new(),
    }
}

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```rust,ignore
/// let creature = TestCreatureBuilder::new("PLAINRAT", 10)
///     .with_moves(vec!["SLAM"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    species_key: String,
    level: u8,
    moves: Vec<String>,
    status: Option<StatusCondition>,
    volatile_status: Option<VolatileCondition>,
    hp: Option<u16>,
}

impl TestCreatureBuilder {
    pub fn new(species_key: &str, level: u8) -> Self {
        Self {
            species_key: species_key.to_string(),
            level,
            moves: vec!["SLAM".to_string()],
            status: None,
            volatile_status: None,
            hp: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<&str>) -> Self {
        self.moves = moves.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_volatile(mut self, volatile: VolatileCondition) -> Self {
        self.volatile_status = Some(volatile);
        self
    }

    /// Sets the current HP. If not set, HP is max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn build(self) -> CreatureInst {
        ensure_test_data();
        let species_data = get_species_data(&self.species_key)
            .unwrap_or_else(|err| panic!("failed to load species data: {}", err));

        let mut creature =
            CreatureInst::new(&self.species_key, &species_data, self.level, Some(self.moves))
                .unwrap_or_else(|err| panic!("failed to build test creature: {}", err));

        creature.status = self.status;
        creature.volatile_status = self.volatile_status;
        if let Some(hp) = self.hp {
            creature.set_hp(hp);
        }
        creature
    }
}

/// Creates a standard 1v1 battle engine with a fixed seed.
pub fn battle_between(player: CreatureInst, opponent: CreatureInst) -> BattleEngine {
    battle_with_parties(vec![player], vec![opponent])
}

pub fn battle_with_parties(player: Vec<CreatureInst>, opponent: Vec<CreatureInst>) -> BattleEngine {
    let player = Combatant::new("Player", player).expect("player party should be valid");
    let opponent = Combatant::new("Wild", opponent).expect("opponent party should be valid");
    BattleEngine::with_seed(player, opponent, 0)
}

/// A `TurnRng` with a generous buffer of median values, for tests where the
/// specific outcomes are not important.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}
