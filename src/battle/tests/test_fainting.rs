use crate::battle::combatant::PlayerAction;
use crate::battle::conditions::StatusCondition;
use crate::battle::state::{BattleEvent, BattleOutcome, CombatantSlot, EnginePhase, TurnRng};
use crate::battle::tests::common::{
    battle_between, battle_with_parties, predictable_rng, TestCreatureBuilder,
};

#[test]
fn a_knockout_skips_the_second_action_and_wins() {
    let player = TestCreatureBuilder::new("PLAINRAT", 10)
        .with_moves(vec!["CRUSH"])
        .build();
    let opponent = TestCreatureBuilder::new("TIDEPIKE", 10).with_hp(5).build();
    let mut engine = battle_between(player, opponent);

    let bus = engine
        .submit_action_with_rng(PlayerAction::UseMove { move_index: 0 }, predictable_rng())
        .unwrap();

    // Only the player acted; the fainted side's move never executed.
    let used: Vec<&str> = bus.messages().filter(|text| text.contains(" used ")).collect();
    assert_eq!(used, vec!["Plainrat used Crush!"]);

    assert!(bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::Fainted { slot: CombatantSlot::Opponent })));
    assert!(bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::BattleEnded { won: true })));
    assert_eq!(engine.phase(), EnginePhase::Finished(BattleOutcome::Victory));
}

#[test]
fn a_fainted_player_creature_forces_a_switch_without_ending_the_battle() {
    let lead = TestCreatureBuilder::new("PLAINRAT", 10).with_hp(5).build();
    let reserve = TestCreatureBuilder::new("TIDEPIKE", 10).build();
    let opponent = TestCreatureBuilder::new("SWIFTHAWK", 10)
        .with_moves(vec!["CRUSH"])
        .build();
    let mut engine = battle_with_parties(vec![lead, reserve], vec![opponent]);

    let bus = engine
        .submit_action_with_rng(PlayerAction::UseMove { move_index: 0 }, predictable_rng())
        .unwrap();

    // The faster opponent knocked the lead out, so the player's own move
    // was skipped and a replacement is requested instead of a battle end.
    let used: Vec<&str> = bus.messages().filter(|text| text.contains(" used ")).collect();
    assert_eq!(used, vec!["Swifthawk used Crush!"]);

    assert!(bus.events().iter().any(|event| matches!(
        event,
        BattleEvent::RequestSwitch {
            forced_by: CombatantSlot::Player
        }
    )));
    assert!(!bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::BattleEnded { .. })));
    assert_eq!(engine.phase(), EnginePhase::WaitingForReplacement);
    assert_eq!(engine.state().turn_number, 1);
}

#[test]
fn a_forced_replacement_consumes_no_turn() {
    let lead = TestCreatureBuilder::new("PLAINRAT", 10).with_hp(5).build();
    let reserve = TestCreatureBuilder::new("TIDEPIKE", 10).build();
    let opponent = TestCreatureBuilder::new("SWIFTHAWK", 10)
        .with_moves(vec!["CRUSH"])
        .build();
    let mut engine = battle_with_parties(vec![lead, reserve], vec![opponent]);

    engine
        .submit_action_with_rng(PlayerAction::UseMove { move_index: 0 }, predictable_rng())
        .unwrap();
    assert_eq!(engine.phase(), EnginePhase::WaitingForReplacement);

    let bus = engine
        .submit_action_with_rng(
            PlayerAction::SwitchTo { party_index: 1 },
            TurnRng::new_for_test(vec![]),
        )
        .unwrap();

    // The opponent gets no free move against the incoming creature.
    assert_eq!(engine.state().active(CombatantSlot::Player).name, "Tidepike");
    assert_eq!(engine.state().active(CombatantSlot::Player).hp(), 30);
    assert!(bus.messages().all(|text| !text.contains(" used ")));
    assert_eq!(engine.phase(), EnginePhase::WaitingForAction);
    assert_eq!(engine.state().turn_number, 1);
}

#[test]
fn exhausting_the_party_loses_the_battle() {
    let player = TestCreatureBuilder::new("PLAINRAT", 10).with_hp(5).build();
    let opponent = TestCreatureBuilder::new("SWIFTHAWK", 10)
        .with_moves(vec!["CRUSH"])
        .build();
    let mut engine = battle_between(player, opponent);

    let bus = engine
        .submit_action_with_rng(PlayerAction::UseMove { move_index: 0 }, predictable_rng())
        .unwrap();

    assert!(bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::BattleEnded { won: false })));
    assert_eq!(engine.phase(), EnginePhase::Finished(BattleOutcome::Defeat));
}

#[test]
fn a_poison_faint_mid_turn_short_circuits_the_opponent() {
    let player = TestCreatureBuilder::new("PLAINRAT", 10)
        .with_status(StatusCondition::Poison)
        .with_hp(2)
        .build();
    let opponent = TestCreatureBuilder::new("TIDEPIKE", 10).build();
    let mut engine = battle_between(player, opponent);

    let bus = engine
        .submit_action_with_rng(PlayerAction::UseMove { move_index: 0 }, predictable_rng())
        .unwrap();

    // The player acted first on the speed tie, then fainted to its own
    // poison tick; the opponent's queued move never ran.
    let used: Vec<&str> = bus.messages().filter(|text| text.contains(" used ")).collect();
    assert_eq!(used, vec!["Plainrat used Slam!"]);
    assert_eq!(engine.phase(), EnginePhase::Finished(BattleOutcome::Defeat));
}
