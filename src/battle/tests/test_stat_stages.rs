use crate::battle::stats::{
    accuracy_stage_multiplier, effective_accuracy, effective_stat, move_hits,
    stat_stage_multiplier,
};
use crate::battle::state::TurnRng;
use crate::battle::tests::common::{ensure_test_data, TestCreatureBuilder};
use crate::data::get_move_data;
use rstest::rstest;
use schema::{StatBoost, StatKind};

#[rstest]
#[case(0, 100)]
#[case(1, 150)]
#[case(2, 200)]
#[case(6, 400)]
#[case(-1, 67)]
#[case(-2, 50)]
#[case(-6, 25)]
fn stat_stage_multipliers(#[case] stage: i8, #[case] expected: u16) {
    assert_eq!(effective_stat(100, stage), expected);
}

#[rstest]
#[case(0, 1.0)]
#[case(1, 4.0 / 3.0)]
#[case(2, 5.0 / 3.0)]
#[case(3, 2.0)]
#[case(6, 3.0)]
#[case(-1, 3.0 / 4.0)]
#[case(-2, 3.0 / 5.0)]
#[case(-6, 1.0 / 3.0)]
fn accuracy_stage_multipliers(#[case] stage: i8, #[case] expected: f32) {
    assert!((accuracy_stage_multiplier(stage) - expected).abs() < 0.001);
}

#[test]
fn stages_clamp_outside_the_documented_range() {
    assert_eq!(stat_stage_multiplier(9), stat_stage_multiplier(6));
    assert!((accuracy_stage_multiplier(-9) - accuracy_stage_multiplier(-6)).abs() < 0.001);
}

#[test]
fn attacker_accuracy_stages_multiply() {
    // +3 accuracy against a neutral defender doubles a 100-accuracy move.
    assert!((effective_accuracy(100, 3, 0) - 200.0).abs() < 0.001);
    assert!((effective_accuracy(100, 2, 0) - 500.0 / 3.0).abs() < 0.001);
}

#[test]
fn defender_evasion_stages_divide() {
    assert!((effective_accuracy(100, 0, 3) - 50.0).abs() < 0.001);
    // Negative evasion makes the target easier to hit.
    assert!((effective_accuracy(100, 0, -3) - 200.0).abs() < 0.001);
}

#[test]
fn accuracy_and_evasion_combine_multiplicatively() {
    // +3 accuracy and +3 evasion cancel out.
    assert!((effective_accuracy(100, 3, 3) - 100.0).abs() < 0.001);
    assert!((effective_accuracy(90, 1, -1) - 90.0 * (4.0 / 3.0) * (4.0 / 3.0)).abs() < 0.001);
}

#[test]
fn hit_roll_is_clamped_to_the_percentile_range() {
    ensure_test_data();
    let slam = get_move_data("SLAM").unwrap();

    // Boosted accuracy cannot exceed a sure hit: the worst roll still lands.
    let mut attacker = TestCreatureBuilder::new("PLAINRAT", 10).build();
    let defender = TestCreatureBuilder::new("PLAINRAT", 10).build();
    attacker.apply_boosts(&[StatBoost {
        stat: StatKind::Accuracy,
        stages: 6,
    }]);

    let mut rng = TurnRng::new_for_test(vec![100]);
    assert!(move_hits(&slam, &attacker, &defender, &mut rng));
}

#[test]
fn evasion_shrinks_the_hit_window() {
    ensure_test_data();
    let slam = get_move_data("SLAM").unwrap();

    let attacker = TestCreatureBuilder::new("PLAINRAT", 10).build();
    let mut defender = TestCreatureBuilder::new("PLAINRAT", 10).build();
    defender.apply_boosts(&[StatBoost {
        stat: StatKind::Evasion,
        stages: 6,
    }]);

    // 100 / 3 rounds to 33: a roll of 33 connects, 34 misses.
    let mut rng = TurnRng::new_for_test(vec![33]);
    assert!(move_hits(&slam, &attacker, &defender, &mut rng));
    let mut rng = TurnRng::new_for_test(vec![34]);
    assert!(!move_hits(&slam, &attacker, &defender, &mut rng));
}

#[test]
fn boosts_clamp_and_narrate() {
    ensure_test_data();
    let mut creature = TestCreatureBuilder::new("PLAINRAT", 10).build();

    creature.apply_boosts(&[StatBoost {
        stat: StatKind::Attack,
        stages: 4,
    }]);
    creature.apply_boosts(&[StatBoost {
        stat: StatKind::Attack,
        stages: 4,
    }]);
    assert_eq!(creature.stat_stage(StatKind::Attack), 6);

    creature.apply_boosts(&[StatBoost {
        stat: StatKind::Speed,
        stages: -1,
    }]);
    assert_eq!(creature.stat_stage(StatKind::Speed), -1);

    let messages = creature.drain_status_changes();
    assert_eq!(
        messages,
        vec![
            "Plainrat's Attack rose!".to_string(),
            "Plainrat's Attack rose!".to_string(),
            "Plainrat's Speed fell!".to_string(),
        ]
    );
}
