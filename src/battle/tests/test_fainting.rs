//! Faint handling: bench replacement, defeat, and victory experience.

use super::common::*;
use crate::battle::combatant::StatusCondition;
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase};
use crate::errors::ActionError;
use pretty_assertions::assert_eq;

#[test]
fn last_combatant_fainting_is_a_defeat_with_no_more_turns() {
    let player = CombatantBuilder::new("ace").hp(4, 4).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[attack_rolls(), wild_reply_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.phase(), BattlePhase::Defeat);
    assert_eq!(session.outcome(), Some(BattleOutcome::Defeat));
    assert!(session.is_over());
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::Fainted { name } if name == "ace")));

    // terminal: nothing further is accepted
    assert!(matches!(
        session.select_move(0).unwrap_err(),
        ActionError::WrongPhase(_)
    ));
}

#[test]
fn fainted_active_is_replaced_from_the_bench() {
    let lead = CombatantBuilder::new("lead").hp(4, 4).build();
    let backup = CombatantBuilder::new("backup").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle_with_roster(
        vec![lead, backup],
        wild,
        tape(&[attack_rolls(), wild_reply_rolls()]),
    );

    session.select_move(0).unwrap();

    assert_eq!(session.phase(), BattlePhase::Battle);
    assert_eq!(session.active_index(), 1);
    assert_eq!(session.active().name, "backup");
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::SwitchedIn { name } if name == "backup")));
}

#[test]
fn replacement_scan_skips_fainted_bench_members() {
    let lead = CombatantBuilder::new("lead").hp(4, 4).build();
    let down = CombatantBuilder::new("down").hp(0, 4).build();
    let third = CombatantBuilder::new("third").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle_with_roster(
        vec![lead, down, third],
        wild,
        tape(&[attack_rolls(), wild_reply_rolls()]),
    );

    session.select_move(0).unwrap();
    assert_eq!(session.active_index(), 2);
    assert_eq!(session.active().name, "third");
}

#[test]
fn replacement_comes_in_with_neutral_stages_and_status() {
    let lead = CombatantBuilder::new("lead").hp(4, 4).build();
    let backup = CombatantBuilder::new("backup")
        .status(StatusCondition::Poison)
        .build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle_with_roster(
        vec![lead, backup],
        wild,
        tape(&[attack_rolls(), wild_reply_rolls()]),
    );

    session.select_move(0).unwrap();
    assert_eq!(session.active().name, "backup");
    assert_eq!(session.active().status, None);
    assert!(session.active().stages.is_neutral());
}

#[test]
fn defeating_the_wild_grants_experience_and_levels() {
    let player = CombatantBuilder::new("ace").level(1).build();
    let wild = CombatantBuilder::new("wild").hp(3, 3).build();
    let mut session = battle(player, wild, tape(&[attack_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.phase(), BattlePhase::Victory);
    let active = session.active();
    assert_eq!(active.exp_gained, 100);
    assert_eq!(active.session_level, 2);
    // base 50 stats rescale to 50 + 2*3, max HP to 100 + 2*5
    assert_eq!(active.stats.attack, 56);
    assert_eq!(active.max_hp, 110);
    // leveling never heals
    assert_eq!(active.current_hp, 100);

    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::ExperienceGained { amount: 100, .. })));
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::LeveledUp { level: 2, .. })));
}

#[test]
fn victory_without_a_level_threshold_stays_at_level() {
    let player = CombatantBuilder::new("ace").build(); // level 5
    let wild = CombatantBuilder::new("wild").hp(3, 3).build();
    let mut session = battle(player, wild, tape(&[attack_rolls()]));

    session.select_move(0).unwrap();
    assert_eq!(session.active().session_level, 5);
    assert_eq!(session.active().exp_gained, 100);
}
