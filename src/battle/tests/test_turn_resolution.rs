//! Full-exchange resolution: damage application, accuracy, move legality
//! and the intro phase.

use super::common::*;
use crate::battle::engine::BattleSession;
use crate::battle::state::{BattleEvent, BattlePhase, BattleRng};
use crate::errors::ActionError;
use crate::species::StatKind;
use pretty_assertions::assert_eq;

#[test]
fn both_sides_trade_damage_in_one_exchange() {
    let player = CombatantBuilder::new("ace").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[attack_rolls(), wild_reply_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.wild().current_hp, 100 - TACKLE_DAMAGE);
    assert_eq!(session.active().current_hp, 100 - TACKLE_DAMAGE);
    assert_eq!(session.phase(), BattlePhase::Battle);

    let used: Vec<&str> = session
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { attacker, .. } => Some(attacker.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(used, vec!["ace", "wild"]);
}

#[test]
fn miss_deals_nothing_but_still_spends_a_use() {
    // razor-leaf is 95 accuracy; 9501 is just past it
    let player = CombatantBuilder::new("ace").moves(&["razor-leaf"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[vec![9501], wild_reply_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.wild().current_hp, 100);
    assert_eq!(session.active().moves[0].pp, 24);
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::MoveMissed { .. })));
}

#[test]
fn exhausted_move_is_rejected_without_consuming_the_turn() {
    let mut player = CombatantBuilder::new("ace").build();
    player.moves[0].pp = 0;
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, vec![]);

    let before = session.events().len();
    let err = session.select_move(0).unwrap_err();
    assert!(matches!(err, ActionError::NoUsesRemaining(_)));
    assert_eq!(session.events().len(), before);
    assert_eq!(session.active().current_hp, 100);
    assert_eq!(session.wild().current_hp, 100);
}

#[test]
fn out_of_range_move_index_is_rejected() {
    let player = CombatantBuilder::new("ace").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, vec![]);

    assert_eq!(
        session.select_move(7).unwrap_err(),
        ActionError::InvalidMoveIndex(7)
    );
}

#[test]
fn actions_before_the_intro_advances_are_rejected() {
    let player = CombatantBuilder::new("ace").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session =
        BattleSession::new(vec![player], wild, 1, BattleRng::new_for_test(vec![])).unwrap();

    assert!(matches!(
        session.select_move(0).unwrap_err(),
        ActionError::WrongPhase(_)
    ));
}

#[test]
fn intro_heals_a_fifth_of_max_hp() {
    let mut player = CombatantBuilder::new("ace").build();
    player.current_hp = 50;
    let wild = CombatantBuilder::new("wild").build();
    let mut session =
        BattleSession::new(vec![player], wild, 1, BattleRng::new_for_test(vec![])).unwrap();

    session.advance_intro().unwrap();
    assert_eq!(session.active().current_hp, 70);
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::IntroHealed { amount: 20, .. })));
}

#[test]
fn damage_never_drops_hp_below_zero() {
    let player = CombatantBuilder::new("ace").build();
    let wild = CombatantBuilder::new("wild").hp(3, 3).build();
    let mut session = battle(player, wild, tape(&[attack_rolls()]));

    session.select_move(0).unwrap();
    assert_eq!(session.wild().current_hp, 0);
    assert_eq!(session.phase(), BattlePhase::Victory);
}

#[test]
fn stat_moves_shift_stages_instead_of_dealing_damage() {
    let player = CombatantBuilder::new("ace").moves(&["growl"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[vec![HIT], wild_reply_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.wild().current_hp, 100);
    assert_eq!(session.wild().stages.get(StatKind::Attack), -1);
    // the wild's reply already swings with the lowered attack: 33 effective
    // attack gives floor((4*40*(33/50))/50 + 2) = 4
    assert_eq!(session.active().current_hp, 96);
    assert!(session.events().iter().any(|event| matches!(
        event,
        BattleEvent::StatChanged {
            stat: StatKind::Attack,
            delta: -1,
            new_stage: -1,
            ..
        }
    )));
}

#[test]
fn self_targeting_stat_move_raises_own_stage() {
    let player = CombatantBuilder::new("ace").moves(&["swords-dance"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[vec![HIT], wild_reply_rolls()]));

    session.select_move(0).unwrap();
    assert_eq!(session.active().stages.get(StatKind::Attack), 2);
}

#[test]
fn stat_move_at_the_stage_cap_reports_the_limit() {
    let mut player = CombatantBuilder::new("ace").moves(&["swords-dance"]).build();
    player.stages.modify(StatKind::Attack, 6);
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[vec![HIT], wild_reply_rolls()]));

    session.select_move(0).unwrap();

    assert_eq!(session.active().stages.get(StatKind::Attack), 6);
    assert!(session.events().iter().any(|event| matches!(
        event,
        BattleEvent::StatLimitReached {
            stat: StatKind::Attack,
            delta: 2,
            ..
        }
    )));
    assert!(!session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::StatChanged { .. })));
    assert!(session
        .narration()
        .iter()
        .any(|line| line.contains("won't go any higher")));
}

#[test]
fn lowered_attack_persists_across_exchanges() {
    let player = CombatantBuilder::new("ace").moves(&["growl", "tackle"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(
        player,
        wild,
        tape(&[
            vec![HIT],
            wild_reply_rolls(),
            attack_rolls(),
            wild_reply_rolls(),
        ]),
    );

    // growl lands before the wild's first reply, so both replies swing at
    // stage -1 and deal 4 instead of 5
    session.select_move(0).unwrap();
    let hp_after_first = session.active().current_hp;
    assert_eq!(hp_after_first, 96);

    session.select_move(1).unwrap();
    assert_eq!(hp_after_first - session.active().current_hp, 4);
}

#[test]
fn secondary_effect_rides_a_landed_hit() {
    // body-slam paralyzes 30% of the time; 3000 is inside, 3001 outside
    let player = CombatantBuilder::new("ace").moves(&["body-slam"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(
        player,
        wild,
        tape(&[vec![HIT, NO_CRIT, FULL_VAR, 3000], vec![GREEDY, 5000, HIT, NO_CRIT, FULL_VAR]]),
    );

    session.select_move(0).unwrap();
    assert!(matches!(
        session.wild().status,
        Some(crate::battle::combatant::StatusCondition::Paralysis)
    ));
}

#[test]
fn secondary_effect_roll_can_fail() {
    let player = CombatantBuilder::new("ace").moves(&["body-slam"]).build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(
        player,
        wild,
        tape(&[vec![HIT, NO_CRIT, FULL_VAR, 3001], wild_reply_rolls()]),
    );

    session.select_move(0).unwrap();
    assert!(session.wild().status.is_none());
}

#[test]
fn immune_defender_shrugs_off_the_hit() {
    let player = CombatantBuilder::new("ace").moves(&["thunderbolt"]).build();
    let wild = CombatantBuilder::new("wild")
        .element(crate::species::ElementType::Ground)
        .build();
    // immunity short-circuits before crit and variance rolls
    let mut session = battle(player, wild, tape(&[vec![HIT], wild_reply_rolls()]));

    session.select_move(0).unwrap();
    assert_eq!(session.wild().current_hp, 100);
    assert!(session
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::NoEffect { .. })));
}

#[test]
fn narration_covers_the_whole_exchange() {
    let player = CombatantBuilder::new("ace").build();
    let wild = CombatantBuilder::new("wild").build();
    let mut session = battle(player, wild, tape(&[attack_rolls(), wild_reply_rolls()]));

    session.select_move(0).unwrap();
    let narration = session.narration();
    assert!(narration.iter().any(|line| line.contains("ace used tackle")));
    assert!(narration.iter().any(|line| line.contains("wild used tackle")));
}
