//! Shared builders and scripted-roll constants for the battle tests.
//!
//! Roll tape for one full exchange where both sides land a plain attack:
//! player accuracy, crit, variance, then the wild's strategy roll followed
//! by its own accuracy, crit, variance.

use crate::battle::combatant::{Combatant, MoveSlot, StatStages, StatusCondition};
use crate::battle::engine::BattleSession;
use crate::battle::state::BattleRng;
use crate::roster::Rarity;
use crate::species::{ElementType, StatBlock};

/// Safe roll for an accuracy slot against 100-accuracy moves.
pub const HIT: u16 = 5000;
/// Highest roll, no crit when used in the crit slot.
pub const NO_CRIT: u16 = 10_000;
/// Highest roll, exact 1.0 multiplier in the variance slot.
pub const FULL_VAR: u16 = 10_000;
/// Strategy roll that sends the wild down the greedy branch.
pub const GREEDY: u16 = 10_000;

/// Rolls for one plain player attack that lands without a crit.
pub fn attack_rolls() -> Vec<u16> {
    vec![HIT, NO_CRIT, FULL_VAR]
}

/// Rolls for the wild's greedy reply landing a plain attack.
pub fn wild_reply_rolls() -> Vec<u16> {
    vec![GREEDY, HIT, NO_CRIT, FULL_VAR]
}

/// With the default builder (level 5, flat 50 stats, no stab, neutral
/// matchup) a landed tackle deals floor((4*40)/50 + 2) = 5.
pub const TACKLE_DAMAGE: u16 = 5;

pub struct CombatantBuilder {
    inner: Combatant,
}

impl CombatantBuilder {
    pub fn new(name: &str) -> Self {
        let stats = StatBlock {
            hp: 100,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: 50,
        };
        CombatantBuilder {
            inner: Combatant {
                name: name.to_string(),
                species_id: 1,
                // water avoids accidental stab on the normal-element
                // default move set
                elements: vec![ElementType::Water],
                base_stats: stats,
                stats,
                current_hp: 100,
                max_hp: 100,
                stages: StatStages::default(),
                status: None,
                moves: vec![MoveSlot::new("tackle".to_string())],
                session_level: 5,
                exp_gained: 0,
                rarity: Rarity::Common,
                is_shiny: false,
                sprite: String::new(),
            },
        }
    }

    pub fn element(mut self, element: ElementType) -> Self {
        self.inner.elements = vec![element];
        self
    }

    pub fn moves(mut self, names: &[&str]) -> Self {
        self.inner.moves = names
            .iter()
            .map(|name| MoveSlot::new((*name).to_string()))
            .collect();
        self
    }

    pub fn hp(mut self, current: u16, max: u16) -> Self {
        self.inner.current_hp = current;
        self.inner.max_hp = max;
        self.inner.stats.hp = max;
        self.inner.base_stats.hp = max;
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.inner.session_level = level;
        self
    }

    pub fn status(mut self, status: StatusCondition) -> Self {
        self.inner.status = Some(status);
        self
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.inner.rarity = rarity;
        self
    }

    pub fn build(self) -> Combatant {
        self.inner
    }
}

/// A session past its intro, one player combatant against one wild, with a
/// scripted roll tape.
pub fn battle(player: Combatant, wild: Combatant, tape: Vec<u16>) -> BattleSession {
    battle_with_roster(vec![player], wild, tape)
}

pub fn battle_with_roster(
    roster: Vec<Combatant>,
    wild: Combatant,
    tape: Vec<u16>,
) -> BattleSession {
    let mut session =
        BattleSession::new(roster, wild, 1, BattleRng::new_for_test(tape)).expect("valid session");
    session.advance_intro().expect("intro advances");
    session
}

/// Concatenate roll segments into one tape.
pub fn tape(segments: &[Vec<u16>]) -> Vec<u16> {
    segments.iter().flatten().copied().collect()
}
