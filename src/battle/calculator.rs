//! Damage calculation.
//!
//! damage = floor((((2L/5 + 2) * power * atk/def) / 50 + 2)
//!                 * crit * stab * type * variance)
//! with a floor of 1 whenever a damaging move connects against a
//! non-immune defender.

use crate::battle::combatant::Combatant;
use crate::battle::effectiveness::effectiveness;
use crate::battle::state::BattleRng;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::moves::MoveData;

/// 1-in-16 critical odds, in basis points.
const CRIT_THRESHOLD: u16 = 625;
const CRIT_MULTIPLIER: f64 = 1.5;
const STAB_MULTIPLIER: f64 = 1.5;
const VARIANCE_FLOOR: f64 = 0.85;
const VARIANCE_SPAN: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub type_multiplier: f64,
    pub is_critical: bool,
    pub has_stab: bool,
}

impl DamageOutcome {
    fn none(type_multiplier: f64) -> Self {
        DamageOutcome {
            damage: 0,
            type_multiplier,
            is_critical: false,
            has_stab: false,
        }
    }
}

/// Resolve one damaging hit. Status and zero-power moves deal 0 and draw no
/// rolls; an immune defender likewise short-circuits before any roll. For a
/// live hit the calculator draws exactly two outcomes, crit then variance.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut BattleRng,
) -> DamageOutcome {
    if !move_data.is_damaging() {
        return DamageOutcome::none(1.0);
    }

    let type_multiplier = effectiveness(move_data.element, &defender.elements);
    if type_multiplier == 0.0 {
        return DamageOutcome::none(0.0);
    }

    let is_critical = rng.next_outcome("critical hit check") <= CRIT_THRESHOLD;
    let variance_roll = rng.next_outcome("damage variance");
    let variance = VARIANCE_FLOOR + variance_roll as f64 / 10_000.0 * VARIANCE_SPAN;

    let has_stab = attacker.elements.contains(&move_data.element);

    let level = attacker.session_level as f64;
    let attack = effective_attack(attacker, move_data).max(1) as f64;
    let defense = effective_defense(defender, move_data).max(1) as f64;

    let base = ((2.0 * level / 5.0 + 2.0) * move_data.power as f64 * (attack / defense)) / 50.0
        + 2.0;

    let mut modifier = type_multiplier * variance;
    if is_critical {
        modifier *= CRIT_MULTIPLIER;
    }
    if has_stab {
        modifier *= STAB_MULTIPLIER;
    }

    let damage = ((base * modifier).floor() as u16).max(1);

    DamageOutcome {
        damage,
        type_multiplier,
        is_critical,
        has_stab,
    }
}
