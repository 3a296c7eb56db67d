//! Capture odds for a defeated-but-standing wild opponent.

use crate::battle::combatant::Combatant;
use crate::battle::state::BattleRng;

const BASE_CHANCE: i32 = 30;
const LOW_HP_BONUS: i32 = 20;
const MID_HP_BONUS: i32 = 10;
const MIN_CHANCE: i32 = 5;
const MAX_CHANCE: i32 = 95;

/// Percent chance a capture attempt succeeds against this opponent:
/// 30, plus 20 when under a quarter HP (10 under half), plus the rarity
/// penalty, clamped to [5, 95].
pub fn capture_chance(wild: &Combatant) -> u8 {
    let hp_bonus = if wild.current_hp as u32 * 4 < wild.max_hp as u32 {
        LOW_HP_BONUS
    } else if wild.current_hp as u32 * 2 < wild.max_hp as u32 {
        MID_HP_BONUS
    } else {
        0
    };

    let chance = BASE_CHANCE + hp_bonus + wild.rarity.capture_penalty();
    chance.clamp(MIN_CHANCE, MAX_CHANCE) as u8
}

/// Roll one capture attempt.
pub fn attempt_capture(wild: &Combatant, rng: &mut BattleRng) -> bool {
    rng.percent_check(capture_chance(wild), "capture attempt")
}
