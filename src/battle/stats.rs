//! Stat-stage scaling.
//!
//! Stages live in [-6, +6] and scale a stat by (2 + stage) / 2 going up and
//! 2 / (2 + |stage|) going down. The scaled value is floored.

use crate::battle::combatant::Combatant;
use crate::moves::{MoveData, MoveKind};
use crate::species::StatKind;

/// Apply a stage modifier to a base stat. Stage 0 is the identity.
pub fn apply_stat_stage(base_stat: u16, stage: i8) -> u16 {
    let stage = stage.clamp(-6, 6);
    if stage == 0 {
        return base_stat;
    }

    let multiplier = if stage > 0 {
        (2.0 + stage as f64) / 2.0
    } else {
        2.0 / (2.0 + (-stage) as f64)
    };

    (base_stat as f64 * multiplier).floor() as u16
}

/// The attacker's effective attacking stat for a move, stages applied.
/// Status moves have no attacking stat.
pub fn effective_attack(attacker: &Combatant, move_data: &MoveData) -> u16 {
    let stat = match move_data.kind {
        MoveKind::Physical => StatKind::Attack,
        MoveKind::Special => StatKind::SpecialAttack,
        MoveKind::Status => return 0,
    };
    apply_stat_stage(attacker.stats.get(stat), attacker.stages.get(stat))
}

/// The defender's effective defending stat for a move, stages applied.
pub fn effective_defense(defender: &Combatant, move_data: &MoveData) -> u16 {
    let stat = match move_data.kind {
        MoveKind::Physical => StatKind::Defense,
        MoveKind::Special => StatKind::SpecialDefense,
        MoveKind::Status => return 0,
    };
    apply_stat_stage(defender.stats.get(stat), defender.stages.get(stat))
}
