//! Wild-opponent move selection.
//!
//! 70% of the time the opponent plays greedily: the usable damaging move
//! with the highest type effectiveness against the defender, first-listed
//! winning ties. The remaining 30% it picks uniformly among everything it
//! can still use, which is the only way its status moves come out.

use crate::battle::combatant::Combatant;
use crate::battle::effectiveness::effectiveness;
use crate::battle::state::BattleRng;
use crate::moves::move_data;
use ordered_float::OrderedFloat;

/// Basis-point threshold for the uniform-random branch.
const RANDOM_BRANCH: u16 = 3000;

/// Pick a move index for the wild opponent, or `None` when every slot is
/// out of uses.
pub fn choose_move(wild: &Combatant, defender: &Combatant, rng: &mut BattleRng) -> Option<usize> {
    let usable: Vec<usize> = wild
        .moves
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.pp > 0)
        .map(|(index, _)| index)
        .collect();

    if usable.is_empty() {
        return None;
    }

    if rng.next_outcome("wild move strategy") <= RANDOM_BRANCH {
        let pick = rng.next_index(usable.len(), "wild random move");
        return Some(usable[pick]);
    }

    let best_damaging = usable
        .iter()
        .filter_map(|&index| {
            let data = move_data(&wild.moves[index].name)?;
            if !data.is_damaging() {
                return None;
            }
            Some((index, effectiveness(data.element, &defender.elements)))
        })
        // max_by_key keeps the later of equal keys, so reverse the walk to
        // make the first-listed move win ties
        .rev()
        .max_by_key(|(_, multiplier)| OrderedFloat(*multiplier))
        .map(|(index, _)| index);

    match best_damaging {
        Some(index) => Some(index),
        // nothing damaging left, fall back to anything usable
        None => {
            let pick = rng.next_index(usable.len(), "wild fallback move");
            Some(usable[pick])
        }
    }
}
