//! Static type-effectiveness table.
//!
//! Against one defending element the multiplier is one of {0, 0.5, 1, 2};
//! against a dual element the two lookups compose multiplicatively, except
//! that immunity on either element forces the whole result to 0.

use crate::species::ElementType;

/// Damage multiplier for an attacking element against the full set of a
/// defender's elements.
pub fn effectiveness(attack: ElementType, defenders: &[ElementType]) -> f64 {
    let mut multiplier = 1.0;
    for defender in defenders {
        let single = against_one(attack, *defender);
        if single == 0.0 {
            return 0.0;
        }
        multiplier *= single;
    }
    multiplier
}

fn against_one(attack: ElementType, defender: ElementType) -> f64 {
    use ElementType::*;

    let (super_effective, not_very, no_effect): (&[ElementType], &[ElementType], &[ElementType]) =
        match attack {
            Normal => (&[], &[Rock, Steel], &[Ghost]),
            Fire => (&[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
            Water => (&[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
            Electric => (&[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
            Grass => (
                &[Water, Ground, Rock],
                &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
                &[],
            ),
            Ice => (
                &[Grass, Ground, Flying, Dragon],
                &[Fire, Water, Ice, Steel],
                &[],
            ),
            Fighting => (
                &[Normal, Ice, Rock, Dark, Steel],
                &[Poison, Flying, Psychic, Bug, Fairy],
                &[Ghost],
            ),
            Poison => (&[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
            Ground => (
                &[Fire, Electric, Poison, Rock, Steel],
                &[Grass, Bug],
                &[Flying],
            ),
            Flying => (&[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
            Psychic => (&[Fighting, Poison], &[Psychic, Steel], &[Dark]),
            Bug => (
                &[Grass, Psychic, Dark],
                &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
                &[],
            ),
            Rock => (&[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
            Ghost => (&[Psychic, Ghost], &[Dark], &[Normal]),
            Dragon => (&[Dragon], &[Steel], &[Fairy]),
            Dark => (&[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
            Steel => (&[Ice, Rock, Fairy], &[Fire, Water, Electric, Steel], &[]),
            Fairy => (&[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
        };

    if no_effect.contains(&defender) {
        0.0
    } else if super_effective.contains(&defender) {
        2.0
    } else if not_very.contains(&defender) {
        0.5
    } else {
        1.0
    }
}
