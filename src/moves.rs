//! The static move catalog.
//!
//! Moves are looked up by their kebab-case name, the same keys the species
//! catalog uses in its move pools. Unknown names never fail a battle: they
//! resolve through [`resolve_move`] to a generic physical move of the
//! attacker's primary element (power 50, accuracy 100).

use crate::species::{ElementType, StatKind};
use serde::{Deserialize, Serialize};

/// Which half of the damage formula a move uses, or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Physical,
    Special,
    Status,
}

/// Who a move effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    User,
    Target,
}

/// Status conditions a move can inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Sleep,
    Paralysis,
    Freeze,
    Burn,
    Poison,
}

/// Secondary effect descriptor. Status moves carry one with `chance: 100`;
/// damaging moves may carry one that rides along after the damage lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    StatChange {
        target: EffectTarget,
        stat: StatKind,
        delta: i8,
        chance: u8,
    },
    InflictStatus {
        status: StatusKind,
        chance: u8,
    },
}

/// One entry in the move catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub element: ElementType,
    pub kind: MoveKind,
    /// 0 for status moves
    pub power: u16,
    /// Percent chance to hit, 0..=100
    pub accuracy: u8,
    /// Maximum uses per battle
    pub pp: u8,
    pub effect: Option<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.kind != MoveKind::Status && self.power > 0
    }
}

const fn damaging(element: ElementType, kind: MoveKind, power: u16, accuracy: u8, pp: u8) -> MoveData {
    MoveData {
        element,
        kind,
        power,
        accuracy,
        pp,
        effect: None,
    }
}

const fn damaging_with(
    element: ElementType,
    kind: MoveKind,
    power: u16,
    accuracy: u8,
    pp: u8,
    effect: MoveEffect,
) -> MoveData {
    MoveData {
        element,
        kind,
        power,
        accuracy,
        pp,
        effect: Some(effect),
    }
}

const fn status(element: ElementType, accuracy: u8, pp: u8, effect: MoveEffect) -> MoveData {
    MoveData {
        element,
        kind: MoveKind::Status,
        power: 0,
        accuracy,
        pp,
        effect: Some(effect),
    }
}

const fn inflict(status: StatusKind, chance: u8) -> MoveEffect {
    MoveEffect::InflictStatus { status, chance }
}

const fn stat_change(target: EffectTarget, stat: StatKind, delta: i8, chance: u8) -> MoveEffect {
    MoveEffect::StatChange {
        target,
        stat,
        delta,
        chance,
    }
}

use EffectTarget::{Target, User};
use ElementType::*;
use MoveKind::{Physical, Special};

static MOVE_CATALOG: phf::Map<&'static str, MoveData> = phf::phf_map! {
    // normal
    "tackle" => damaging(Normal, Physical, 40, 100, 35),
    "scratch" => damaging(Normal, Physical, 40, 100, 35),
    "quick-attack" => damaging(Normal, Physical, 40, 100, 30),
    "body-slam" => damaging_with(Normal, Physical, 85, 100, 15, inflict(StatusKind::Paralysis, 30)),
    "growl" => status(Normal, 100, 40, stat_change(Target, StatKind::Attack, -1, 100)),
    "tail-whip" => status(Normal, 100, 30, stat_change(Target, StatKind::Defense, -1, 100)),
    "swords-dance" => status(Normal, 100, 20, stat_change(User, StatKind::Attack, 2, 100)),
    "harden" => status(Normal, 100, 30, stat_change(User, StatKind::Defense, 1, 100)),
    // fire
    "ember" => damaging_with(Fire, Special, 40, 100, 25, inflict(StatusKind::Burn, 10)),
    "fire-punch" => damaging_with(Fire, Physical, 75, 100, 15, inflict(StatusKind::Burn, 10)),
    "flamethrower" => damaging_with(Fire, Special, 90, 100, 15, inflict(StatusKind::Burn, 10)),
    "will-o-wisp" => status(Fire, 85, 15, inflict(StatusKind::Burn, 100)),
    // water
    "water-gun" => damaging(Water, Special, 40, 100, 25),
    "bubble-beam" => damaging_with(Water, Special, 65, 100, 20, stat_change(Target, StatKind::Speed, -1, 10)),
    "surf" => damaging(Water, Special, 90, 100, 15),
    // electric
    "thunder-shock" => damaging_with(Electric, Special, 40, 100, 30, inflict(StatusKind::Paralysis, 10)),
    "thunderbolt" => damaging_with(Electric, Special, 90, 100, 15, inflict(StatusKind::Paralysis, 10)),
    "thunder-wave" => status(Electric, 90, 20, inflict(StatusKind::Paralysis, 100)),
    // grass
    "vine-whip" => damaging(Grass, Physical, 45, 100, 25),
    "razor-leaf" => damaging(Grass, Physical, 55, 95, 25),
    "energy-ball" => damaging_with(Grass, Special, 90, 100, 10, stat_change(Target, StatKind::SpecialDefense, -1, 10)),
    // ice
    "ice-beam" => damaging_with(Ice, Special, 90, 100, 10, inflict(StatusKind::Freeze, 10)),
    "ice-punch" => damaging_with(Ice, Physical, 75, 100, 15, inflict(StatusKind::Freeze, 10)),
    // fighting
    "karate-chop" => damaging(Fighting, Physical, 50, 100, 25),
    "brick-break" => damaging(Fighting, Physical, 75, 100, 15),
    // poison
    "poison-sting" => damaging_with(Poison, Physical, 15, 100, 35, inflict(StatusKind::Poison, 30)),
    "sludge-bomb" => damaging_with(Poison, Special, 90, 100, 10, inflict(StatusKind::Poison, 30)),
    "poison-powder" => status(Poison, 75, 35, inflict(StatusKind::Poison, 100)),
    // ground
    "mud-slap" => damaging_with(Ground, Special, 20, 100, 10, stat_change(Target, StatKind::Speed, -1, 100)),
    "earthquake" => damaging(Ground, Physical, 100, 100, 10),
    // flying
    "peck" => damaging(Flying, Physical, 35, 100, 35),
    "aerial-ace" => damaging(Flying, Physical, 60, 100, 20),
    // psychic
    "confusion" => damaging(Psychic, Special, 50, 100, 25),
    "psychic" => damaging_with(ElementType::Psychic, Special, 90, 100, 10, stat_change(Target, StatKind::SpecialDefense, -1, 10)),
    "hypnosis" => status(ElementType::Psychic, 60, 20, inflict(StatusKind::Sleep, 100)),
    "calm-mind" => status(ElementType::Psychic, 100, 20, stat_change(User, StatKind::SpecialAttack, 1, 100)),
    "agility" => status(ElementType::Psychic, 100, 30, stat_change(User, StatKind::Speed, 2, 100)),
    // bug
    "bug-bite" => damaging(Bug, Physical, 60, 100, 20),
    "x-scissor" => damaging(Bug, Physical, 80, 100, 15),
    // rock
    "rock-throw" => damaging(Rock, Physical, 50, 90, 15),
    "rock-slide" => damaging(Rock, Physical, 75, 90, 10),
    // ghost
    "shadow-ball" => damaging_with(Ghost, Special, 80, 100, 15, stat_change(Target, StatKind::SpecialDefense, -1, 20)),
    "shadow-claw" => damaging(Ghost, Physical, 70, 100, 15),
    // dragon
    "dragon-rage" => damaging(Dragon, Special, 40, 100, 10),
    "dragon-claw" => damaging(Dragon, Physical, 80, 100, 15),
    // dark
    "bite" => damaging(Dark, Physical, 60, 100, 25),
    "crunch" => damaging_with(Dark, Physical, 80, 100, 15, stat_change(Target, StatKind::Defense, -1, 20)),
    // steel
    "iron-tail" => damaging_with(Steel, Physical, 100, 75, 15, stat_change(Target, StatKind::Defense, -1, 30)),
    "flash-cannon" => damaging_with(Steel, Special, 80, 100, 10, stat_change(Target, StatKind::SpecialDefense, -1, 10)),
    // fairy
    "fairy-wind" => damaging(Fairy, Special, 40, 100, 30),
    "dazzling-gleam" => damaging(Fairy, Special, 80, 100, 10),
};

/// Generic moves used to pad any move list that comes up short.
pub const GENERIC_MOVES: [&str; 4] = ["tackle", "quick-attack", "body-slam", "scratch"];

/// Look up a move by name. `None` for names the catalog does not know.
pub fn move_data(name: &str) -> Option<&'static MoveData> {
    MOVE_CATALOG.get(name)
}

/// Maximum PP for a move name, with the generic default for unknown names.
pub fn move_max_pp(name: &str) -> u8 {
    move_data(name).map(|data| data.pp).unwrap_or(10)
}

/// Resolve a move for battle. Unknown names substitute a generic damaging
/// move of the attacker's primary element; the bool reports the substitution
/// so the session can log it.
pub fn resolve_move(name: &str, primary_element: ElementType) -> (MoveData, bool) {
    match move_data(name) {
        Some(data) => (*data, false),
        None => (damaging(primary_element, Physical, 50, 100, 10), true),
    }
}

/// Default move names to fill out a roster combatant of the given element.
pub fn default_moves_for(element: ElementType) -> &'static [&'static str] {
    match element {
        Normal => &["tackle", "quick-attack", "body-slam"],
        Fire => &["ember", "fire-punch", "flamethrower"],
        Water => &["water-gun", "bubble-beam", "surf"],
        Electric => &["thunder-shock", "thunderbolt"],
        Grass => &["vine-whip", "razor-leaf", "energy-ball"],
        Ice => &["ice-beam", "ice-punch"],
        Fighting => &["karate-chop", "brick-break"],
        Poison => &["poison-sting", "sludge-bomb"],
        Ground => &["mud-slap", "earthquake"],
        Flying => &["peck", "aerial-ace"],
        ElementType::Psychic => &["confusion", "psychic"],
        Bug => &["bug-bite", "x-scissor"],
        Rock => &["rock-throw", "rock-slide"],
        Ghost => &["shadow-ball", "shadow-claw"],
        Dragon => &["dragon-rage", "dragon-claw"],
        Dark => &["bite", "crunch"],
        Steel => &["iron-tail", "flash-cannon"],
        Fairy => &["fairy-wind", "dazzling-gleam"],
    }
}

/// Filter `known` against the catalog and pad to four usable move names:
/// element defaults first, then the generic list.
pub fn validate_move_list(known: &[String], elements: &[ElementType]) -> Vec<String> {
    let mut moves: Vec<String> = known
        .iter()
        .filter(|name| move_data(name).is_some())
        .take(4)
        .cloned()
        .collect();

    if moves.len() < 4 {
        let element_defaults = elements.iter().flat_map(|e| default_moves_for(*e).iter());
        for name in element_defaults.chain(GENERIC_MOVES.iter()) {
            if moves.len() >= 4 {
                break;
            }
            if !moves.iter().any(|m| m == name) {
                moves.push((*name).to_string());
            }
        }
    }

    moves.truncate(4);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_move_resolves_from_catalog() {
        let (data, fallback) = resolve_move("tackle", Water);
        assert!(!fallback);
        assert_eq!(data.power, 40);
        assert_eq!(data.kind, MoveKind::Physical);
        assert_eq!(data.element, Normal);
    }

    #[test]
    fn unknown_move_falls_back_to_generic() {
        let (data, fallback) = resolve_move("hyper-drill-rush", Water);
        assert!(fallback);
        assert_eq!(data.element, Water);
        assert_eq!(data.power, 50);
        assert_eq!(data.accuracy, 100);
        assert_eq!(data.kind, MoveKind::Physical);
    }

    #[test]
    fn status_moves_are_not_damaging() {
        let growl = move_data("growl").unwrap();
        assert!(!growl.is_damaging());
        assert_eq!(growl.power, 0);
        assert!(matches!(
            growl.effect,
            Some(MoveEffect::StatChange {
                target: EffectTarget::Target,
                stat: StatKind::Attack,
                delta: -1,
                chance: 100
            })
        ));
    }

    #[test]
    fn validate_pads_short_lists_with_element_defaults() {
        let known = vec!["ember".to_string(), "not-a-real-move".to_string()];
        let moves = validate_move_list(&known, &[Fire]);
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0], "ember");
        // element defaults fill in before the generic list, skipping the
        // already-present ember
        assert_eq!(moves[1], "fire-punch");
        assert_eq!(moves[2], "flamethrower");
        assert_eq!(moves[3], "tackle");
    }

    #[test]
    fn validate_keeps_full_valid_lists_untouched() {
        let known: Vec<String> = ["surf", "ice-beam", "thunderbolt", "psychic"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(validate_move_list(&known, &[Water]), known);
    }

    #[test]
    fn every_default_move_exists_in_catalog() {
        for element in [
            Normal, Fire, Water, Electric, Grass, Ice, Fighting, Poison, Ground, Flying,
            ElementType::Psychic, Bug, Rock, Ghost, Dragon, Dark, Steel, Fairy,
        ] {
            for name in default_moves_for(element) {
                assert!(move_data(name).is_some(), "missing default move {}", name);
            }
        }
        for name in GENERIC_MOVES {
            assert!(move_data(name).is_some(), "missing generic move {}", name);
        }
    }
}
