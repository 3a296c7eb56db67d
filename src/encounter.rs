//! Wild-encounter generation.
//!
//! Each floor draws a biome and a species, randomizes the species' base
//! stats, scales them by the floor-derived level and assembles a move set
//! that prefers three damaging moves plus one status move. Biome elements
//! are flavor only; they never enter the battle math.

use crate::battle::combatant::{Combatant, MoveSlot, StatStages};
use crate::battle::state::BattleRng;
use crate::errors::{CatalogError, SpeciesDataResult};
use crate::moves::{move_data, GENERIC_MOVES};
use crate::roster::Rarity;
use crate::species::{ElementType, SpeciesCatalog, SpeciesData, StatBlock, StatKind};

/// Flavor descriptor for a floor. The special flag bumps the shiny odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Biome {
    pub key: &'static str,
    pub name: &'static str,
    pub elements: &'static [ElementType],
    pub color: &'static str,
    pub special: bool,
}

use ElementType::*;

pub const BIOMES: [Biome; 8] = [
    Biome {
        key: "forest",
        name: "Forest",
        elements: &[Grass, Bug, Normal],
        color: "#78C850",
        special: false,
    },
    Biome {
        key: "ocean",
        name: "Ocean",
        elements: &[Water],
        color: "#6890F0",
        special: false,
    },
    Biome {
        key: "volcano",
        name: "Volcanic",
        elements: &[Fire, Rock, Ground],
        color: "#F08030",
        special: false,
    },
    Biome {
        key: "power-plant",
        name: "Power Plant",
        elements: &[Electric, Steel],
        color: "#F8D030",
        special: false,
    },
    Biome {
        key: "haunted-tower",
        name: "Haunted Tower",
        elements: &[Ghost, Dark, Psychic],
        color: "#705898",
        special: false,
    },
    Biome {
        key: "ice-cave",
        name: "Icy Caverns",
        elements: &[Ice],
        color: "#98D8D8",
        special: false,
    },
    Biome {
        key: "mountain",
        name: "Mountains",
        elements: &[Fighting, Rock, Flying],
        color: "#B8A038",
        special: false,
    },
    Biome {
        key: "enchanted-forest",
        name: "Enchanted Forest",
        elements: &[Fairy, Grass],
        color: "#EE99AC",
        special: true,
    },
];

const SHINY_CHANCE: u8 = 2;
const SPECIAL_SHINY_CHANCE: u8 = 5;

pub fn random_biome(rng: &mut BattleRng) -> &'static Biome {
    &BIOMES[rng.next_index(BIOMES.len(), "biome draw")]
}

/// Generate the opponent for a floor. Level is the floor number (minimum 1),
/// each base stat is perturbed up to ±20% (floored, minimum 1), and rarity
/// follows from the perturbed total.
pub fn generate_wild(
    catalog: &dyn SpeciesCatalog,
    biome: &Biome,
    floor: u32,
    rng: &mut BattleRng,
) -> SpeciesDataResult<Combatant> {
    let species_count = catalog.species_count();
    if species_count == 0 {
        return Err(CatalogError::Unavailable("no species to draw from".to_string()));
    }
    let species_id = rng.next_index(species_count as usize, "wild species") as u32 + 1;
    let species = catalog.lookup_species(species_id)?;

    let shiny_chance = if biome.special {
        SPECIAL_SHINY_CHANCE
    } else {
        SHINY_CHANCE
    };
    let is_shiny = rng.percent_check(shiny_chance, "shiny roll");

    let base_stats = randomize_stats(&species.base_stats, rng);
    let rarity = Rarity::from_stat_total(base_stats.total());

    let level = floor.clamp(1, u8::MAX as u32) as u8;
    let stats = base_stats.map(|stat| stat + level as u16 * 3);
    let max_hp = base_stats.hp + level as u16 * 5;

    let moves = select_moves(&species, rng)
        .into_iter()
        .map(MoveSlot::new)
        .collect();

    Ok(Combatant {
        name: species.name.clone(),
        species_id,
        elements: species.elements.clone(),
        base_stats,
        stats,
        current_hp: max_hp,
        max_hp,
        stages: StatStages::default(),
        status: None,
        moves,
        session_level: level,
        exp_gained: 0,
        rarity,
        is_shiny,
        sprite: species.sprite,
    })
}

/// Perturb each stat by a uniform factor in [-20%, +20%], floored, never
/// below 1.
fn randomize_stats(base: &StatBlock, rng: &mut BattleRng) -> StatBlock {
    let mut randomized = *base;
    for stat in StatKind::ALL {
        let roll = rng.next_outcome("stat variation");
        let factor = 0.8 + roll as f64 / 10_000.0 * 0.4;
        let value = ((base.get(stat) as f64 * factor).floor() as u16).max(1);
        randomized.set(stat, value);
    }
    randomized
}

/// Pick up to four moves: three shuffled damaging moves, then one status
/// move if the pool has any (else a fourth damaging move), padded from the
/// generic list when the pool comes up short.
fn select_moves(species: &SpeciesData, rng: &mut BattleRng) -> Vec<String> {
    let mut pool: Vec<&str> = species
        .move_pool
        .iter()
        .map(String::as_str)
        .filter(|name| move_data(name).is_some())
        .collect();
    if pool.len() < 4 {
        let padding: Vec<&str> = GENERIC_MOVES
            .iter()
            .copied()
            .filter(|name| !pool.contains(name))
            .collect();
        pool.extend(padding);
    }

    let mut damaging: Vec<&str> = Vec::new();
    let mut status: Vec<&str> = Vec::new();
    for name in pool {
        // unwrap is fine, the pool was filtered against the catalog
        if move_data(name).unwrap().is_damaging() {
            damaging.push(name);
        } else {
            status.push(name);
        }
    }

    shuffle(&mut damaging, rng);

    let mut selected: Vec<String> = damaging.iter().take(3).map(|s| s.to_string()).collect();
    if !status.is_empty() {
        let pick = rng.next_index(status.len(), "status move pick");
        selected.push(status[pick].to_string());
    } else if let Some(fourth) = damaging.get(3) {
        selected.push(fourth.to_string());
    }

    for name in GENERIC_MOVES {
        if selected.len() >= 4 {
            break;
        }
        if !selected.iter().any(|m| m == name) {
            selected.push(name.to_string());
        }
    }
    selected.truncate(4);
    selected
}

fn shuffle(items: &mut [&str], rng: &mut BattleRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1, "move shuffle");
        items.swap(i, j);
    }
}
