use crate::errors::{CatalogError, SpeciesDataResult};
use serde::{Deserialize, Serialize};

/// Elemental damage category used for effectiveness lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Normal => "normal",
            ElementType::Fire => "fire",
            ElementType::Water => "water",
            ElementType::Electric => "electric",
            ElementType::Grass => "grass",
            ElementType::Ice => "ice",
            ElementType::Fighting => "fighting",
            ElementType::Poison => "poison",
            ElementType::Ground => "ground",
            ElementType::Flying => "flying",
            ElementType::Psychic => "psychic",
            ElementType::Bug => "bug",
            ElementType::Rock => "rock",
            ElementType::Ghost => "ghost",
            ElementType::Dragon => "dragon",
            ElementType::Dark => "dark",
            ElementType::Steel => "steel",
            ElementType::Fairy => "fairy",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which stat a stage modifier or move effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    pub(crate) fn index(&self) -> usize {
        match self {
            StatKind::Hp => 0,
            StatKind::Attack => 1,
            StatKind::Defense => 2,
            StatKind::SpecialAttack => 3,
            StatKind::SpecialDefense => 4,
            StatKind::Speed => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Special Attack",
            StatKind::SpecialDefense => "Special Defense",
            StatKind::Speed => "Speed",
        }
    }
}

/// A full stat block. Base stats for a species, or computed stats in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl StatBlock {
    pub fn get(&self, stat: StatKind) -> u16 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: StatKind, value: u16) {
        match stat {
            StatKind::Hp => self.hp = value,
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::SpecialAttack => self.sp_attack = value,
            StatKind::SpecialDefense => self.sp_defense = value,
            StatKind::Speed => self.speed = value,
        }
    }

    /// Sum of all six stats. Drives the rarity tier of a wild encounter.
    pub fn total(&self) -> u32 {
        self.hp as u32
            + self.attack as u32
            + self.defense as u32
            + self.sp_attack as u32
            + self.sp_defense as u32
            + self.speed as u32
    }

    /// Apply a function to every stat, returning a new block.
    pub fn map(&self, f: impl Fn(u16) -> u16) -> StatBlock {
        StatBlock {
            hp: f(self.hp),
            attack: f(self.attack),
            defense: f(self.defense),
            sp_attack: f(self.sp_attack),
            sp_defense: f(self.sp_defense),
            speed: f(self.speed),
        }
    }
}

/// Read-only species record supplied by the external reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u32,
    pub name: String,
    /// One or two elemental categories
    pub elements: Vec<ElementType>,
    pub base_stats: StatBlock,
    /// Learnable move names. May contain names absent from the move catalog.
    pub move_pool: Vec<String>,
    pub sprite: String,
}

/// The species/move reference collaborator. The core never mutates it and
/// must tolerate missing or partial move data (see the move catalog fallback).
pub trait SpeciesCatalog {
    /// Number of species in the catalog. Ids run 1..=species_count().
    fn species_count(&self) -> u32;

    fn lookup_species(&self, id: u32) -> SpeciesDataResult<SpeciesData>;
}

/// A catalog backed by an in-memory list, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    species: Vec<SpeciesData>,
}

impl InMemoryCatalog {
    pub fn new(species: Vec<SpeciesData>) -> Self {
        Self { species }
    }
}

impl SpeciesCatalog for InMemoryCatalog {
    fn species_count(&self) -> u32 {
        self.species.len() as u32
    }

    fn lookup_species(&self, id: u32) -> SpeciesDataResult<SpeciesData> {
        self.species
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(CatalogError::SpeciesNotFound(id))
    }
}
