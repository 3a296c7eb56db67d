//! Canned species, starter rosters and in-memory collaborators, enough to
//! drive a run end to end without any external services.

use crate::errors::StoreResult;
use crate::roster::{Rarity, RosterEntry, RosterStore};
use crate::run::{RunSummary, RunSummarySink};
use crate::species::{ElementType, InMemoryCatalog, SpeciesData, StatBlock};
use std::collections::HashMap;

fn stats(hp: u16, attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> StatBlock {
    StatBlock {
        hp,
        attack,
        defense,
        sp_attack,
        sp_defense,
        speed,
    }
}

fn species(
    id: u32,
    name: &str,
    elements: Vec<ElementType>,
    base_stats: StatBlock,
    move_pool: &[&str],
) -> SpeciesData {
    SpeciesData {
        id,
        name: name.to_string(),
        elements,
        base_stats,
        move_pool: move_pool.iter().map(|m| m.to_string()).collect(),
        sprite: format!("sprites/{}.png", name),
    }
}

/// A small reference catalog covering a spread of elements and rarities.
pub fn demo_catalog() -> InMemoryCatalog {
    use ElementType::*;
    InMemoryCatalog::new(vec![
        species(
            1,
            "sproutle",
            vec![Grass, Poison],
            stats(45, 49, 49, 65, 65, 45),
            &["vine-whip", "razor-leaf", "poison-powder", "growl", "tackle"],
        ),
        species(
            2,
            "emberon",
            vec![Fire],
            stats(39, 52, 43, 60, 50, 65),
            &["ember", "fire-punch", "flamethrower", "will-o-wisp", "scratch"],
        ),
        species(
            3,
            "aquil",
            vec![Water],
            stats(44, 48, 65, 50, 64, 43),
            &["water-gun", "bubble-beam", "surf", "tail-whip", "tackle"],
        ),
        species(
            4,
            "voltik",
            vec![Electric, Steel],
            stats(40, 55, 40, 80, 50, 90),
            &["thunder-shock", "thunderbolt", "thunder-wave", "flash-cannon"],
        ),
        species(
            5,
            "gloomwisp",
            vec![Ghost, Psychic],
            stats(60, 45, 45, 100, 80, 70),
            &["shadow-ball", "confusion", "hypnosis", "calm-mind"],
        ),
        species(
            6,
            "boulderon",
            vec![Rock, Ground],
            stats(80, 110, 130, 55, 65, 45),
            &["rock-throw", "rock-slide", "earthquake", "harden"],
        ),
        species(
            7,
            "galewing",
            vec![Flying, Normal],
            stats(50, 60, 45, 50, 50, 95),
            &["peck", "aerial-ace", "quick-attack", "agility"],
        ),
        species(
            8,
            "frostfang",
            vec![Ice, Dark],
            stats(55, 85, 50, 65, 55, 85),
            &["ice-beam", "ice-punch", "bite", "crunch"],
        ),
    ])
}

fn starter(id: &str, species_id: u32, name: &str, elements: Vec<ElementType>, base: StatBlock, moves: &[&str]) -> RosterEntry {
    RosterEntry {
        id: id.to_string(),
        species_id,
        name: name.to_string(),
        nickname: None,
        elements,
        stats: base,
        moves: moves.iter().map(|m| m.to_string()).collect(),
        rarity: Rarity::from_stat_total(base.total()),
        is_shiny: false,
        sprite: format!("sprites/{}.png", name),
        created_at: 0,
        captured_floor: None,
        token_ref: None,
    }
}

/// A three-member starter roster matching the demo catalog.
pub fn starter_roster() -> Vec<RosterEntry> {
    use ElementType::*;
    vec![
        starter(
            "starter-1",
            1,
            "sproutle",
            vec![Grass, Poison],
            stats(45, 49, 49, 65, 65, 45),
            &["vine-whip", "razor-leaf", "poison-powder", "growl"],
        ),
        starter(
            "starter-2",
            2,
            "emberon",
            vec![Fire],
            stats(39, 52, 43, 60, 50, 65),
            &["ember", "fire-punch", "will-o-wisp", "scratch"],
        ),
        starter(
            "starter-3",
            3,
            "aquil",
            vec![Water],
            stats(44, 48, 65, 50, 64, 43),
            &["water-gun", "bubble-beam", "tail-whip", "tackle"],
        ),
    ]
}

/// Roster persistence backed by a map, keyed by player id.
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    rosters: HashMap<String, Vec<RosterEntry>>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(player_id: &str, entries: Vec<RosterEntry>) -> Self {
        let mut rosters = HashMap::new();
        rosters.insert(player_id.to_string(), entries);
        MemoryRosterStore { rosters }
    }
}

impl RosterStore for MemoryRosterStore {
    fn load_roster(&self, player_id: &str) -> StoreResult<Vec<RosterEntry>> {
        Ok(self.rosters.get(player_id).cloned().unwrap_or_default())
    }

    fn save_entry(&mut self, player_id: &str, entry: &RosterEntry) -> StoreResult<()> {
        self.rosters
            .entry(player_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn delete_entry(&mut self, player_id: &str, entry_id: &str) -> StoreResult<()> {
        if let Some(entries) = self.rosters.get_mut(player_id) {
            entries.retain(|entry| entry.id != entry_id);
        }
        Ok(())
    }
}

/// Summary sink that keeps everything it is handed.
#[derive(Debug, Default)]
pub struct MemorySummarySink {
    pub summaries: Vec<RunSummary>,
}

impl RunSummarySink for MemorySummarySink {
    fn record_run_outcome(&mut self, summary: &RunSummary) -> StoreResult<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_data;
    use crate::species::SpeciesCatalog;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_catalog_move_pools_are_known() {
        let catalog = demo_catalog();
        for id in 1..=catalog.species_count() {
            let species = catalog.lookup_species(id).unwrap();
            for name in &species.move_pool {
                assert!(move_data(name).is_some(), "{} has unknown move {}", species.name, name);
            }
        }
    }

    #[test]
    fn starter_roster_matches_catalog_species() {
        let catalog = demo_catalog();
        for entry in starter_roster() {
            let species = catalog.lookup_species(entry.species_id).unwrap();
            assert_eq!(entry.elements, species.elements);
        }
    }

    #[test]
    fn memory_store_round_trips_entries() {
        let mut store = MemoryRosterStore::seed("p1", starter_roster());
        assert_eq!(store.load_roster("p1").unwrap().len(), 3);

        let extra = starter_roster().remove(0);
        store.save_entry("p1", &extra).unwrap();
        assert_eq!(store.load_roster("p1").unwrap().len(), 4);

        store.delete_entry("p1", "starter-2").unwrap();
        let remaining = store.load_roster("p1").unwrap();
        assert!(remaining.iter().all(|e| e.id != "starter-2"));
    }

    #[test]
    fn unknown_player_loads_an_empty_roster() {
        let store = MemoryRosterStore::new();
        assert!(store.load_roster("nobody").unwrap().is_empty());
    }
}
