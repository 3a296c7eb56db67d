use crate::errors::StoreResult;
use crate::species::{ElementType, StatBlock};
use serde::{Deserialize, Serialize};

/// Rarity tier of a monster, derived from its summed randomized base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Tier thresholds over the summed base stats.
    pub fn from_stat_total(total: u32) -> Rarity {
        if total >= 600 {
            Rarity::Legendary
        } else if total >= 500 {
            Rarity::Epic
        } else if total >= 450 {
            Rarity::Rare
        } else if total >= 400 {
            Rarity::Uncommon
        } else {
            Rarity::Common
        }
    }

    /// Penalty applied to the capture chance for this tier.
    pub fn capture_penalty(&self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => -10,
            Rarity::Rare => -20,
            Rarity::Epic => -30,
            Rarity::Legendary => -40,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted monster owned by a player, independent of any battle.
/// In-battle mutation happens on a `Combatant` snapshot, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub species_id: u32,
    /// Species name if no nickname was given
    pub name: String,
    pub nickname: Option<String>,
    pub elements: Vec<ElementType>,
    /// Base stats. For captured monsters these are the randomized base
    /// stats from the encounter, not the scaled in-battle stats.
    pub stats: StatBlock,
    /// Known move names, at most 4
    pub moves: Vec<String>,
    pub rarity: Rarity,
    pub is_shiny: bool,
    pub sprite: String,
    /// Seconds since the Unix epoch
    pub created_at: u64,
    /// Floor this monster was captured on, if it was captured in a run
    pub captured_floor: Option<u32>,
    /// On-chain token reference, managed entirely by an external collaborator
    pub token_ref: Option<String>,
}

impl RosterEntry {
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }
}

/// Roster persistence collaborator. Called at run start/end and when a
/// capture converts a wild opponent into a new entry.
pub trait RosterStore {
    fn load_roster(&self, player_id: &str) -> StoreResult<Vec<RosterEntry>>;
    fn save_entry(&mut self, player_id: &str, entry: &RosterEntry) -> StoreResult<()>;
    fn delete_entry(&mut self, player_id: &str, entry_id: &str) -> StoreResult<()>;
}
