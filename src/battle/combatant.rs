use crate::moves::{move_max_pp, validate_move_list};
use crate::roster::{Rarity, RosterEntry};
use crate::species::{ElementType, StatBlock, StatKind};
use serde::{Deserialize, Serialize};

/// Status condition. A combatant holds at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Asleep for the given number of remaining turns
    Sleep(u8),
    Paralysis,
    Freeze,
    Burn,
    Poison,
}

impl StatusCondition {
    pub fn label(&self) -> &'static str {
        match self {
            StatusCondition::Sleep(_) => "sleep",
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Freeze => "freeze",
            StatusCondition::Burn => "burn",
            StatusCondition::Poison => "poison",
        }
    }
}

/// The six per-stat stage counters, each clamped to [-6, +6].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages([i8; 6]);

impl StatStages {
    pub fn get(&self, stat: StatKind) -> i8 {
        self.0[stat.index()]
    }

    /// Shift a stage by a delta, clamping at the boundary. Returns the new
    /// stage value.
    pub fn modify(&mut self, stat: StatKind, delta: i8) -> i8 {
        let updated = (self.0[stat.index()] + delta).clamp(-6, 6);
        self.0[stat.index()] = updated;
        updated
    }

    pub fn reset(&mut self) {
        self.0 = [0; 6];
    }

    pub fn is_neutral(&self) -> bool {
        self.0 == [0; 6]
    }
}

/// One known move with its remaining-use counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub name: String,
    pub pp: u8,
}

impl MoveSlot {
    pub fn new(name: String) -> Self {
        let pp = move_max_pp(&name);
        MoveSlot { name, pp }
    }
}

/// Battle-scoped state for one monster. Owned exclusively by a single
/// battle session; only HP, session level and experience survive the
/// session, folded back by the run orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub species_id: u32,
    pub elements: Vec<ElementType>,
    /// Persisted (or encounter-randomized) base stats
    pub base_stats: StatBlock,
    /// Computed stats at the current session level
    pub stats: StatBlock,
    pub current_hp: u16,
    pub max_hp: u16,
    pub stages: StatStages,
    pub status: Option<StatusCondition>,
    /// At most 4 entries
    pub moves: Vec<MoveSlot>,
    pub session_level: u8,
    pub exp_gained: u32,
    pub rarity: Rarity,
    pub is_shiny: bool,
    pub sprite: String,
}

/// Per-stat bonus applied for each session level.
pub const STAT_PER_LEVEL: u16 = 3;
/// Max-HP bonus applied for each session level.
pub const HP_PER_LEVEL: u16 = 5;

impl Combatant {
    /// Snapshot a roster entry for a new run: full HP, session level 1, no
    /// accumulated experience. Known moves are validated against the move
    /// catalog and padded to four.
    pub fn from_roster_entry(entry: &RosterEntry) -> Self {
        let moves = validate_move_list(&entry.moves, &entry.elements)
            .into_iter()
            .map(MoveSlot::new)
            .collect();

        Combatant {
            name: entry.display_name().to_string(),
            species_id: entry.species_id,
            elements: entry.elements.clone(),
            base_stats: entry.stats,
            stats: entry.stats,
            current_hp: entry.stats.hp,
            max_hp: entry.stats.hp,
            stages: StatStages::default(),
            status: None,
            moves,
            session_level: 1,
            exp_gained: 0,
            rarity: entry.rarity,
            is_shiny: entry.is_shiny,
            sprite: entry.sprite.clone(),
        }
    }

    /// Convert a defeated-and-captured wild opponent into a roster entry.
    /// The randomized base stats are persisted, not the scaled battle stats.
    pub fn to_roster_entry(
        &self,
        id: String,
        captured_floor: u32,
        created_at: u64,
    ) -> RosterEntry {
        RosterEntry {
            id,
            species_id: self.species_id,
            name: self.name.clone(),
            nickname: None,
            elements: self.elements.clone(),
            stats: self.base_stats,
            moves: self.moves.iter().map(|slot| slot.name.clone()).collect(),
            rarity: self.rarity,
            is_shiny: self.is_shiny,
            sprite: self.sprite.clone(),
            created_at,
            captured_floor: Some(captured_floor),
            token_ref: None,
        }
    }

    pub fn primary_element(&self) -> ElementType {
        self.elements.first().copied().unwrap_or(ElementType::Normal)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage, flooring HP at 0. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore HP, capped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// The intro-phase partial heal: a fifth of max HP, capped at max.
    pub fn apply_intro_heal(&mut self) -> u16 {
        self.heal(self.max_hp / 5)
    }

    /// Stat stages and transient status reset when a combatant switches in.
    pub fn reset_on_switch_in(&mut self) {
        self.stages.reset();
        self.status = None;
    }

    /// Residual burn damage, floor(maxHP / 16).
    pub fn burn_damage(&self) -> u16 {
        self.max_hp / 16
    }

    /// Residual poison damage, floor(maxHP / 8).
    pub fn poison_damage(&self) -> u16 {
        self.max_hp / 8
    }

    /// Session level implied by accumulated experience:
    /// floor(cbrt(exp / 100)) + 1.
    pub fn level_for_exp(exp: u32) -> u8 {
        ((exp as f64 / 100.0).cbrt().floor() as u8).saturating_add(1)
    }

    /// Grant experience. If the implied level rises, computed stats are
    /// rescaled from base stats and the new level; current HP is unchanged
    /// (leveling never heals). Returns the new level when it changed.
    pub fn grant_exp(&mut self, amount: u32) -> Option<u8> {
        self.exp_gained += amount;
        let new_level = Self::level_for_exp(self.exp_gained);
        if new_level <= self.session_level {
            return None;
        }

        self.session_level = new_level;
        let level = new_level as u16;
        self.stats = self.base_stats.map(|stat| stat + level * STAT_PER_LEVEL);
        self.max_hp = self.base_stats.hp + level * HP_PER_LEVEL;
        self.current_hp = self.current_hp.min(self.max_hp);
        Some(new_level)
    }
}
