//! Session-scoped battle state: the phase machine, the event bus that
//! records everything a presenter would narrate, and the injected random
//! source every probabilistic decision draws from.

use crate::battle::combatant::StatusCondition;
use crate::species::StatKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Where a battle session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Pre-battle presentation window; the partial heal lands here
    Intro,
    /// Accepting player actions
    Battle,
    /// Wild opponent defeated; a capture attempt is still possible
    Victory,
    /// Capture attempt in flight
    Capture,
    /// Whole roster fainted
    Defeat,
    /// Terminal, no further actions accepted
    Ended,
}

/// How a finished battle came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
    Captured,
}

impl BattleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            BattleOutcome::Victory => "victory",
            BattleOutcome::Defeat => "defeat",
            BattleOutcome::Fled => "fled",
            BattleOutcome::Captured => "captured",
        }
    }
}

/// Everything observable that happens during a battle, in order. The engine
/// pushes these; presenters format them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted { player: String, wild: String, floor: u32 },
    WildAppeared { name: String, rarity: String, is_shiny: bool },
    IntroHealed { name: String, amount: u16 },
    ExchangeStarted { number: u32 },
    MoveUsed { attacker: String, move_name: String },
    UnknownMoveSubstituted { attacker: String, move_name: String },
    MoveMissed { attacker: String, move_name: String },
    DamageDealt {
        target: String,
        amount: u16,
        effectiveness: f64,
        critical: bool,
    },
    NoEffect { target: String },
    StatusInflicted { target: String, status: StatusCondition },
    StatusRefused { target: String },
    StatChanged {
        target: String,
        stat: StatKind,
        delta: i8,
        new_stage: i8,
    },
    /// The stage was already clamped at the boundary; nothing moved
    StatLimitReached {
        target: String,
        stat: StatKind,
        delta: i8,
    },
    Asleep { name: String },
    WokeUp { name: String },
    FullyParalyzed { name: String },
    Frozen { name: String },
    Thawed { name: String },
    ResidualDamage {
        name: String,
        status: StatusCondition,
        amount: u16,
    },
    Fainted { name: String },
    SwitchedOut { name: String },
    SwitchedIn { name: String },
    FleeAttempted { name: String, success: bool },
    CaptureAttempted { chance: u8, success: bool },
    Captured { name: String },
    CaptureFailed { name: String },
    ExperienceGained { name: String, amount: u32 },
    LeveledUp { name: String, level: u8 },
    BattleEnded { outcome: BattleOutcome },
}

impl BattleEvent {
    /// Human-readable line for this event, or `None` for events that are
    /// bookkeeping only.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { wild, floor, .. } => {
                Some(format!("Floor {}: a wild {} appeared!", floor, wild))
            }
            BattleEvent::WildAppeared { name, rarity, is_shiny } => {
                if *is_shiny {
                    Some(format!("The {} {} is shiny!", rarity, name))
                } else {
                    Some(format!("It looks {}.", rarity))
                }
            }
            BattleEvent::IntroHealed { name, amount } => {
                Some(format!("{} recovered {} HP before the fight.", name, amount))
            }
            BattleEvent::ExchangeStarted { .. } => None,
            BattleEvent::MoveUsed { attacker, move_name } => {
                Some(format!("{} used {}!", attacker, move_name))
            }
            BattleEvent::UnknownMoveSubstituted { attacker, .. } => {
                Some(format!("{} improvised an attack!", attacker))
            }
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::DamageDealt {
                target,
                amount,
                effectiveness,
                critical,
            } => {
                let mut line = format!("{} took {} damage.", target, amount);
                if *critical {
                    line.push_str(" A critical hit!");
                }
                if *effectiveness > 1.0 {
                    line.push_str(" It's super effective!");
                } else if *effectiveness < 1.0 && *effectiveness > 0.0 {
                    line.push_str(" It's not very effective...");
                }
                Some(line)
            }
            BattleEvent::NoEffect { target } => {
                Some(format!("It doesn't affect {}...", target))
            }
            BattleEvent::StatusInflicted { target, status } => {
                let line = match status {
                    StatusCondition::Sleep(_) => format!("{} fell asleep!", target),
                    StatusCondition::Paralysis => format!("{} is paralyzed!", target),
                    StatusCondition::Freeze => format!("{} was frozen solid!", target),
                    StatusCondition::Burn => format!("{} was burned!", target),
                    StatusCondition::Poison => format!("{} was poisoned!", target),
                };
                Some(line)
            }
            BattleEvent::StatusRefused { .. } => None,
            BattleEvent::StatChanged { target, stat, delta, .. } => {
                let direction = if *delta > 0 { "rose" } else { "fell" };
                Some(format!("{}'s {} {}!", target, stat.label(), direction))
            }
            BattleEvent::StatLimitReached { target, stat, delta } => {
                let direction = if *delta > 0 { "higher" } else { "lower" };
                Some(format!(
                    "{}'s {} won't go any {}!",
                    target,
                    stat.label(),
                    direction
                ))
            }
            BattleEvent::Asleep { name } => Some(format!("{} is fast asleep.", name)),
            BattleEvent::WokeUp { name } => Some(format!("{} woke up!", name)),
            BattleEvent::FullyParalyzed { name } => {
                Some(format!("{} is paralyzed and can't move!", name))
            }
            BattleEvent::Frozen { name } => Some(format!("{} is frozen solid!", name)),
            BattleEvent::Thawed { name } => Some(format!("{} thawed out!", name)),
            BattleEvent::ResidualDamage { name, status, amount } => {
                Some(format!("{} took {} damage from {}.", name, amount, status.label()))
            }
            BattleEvent::Fainted { name } => Some(format!("{} fainted!", name)),
            BattleEvent::SwitchedOut { name } => Some(format!("{} was called back.", name)),
            BattleEvent::SwitchedIn { name } => Some(format!("Go, {}!", name)),
            BattleEvent::FleeAttempted { name, success } => {
                if *success {
                    Some(format!("{} got away safely!", name))
                } else {
                    Some("Couldn't escape!".to_string())
                }
            }
            BattleEvent::CaptureAttempted { chance, .. } => {
                Some(format!("Threw a capture orb ({}% chance)...", chance))
            }
            BattleEvent::Captured { name } => Some(format!("Gotcha! {} was caught!", name)),
            BattleEvent::CaptureFailed { name } => {
                Some(format!("Oh no! {} broke free!", name))
            }
            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} experience.", name, amount))
            }
            BattleEvent::LeveledUp { name, level } => {
                Some(format!("{} grew to level {}!", name, level))
            }
            BattleEvent::BattleEnded { outcome } => {
                Some(format!("The battle ended: {}.", outcome.label()))
            }
        }
    }
}

/// Ordered log of battle events, owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Formatted lines, skipping bookkeeping events.
    pub fn narration(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

/// All randomness in a battle flows through one of these. Outcomes are
/// basis-point rolls in 1..=10_000 so sixteenth-odds and percent checks are
/// both exact. The scripted variant replays a fixed tape for tests and
/// panics if the tape runs out, which is always a test bug.
#[derive(Debug, Clone)]
pub enum BattleRng {
    Scripted { outcomes: Vec<u16>, index: usize },
    Live(StdRng),
}

impl BattleRng {
    pub fn new_random() -> Self {
        BattleRng::Live(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        BattleRng::Live(StdRng::seed_from_u64(seed))
    }

    pub fn new_for_test(outcomes: Vec<u16>) -> Self {
        BattleRng::Scripted { outcomes, index: 0 }
    }

    /// Draw the next outcome in 1..=10_000. The reason string documents
    /// what the roll decides; scripted tests line their tapes up against it.
    pub fn next_outcome(&mut self, reason: &str) -> u16 {
        match self {
            BattleRng::Scripted { outcomes, index } => {
                let value = *outcomes
                    .get(*index)
                    .unwrap_or_else(|| panic!("scripted rng exhausted at: {}", reason));
                *index += 1;
                debug_assert!((1..=10_000).contains(&value), "bad scripted outcome {}", value);
                value
            }
            BattleRng::Live(rng) => rng.random_range(1..=10_000),
        }
    }

    /// Uniform index into a collection of `len` items.
    pub fn next_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0);
        (self.next_outcome(reason) as usize - 1) % len
    }

    /// Percent check: true with probability `percent`/100.
    pub fn percent_check(&mut self, percent: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= percent as u16 * 100
    }
}
