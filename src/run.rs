//! The run orchestrator.
//!
//! A run walks a roster up the tower floor by floor. Each floor draws a
//! biome and a wild opponent, hands the roster to a battle session, and
//! folds the surviving state back when the session ends. The run keeps
//! going until a defeat, a flee, or a degenerate all-fainted victory.

use crate::battle::combatant::Combatant;
use crate::battle::engine::BattleSession;
use crate::battle::state::{BattleOutcome, BattleRng};
use crate::encounter::{generate_wild, random_biome, Biome};
use crate::errors::{BattleStateError, EngineError, EngineResult, StoreResult};
use crate::roster::{RosterEntry, RosterStore};
use crate::species::SpeciesCatalog;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Whole roster fainted
    Defeat,
    /// Player fled a battle, abandoning the run
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Active,
    Finished(RunOutcome),
}

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub battles_won: u32,
    pub captures: u32,
    pub floors_cleared: u32,
}

/// Per-combatant line in the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantReport {
    pub name: String,
    pub level: u8,
    pub experience: u32,
    pub remaining_hp: u16,
}

/// The record handed to the summary sink when a run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub player_id: String,
    pub outcome: RunOutcome,
    pub floors_cleared: u32,
    pub battles_won: u32,
    pub captures: u32,
    /// Seconds since the Unix epoch
    pub started_at: u64,
    pub ended_at: u64,
    pub combatants: Vec<CombatantReport>,
}

/// Write-only sink for finished-run summaries. A failed write never
/// corrupts the in-memory result.
pub trait RunSummarySink {
    fn record_run_outcome(&mut self, summary: &RunSummary) -> StoreResult<()>;
}

/// What a finished floor means for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorResult {
    /// Floor cleared, the next one is ready
    Continue,
    Finished(RunOutcome),
}

pub struct RunOrchestrator<'a> {
    catalog: &'a dyn SpeciesCatalog,
    store: &'a mut dyn RosterStore,
    sink: &'a mut dyn RunSummarySink,
    player_id: String,
    roster: Vec<Combatant>,
    /// None while a battle session holds the random source
    rng: Option<BattleRng>,
    floor: u32,
    stats: RunStats,
    state: RunState,
    started_at: u64,
    current_biome: Option<&'static Biome>,
    /// Non-fatal collaborator failures, kept for diagnosability
    warnings: Vec<String>,
}

impl<'a> RunOrchestrator<'a> {
    /// Load the player's roster and snapshot it into fresh combatants. A
    /// roster that cannot be loaded, or is empty, refuses to start the run.
    pub fn start_run(
        catalog: &'a dyn SpeciesCatalog,
        store: &'a mut dyn RosterStore,
        sink: &'a mut dyn RunSummarySink,
        player_id: &str,
        rng: BattleRng,
    ) -> EngineResult<Self> {
        let entries = store.load_roster(player_id)?;
        if entries.is_empty() {
            return Err(EngineError::Battle(BattleStateError::EmptyRoster));
        }
        let roster = entries.iter().map(Combatant::from_roster_entry).collect();

        Ok(RunOrchestrator {
            catalog,
            store,
            sink,
            player_id: player_id.to_string(),
            roster,
            rng: Some(rng),
            floor: 1,
            stats: RunStats::default(),
            state: RunState::Active,
            started_at: unix_now(),
            current_biome: None,
            warnings: Vec::new(),
        })
    }

    pub fn current_floor(&self) -> u32 {
        self.floor
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn current_biome(&self) -> Option<&'static Biome> {
        self.current_biome
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Draw a biome and an opponent for the current floor and open a battle
    /// session, moving the roster and the random source into it.
    pub fn begin_floor(&mut self) -> EngineResult<BattleSession> {
        if self.state != RunState::Active {
            return Err(inconsistent("run already finished"));
        }
        let mut rng = self
            .rng
            .take()
            .ok_or_else(|| inconsistent("a battle is already in progress"))?;

        let biome = random_biome(&mut rng);
        self.current_biome = Some(biome);
        let wild = match generate_wild(self.catalog, biome, self.floor, &mut rng) {
            Ok(wild) => wild,
            Err(err) => {
                self.rng = Some(rng);
                return Err(err.into());
            }
        };

        // a roster with nothing standing cannot open a battle; caught here
        // so the roster and the random source stay with the orchestrator
        if self.roster.iter().all(Combatant::is_fainted) {
            self.rng = Some(rng);
            return Err(BattleStateError::NoActiveCombatant.into());
        }

        let roster = std::mem::take(&mut self.roster);
        Ok(BattleSession::new(roster, wild, self.floor, rng)?)
    }

    /// Take a finished session back, fold its state into the run and decide
    /// whether the run continues.
    pub fn finish_floor(&mut self, session: BattleSession) -> EngineResult<FloorResult> {
        if !session.is_over() {
            return Err(inconsistent("battle session still in progress"));
        }
        let outcome = session
            .outcome()
            .ok_or_else(|| inconsistent("finished session has no outcome"))?;

        let (roster, wild, _events, rng) = session.into_parts();
        self.roster = roster;
        self.rng = Some(rng);

        match outcome {
            BattleOutcome::Captured => {
                self.persist_capture(&wild);
                self.stats.captures += 1;
                self.clear_floor()
            }
            BattleOutcome::Victory => self.clear_floor(),
            BattleOutcome::Defeat => Ok(self.end_run(RunOutcome::Defeat)),
            BattleOutcome::Fled => Ok(self.end_run(RunOutcome::Fled)),
        }
    }

    fn clear_floor(&mut self) -> EngineResult<FloorResult> {
        self.stats.battles_won += 1;
        self.stats.floors_cleared += 1;

        // victory with nothing left standing still ends the run
        if self.roster.iter().all(Combatant::is_fainted) {
            return Ok(self.end_run(RunOutcome::Defeat));
        }

        self.floor += 1;
        Ok(FloorResult::Continue)
    }

    fn persist_capture(&mut self, wild: &Combatant) {
        let created_at = unix_now();
        let id = format!("{}-f{}-{}", wild.species_id, self.floor, created_at);
        let entry = wild.to_roster_entry(id, self.floor, created_at);
        if let Err(err) = self.store.save_entry(&self.player_id, &entry) {
            self.warnings
                .push(format!("capture persistence failed: {}", err));
        }
    }

    fn end_run(&mut self, outcome: RunOutcome) -> FloorResult {
        self.state = RunState::Finished(outcome);

        let summary = RunSummary {
            player_id: self.player_id.clone(),
            outcome,
            floors_cleared: self.stats.floors_cleared,
            battles_won: self.stats.battles_won,
            captures: self.stats.captures,
            started_at: self.started_at,
            ended_at: unix_now(),
            combatants: self
                .roster
                .iter()
                .map(|c| CombatantReport {
                    name: c.name.clone(),
                    level: c.session_level,
                    experience: c.exp_gained,
                    remaining_hp: c.current_hp,
                })
                .collect(),
        };
        if let Err(err) = self.sink.record_run_outcome(&summary) {
            self.warnings
                .push(format!("run summary persistence failed: {}", err));
        }

        FloorResult::Finished(outcome)
    }
}

fn inconsistent(detail: &str) -> EngineError {
    EngineError::Battle(BattleStateError::InconsistentState(detail.to_string()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
