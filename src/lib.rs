pub mod battle;
pub mod encounter;
pub mod errors;
pub mod moves;
pub mod prefab;
pub mod roster;
pub mod run;
pub mod species;

pub use battle::combatant::{Combatant, MoveSlot, StatStages, StatusCondition};
pub use battle::engine::BattleSession;
pub use battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleRng, EventBus};
pub use errors::{ActionError, EngineError, EngineResult};
pub use moves::{MoveData, MoveKind};
pub use roster::{Rarity, RosterEntry, RosterStore};
pub use run::{
    FloorResult, RunOrchestrator, RunOutcome, RunState, RunStats, RunSummary, RunSummarySink,
};
pub use species::{ElementType, SpeciesCatalog, SpeciesData, StatBlock, StatKind};
