use std::fmt;

/// Main error type for the battle core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error raised by the species/move reference collaborator
    Catalog(CatalogError),
    /// Error raised by the roster persistence collaborator
    Store(StoreError),
    /// Error related to an inconsistent battle session
    Battle(BattleStateError),
    /// A player action that was rejected without consuming a turn
    Action(ActionError),
}

/// Errors raised by the species reference collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The species id is not present in the reference catalog
    SpeciesNotFound(u32),
    /// The catalog is empty or otherwise unusable
    Unavailable(String),
    /// Species data is malformed or incomplete
    MalformedData(String),
}

/// Errors raised by the persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Roster could not be loaded. Fatal to starting a run.
    LoadFailed(String),
    /// A write failed. Never fatal to in-memory state.
    SaveFailed(String),
}

/// Errors related to battle session validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// No living combatant found when one was expected
    NoActiveCombatant,
    /// A session cannot start without at least one combatant
    EmptyRoster,
    /// Session is in an inconsistent state
    InconsistentState(String),
}

/// Rejected player actions. These consume no turn and mutate no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index is out of bounds for the active combatant
    InvalidMoveIndex(usize),
    /// The selected move has no remaining uses
    NoUsesRemaining(String),
    /// Roster index is out of bounds
    InvalidRosterIndex(usize),
    /// The switch target has fainted
    FaintedSwitchTarget(usize),
    /// The switch target is already the active combatant
    AlreadyActive(usize),
    /// The action is not valid in the session's current phase
    WrongPhase(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Catalog(err) => write!(f, "Catalog error: {}", err),
            EngineError::Store(err) => write!(f, "Store error: {}", err),
            EngineError::Battle(err) => write!(f, "Battle state error: {}", err),
            EngineError::Action(err) => write!(f, "Action error: {}", err),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::SpeciesNotFound(id) => write!(f, "Species not found: #{}", id),
            CatalogError::Unavailable(details) => write!(f, "Catalog unavailable: {}", details),
            CatalogError::MalformedData(details) => write!(f, "Malformed species data: {}", details),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LoadFailed(details) => write!(f, "Roster load failed: {}", details),
            StoreError::SaveFailed(details) => write!(f, "Persistence write failed: {}", details),
        }
    }
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::NoActiveCombatant => write!(f, "No active combatant found"),
            BattleStateError::EmptyRoster => write!(f, "Cannot battle with an empty roster"),
            BattleStateError::InconsistentState(details) => {
                write!(f, "Inconsistent battle state: {}", details)
            }
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::NoUsesRemaining(name) => write!(f, "No PP left for {}", name),
            ActionError::InvalidRosterIndex(index) => write!(f, "Invalid roster index: {}", index),
            ActionError::FaintedSwitchTarget(index) => {
                write!(f, "Combatant {} has fainted and cannot battle", index)
            }
            ActionError::AlreadyActive(index) => {
                write!(f, "Combatant {} is already active", index)
            }
            ActionError::WrongPhase(details) => write!(f, "Invalid in this phase: {}", details),
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for StoreError {}
impl std::error::Error for BattleStateError {}
impl std::error::Error for ActionError {}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        EngineError::Catalog(err)
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err)
    }
}

impl From<BattleStateError> for EngineError {
    fn from(err: BattleStateError) -> Self {
        EngineError::Battle(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results of player action submissions
pub type ActionResult<T> = Result<T, ActionError>;

/// Type alias for Results of reference catalog lookups
pub type SpeciesDataResult<T> = Result<T, CatalogError>;

/// Type alias for Results of persistence collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;
