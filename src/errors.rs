use std::fmt;

/// Main error type for the creature battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// An action the player is allowed to ask for but that the current
    /// battle state rejects. Surfaced to the input layer as a user-facing
    /// message; battle state is never mutated.
    Action(ActionError),
    /// A programming-contract violation, e.g. submitting an action while
    /// the engine is not collecting input.
    State(BattleStateError),
    /// Error related to move or species data lookup or loading
    Data(DataError),
}

/// Invalid actions, rejected before any state mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index is out of bounds for the active creature
    InvalidMoveIndex(usize),
    /// The selected move has no PP remaining
    NoPpRemaining(String),
    /// Party index is out of bounds
    InvalidPartyIndex(usize),
    /// The switch target has fainted
    SwitchTargetFainted(String),
    /// The switch target is already the active creature
    SwitchTargetActive(String),
    /// No usable item with this id exists
    NoUsableItem(String),
    /// A forced replacement is pending; only a switch is accepted
    SwitchRequired,
}

/// Contract violations on the engine's state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// An action was submitted while the engine was not collecting input
    NotAcceptingActions,
    /// The battle has already concluded
    BattleFinished,
    /// A combatant was constructed with an empty party
    EmptyParty,
}

/// Errors related to the read-only data tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The move key was not found in the registry
    MoveNotFound(String),
    /// The species key was not found in the registry
    SpeciesNotFound(String),
    /// The data directory does not exist
    DataDirNotFound(String),
    /// A filesystem error occurred while loading data
    Io(String),
    /// A RON definition failed to parse
    Parse(String),
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::Action(err) => write!(f, "{}", err),
            BattleEngineError::State(err) => write!(f, "Battle state error: {}", err),
            BattleEngineError::Data(err) => write!(f, "Data error: {}", err),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => {
                write!(f, "There is no move in slot {}!", index)
            }
            ActionError::NoPpRemaining(name) => write!(f, "{} has no PP left!", name),
            ActionError::InvalidPartyIndex(index) => {
                write!(f, "There is no creature in party slot {}!", index)
            }
            ActionError::SwitchTargetFainted(name) => {
                write!(f, "You can't send out a fainted creature! ({})", name)
            }
            ActionError::SwitchTargetActive(name) => {
                write!(f, "You can't switch with the same creature! ({})", name)
            }
            ActionError::NoUsableItem(id) => write!(f, "There is no usable item '{}'!", id),
            ActionError::SwitchRequired => {
                write!(f, "A replacement creature must be chosen first!")
            }
        }
    }
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::NotAcceptingActions => {
                write!(f, "the engine is not collecting input")
            }
            BattleStateError::BattleFinished => write!(f, "the battle has already concluded"),
            BattleStateError::EmptyParty => write!(f, "a combatant needs at least one creature"),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::MoveNotFound(key) => write!(f, "move not found: {}", key),
            DataError::SpeciesNotFound(key) => write!(f, "species not found: {}", key),
            DataError::DataDirNotFound(path) => {
                write!(f, "data directory not found: {}", path)
            }
            DataError::Io(details) => write!(f, "i/o error while loading data: {}", details),
            DataError::Parse(details) => write!(f, "malformed data definition: {}", details),
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for ActionError {}
impl std::error::Error for BattleStateError {}
impl std::error::Error for DataError {}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::Action(err)
    }
}

impl From<BattleStateError> for BattleEngineError {
    fn from(err: BattleStateError) -> Self {
        BattleEngineError::State(err)
    }
}

impl From<DataError> for BattleEngineError {
    fn from(err: DataError) -> Self {
        BattleEngineError::Data(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
