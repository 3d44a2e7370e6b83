use thiserror::Error;

/// Combat-action errors. All of these are recoverable: a rejected
/// operation is a no-op and the engine stays in its pre-call state,
/// so the caller can simply retry with a corrected action.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("no active combat session")]
    NoActiveCombat,

    #[error("card not available: not owned, exhausted, or already played this round")]
    CardUnavailable,

    #[error("round not ready: both sides must select a card first")]
    RoundNotReady,

    #[error("invalid target: unresolvable territory or empty attacking roster")]
    InvalidTarget,

    #[error("a combat session is already active")]
    AlreadyActive,
}

pub type Result<T> = std::result::Result<T, EngineError>;
