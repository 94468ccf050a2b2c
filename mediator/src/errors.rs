#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MediatorError {
    #[error("no engine is attached")]
    Detached,
    #[error("the attached engine has been dropped")]
    EngineGone,
    #[error("notifications from the engine are not wired")]
    NotWired,
    #[error("the engine is already busy with another call")]
    EngineBusy,
    #[error("nothing to open")]
    EmptyOpen,
    #[error("'{0}' can not be played yet")]
    Unsupported(&'static str),
}

pub type MediatorResult<T> = Result<T, MediatorError>;
