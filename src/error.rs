use core::convert::Infallible;
use thiserror::Error;

/// Errors raised while building a population or loading its rules.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown organism variant {0:?}, expected Cooperator, Defector or PartialCooperator")]
    UnknownVariant(String),
    #[error("population must contain at least one organism")]
    EmptyPopulation,
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
