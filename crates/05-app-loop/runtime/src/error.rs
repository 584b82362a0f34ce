use screen::Failure;
use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("program failed during init: {0}")]
    Init(#[source] Failure),

    #[error("program halted after {faults} faults")]
    Halted { faults: u32 },
}
