use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagateError {
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("epoch conversion error: {0}")]
    Epoch(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("propagator returned a non-finite position")]
    NonFinite,
}
