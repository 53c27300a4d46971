use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("{0} is not in the visible set")]
    NotVisible(String),
}
