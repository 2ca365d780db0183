use thiserror::Error;

use crate::model::ParseTimeError;
use crate::routing::SearchError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown stop: {0}")]
    UnknownStop(String),
    #[error("unknown line: {0}")]
    UnknownLine(String),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("stop index {index} out of range for a schedule of {stop_count} stops")]
    StopIndexOutOfRange { index: usize, stop_count: usize },
    #[error("time line of {got} entries does not fit a fragment of {expected} stops")]
    TimeLineLength { expected: usize, got: usize },
    #[error(transparent)]
    Time(#[from] ParseTimeError),
    #[error("invalid day: {0}")]
    InvalidDay(String),
    #[error("invalid detail level: {0}")]
    InvalidDetails(String),
    #[error("network description error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Search(#[from] SearchError),
}
