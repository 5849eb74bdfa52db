//! Lookup errors raised by the pipeline stages.

use crate::domain::value_objects::Stage;
use thiserror::Error;

/// Why a stage could not produce its result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupCause {
    /// The outbound call failed: connect error, timeout or non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be normalized into the domain model.
    #[error("decode error: {0}")]
    Decode(String),

    /// The response was well formed but held no usable entries.
    #[error("empty data: {0}")]
    EmptyData(String),
}

impl LookupCause {
    /// Short machine-readable name of the cause.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::EmptyData(_) => "emptyData",
        }
    }
}

/// A provider value that violates an entity invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidEntity {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),

    #[error("temperature {0} is not finite")]
    Temperature(f64),
}

/// Failure of one pipeline stage. Always fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} lookup failed: {cause}")]
pub struct LookupError {
    pub stage: Stage,
    pub cause: LookupCause,
}

impl LookupError {
    pub fn new(stage: Stage, cause: LookupCause) -> Self {
        Self { stage, cause }
    }

    pub fn transport<S: Into<String>>(stage: Stage, message: S) -> Self {
        Self::new(stage, LookupCause::Transport(message.into()))
    }

    pub fn decode<S: Into<String>>(stage: Stage, message: S) -> Self {
        Self::new(stage, LookupCause::Decode(message.into()))
    }

    pub fn empty_data<S: Into<String>>(stage: Stage, message: S) -> Self {
        Self::new(stage, LookupCause::EmptyData(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LookupError::transport(Stage::Address, "connection refused");
        assert_eq!(err.stage, Stage::Address);
        assert!(matches!(err.cause, LookupCause::Transport(_)));

        let err = LookupError::decode(Stage::Location, "missing field `lat`");
        assert!(matches!(err.cause, LookupCause::Decode(_)));

        let err = LookupError::empty_data(Stage::Weather, "no conditions");
        assert!(matches!(err.cause, LookupCause::EmptyData(_)));
    }

    #[test]
    fn test_message_names_stage_and_cause() {
        let err = LookupError::transport(Stage::Address, "connection refused");
        let msg = err.to_string();
        assert!(msg.starts_with("Address lookup failed"));
        assert!(msg.contains("transport error"));
        assert!(msg.contains("connection refused"));

        let err = LookupError::empty_data(Stage::Weather, "weather list is empty");
        assert_eq!(
            err.to_string(),
            "Weather lookup failed: empty data: weather list is empty"
        );
    }

    #[test]
    fn test_cause_kind() {
        assert_eq!(LookupCause::Transport(String::new()).kind(), "transport");
        assert_eq!(LookupCause::Decode(String::new()).kind(), "decode");
        assert_eq!(LookupCause::EmptyData(String::new()).kind(), "emptyData");
    }
}
