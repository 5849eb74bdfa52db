//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely copied.

use serde::Serialize;
use std::fmt;

/// One of the three sequential external lookups of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Discovery of the caller's public network address
    Address,
    /// Geolocation of that address
    Location,
    /// Current weather at the resolved coordinates
    Weather,
}

impl Stage {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Location => "Location",
            Self::Weather => "Weather",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single pipeline run.
///
/// ```text
/// Idle -> ResolvingAddress -> ResolvingLocation -> ResolvingWeather -> Done
///              \                     \                    \
///               +---------------------+--------------------+--> Failed(stage)
/// ```
///
/// `Done` and `Failed` are absorbing: once reached, no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ResolvingAddress,
    ResolvingLocation,
    ResolvingWeather,
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// The stage currently being resolved, if the run is in progress.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::ResolvingAddress => Some(Stage::Address),
            Self::ResolvingLocation => Some(Stage::Location),
            Self::ResolvingWeather => Some(Stage::Weather),
            Self::Idle | Self::Done | Self::Failed(_) => None,
        }
    }

    /// Transition taken when the current step completes successfully.
    pub fn advance(self) -> Self {
        match self {
            Self::Idle => Self::ResolvingAddress,
            Self::ResolvingAddress => Self::ResolvingLocation,
            Self::ResolvingLocation => Self::ResolvingWeather,
            Self::ResolvingWeather => Self::Done,
            terminal @ (Self::Done | Self::Failed(_)) => terminal,
        }
    }

    /// Transition taken when the current stage fails.
    ///
    /// Only in-progress states can fail; `Idle` and terminal states are
    /// returned unchanged.
    pub fn fail(self) -> Self {
        match self.stage() {
            Some(stage) => Self::Failed(stage),
            None => self,
        }
    }

    /// Whether the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Address.to_string(), "Address");
        assert_eq!(Stage::Location.to_string(), "Location");
        assert_eq!(Stage::Weather.to_string(), "Weather");
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut state = PipelineState::default();
        assert_eq!(state, PipelineState::Idle);

        state = state.advance();
        assert_eq!(state, PipelineState::ResolvingAddress);
        state = state.advance();
        assert_eq!(state, PipelineState::ResolvingLocation);
        state = state.advance();
        assert_eq!(state, PipelineState::ResolvingWeather);
        state = state.advance();
        assert_eq!(state, PipelineState::Done);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_fail_from_each_in_progress_state() {
        assert_eq!(
            PipelineState::ResolvingAddress.fail(),
            PipelineState::Failed(Stage::Address)
        );
        assert_eq!(
            PipelineState::ResolvingLocation.fail(),
            PipelineState::Failed(Stage::Location)
        );
        assert_eq!(
            PipelineState::ResolvingWeather.fail(),
            PipelineState::Failed(Stage::Weather)
        );
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        let failed = PipelineState::Failed(Stage::Location);
        assert_eq!(failed.advance(), failed);
        assert_eq!(failed.fail(), failed);

        assert_eq!(PipelineState::Done.advance(), PipelineState::Done);
        assert_eq!(PipelineState::Done.fail(), PipelineState::Done);
    }

    #[test]
    fn test_idle_cannot_fail() {
        assert_eq!(PipelineState::Idle.fail(), PipelineState::Idle);
        assert!(!PipelineState::Idle.is_terminal());
    }

    #[test]
    fn test_stage_of_state() {
        assert_eq!(PipelineState::Idle.stage(), None);
        assert_eq!(PipelineState::ResolvingWeather.stage(), Some(Stage::Weather));
        assert_eq!(PipelineState::Done.stage(), None);
    }
}
