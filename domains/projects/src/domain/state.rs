//! Publishing-status state machine
//!
//! A project moves through the publish workflow as follows:
//!
//! ```text
//! idle --start--> publishing --succeed--> completed (terminal)
//!                    |   ^
//!                  fail  retry
//!                    v   |
//!                   failed
//! ```

use std::str::FromStr;

use edio_common::StateError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Publishing State Machine
// ============================================================================

/// States of the publish workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishingState {
    Idle,
    Publishing,
    Completed,
    Failed,
}

impl PublishingState {
    pub const ALL: [PublishingState; 4] = [
        PublishingState::Idle,
        PublishingState::Publishing,
        PublishingState::Completed,
        PublishingState::Failed,
    ];

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [PublishingState] {
        match self {
            Self::Idle => &[Self::Publishing],
            Self::Publishing => &[Self::Completed, Self::Failed],
            Self::Completed => &[],
            Self::Failed => &[Self::Publishing],
        }
    }
}

impl std::fmt::Display for PublishingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Publishing => write!(f, "publishing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Events that drive the publish workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishEvent {
    /// Owner initiates a publish
    Start,
    /// Publish job reported success
    Succeed,
    /// Publish job reported failure
    Fail,
    /// Owner retries a failed publish
    Retry,
}

impl std::fmt::Display for PublishEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Succeed => write!(f, "succeed"),
            Self::Fail => write!(f, "fail"),
            Self::Retry => write!(f, "retry"),
        }
    }
}

impl FromStr for PublishEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "succeed" => Ok(Self::Succeed),
            "fail" => Ok(Self::Fail),
            "retry" => Ok(Self::Retry),
            other => Err(format!("unknown publish event '{}'", other)),
        }
    }
}

/// Publishing state machine
pub struct PublishingStateMachine;

impl PublishingStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if `event` is accepted in `current`.
    pub fn transition(
        current: PublishingState,
        event: PublishEvent,
    ) -> Result<PublishingState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (PublishingState::Idle, PublishEvent::Start) => PublishingState::Publishing,
            (PublishingState::Publishing, PublishEvent::Succeed) => PublishingState::Completed,
            (PublishingState::Publishing, PublishEvent::Fail) => PublishingState::Failed,
            (PublishingState::Failed, PublishEvent::Retry) => PublishingState::Publishing,

            _ => {
                return Err(StateError::InvalidEvent {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// The event that moves `from` to `to`, if the edge exists
    pub fn event_between(from: PublishingState, to: PublishingState) -> Option<PublishEvent> {
        [
            PublishEvent::Start,
            PublishEvent::Succeed,
            PublishEvent::Fail,
            PublishEvent::Retry,
        ]
        .into_iter()
        .find(|event| Self::transition(from, *event) == Ok(to))
    }

    /// Validate a direct `from -> to` request, returning the event that implies it
    pub fn validate(from: PublishingState, to: PublishingState) -> Result<PublishEvent, StateError> {
        Self::event_between(from, to).ok_or_else(|| StateError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: PublishingState, event: &PublishEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
