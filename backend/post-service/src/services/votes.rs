//! Vote state transitions
//!
//! A user holds at most one vote row per post. Repeating a vote resets the
//! row to 0 instead of deleting it, so the aggregate sum stays a plain
//! `SUM(direction)` over every row.

use crate::models::VoteDirection;

/// What the service must write after a vote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    /// No prior vote: insert a row with the requested direction
    Insert(VoteDirection),
    /// Same direction repeated: set the stored direction to 0
    Reset,
    /// Prior vote was 0 or the opposite direction: overwrite it
    Set(VoteDirection),
}

impl VoteAction {
    /// Decide the transition from the stored direction (if any) and the request.
    pub fn decide(existing: Option<i16>, requested: VoteDirection) -> Self {
        match existing {
            None => VoteAction::Insert(requested),
            Some(current) if current == requested.as_i16() => VoteAction::Reset,
            Some(_) => VoteAction::Set(requested),
        }
    }

    /// Direction persisted after the transition
    pub fn stored_direction(self) -> i16 {
        match self {
            VoteAction::Insert(direction) | VoteAction::Set(direction) => direction.as_i16(),
            VoteAction::Reset => 0,
        }
    }

    /// Message returned to the client
    pub fn message(self) -> &'static str {
        match self {
            VoteAction::Insert(direction) | VoteAction::Set(direction) => direction.message(),
            VoteAction::Reset => "vote reset",
        }
    }
}
