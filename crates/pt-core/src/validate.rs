//! Write-time checks for new events.
//!
//! Two independent gates guard every `start`/`stop` write:
//!
//! 1. [`is_allowed`] looks at the kind of the most recent event on the date and
//!    refuses repeating it.
//! 2. [`check_timestamp`] compares the candidate time against the latest event of
//!    the *same* kind and refuses anything that is not strictly later.
//!
//! Both must pass. Neither runs for raw `add` writes.

use chrono::NaiveDateTime;

use crate::error::TrackerError;
use crate::event::EventKind;

/// Returns whether `requested` may follow `last` on the same day.
///
/// A `stop` with no prior event on the date is refused: there is no session
/// to end.
pub fn is_allowed(last: Option<EventKind>, requested: EventKind) -> bool {
    match last {
        None => requested == EventKind::Start,
        Some(last) => last != requested,
    }
}

/// Like [`is_allowed`], but returns the refusal as an error value.
pub fn check_transition(last: Option<EventKind>, requested: EventKind) -> Result<(), TrackerError> {
    if is_allowed(last, requested) {
        Ok(())
    } else {
        Err(TrackerError::InvalidTransition { last, requested })
    }
}

/// Checks that `candidate` is strictly after `latest`, the newest recorded time
/// of the same kind on the same date.
///
/// There is no upper bound: future timestamps are accepted.
pub fn check_timestamp(
    kind: EventKind,
    candidate: NaiveDateTime,
    latest: Option<NaiveDateTime>,
) -> Result<(), TrackerError> {
    match latest {
        Some(latest) if candidate <= latest => Err(TrackerError::TimestampCollision {
            kind,
            candidate,
            latest,
        }),
        _ => Ok(()),
    }
}
