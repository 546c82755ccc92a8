//! Complaint status-transition table.
//!
//! The only place complaint lifecycle edges are defined. Everything that
//! accepts a status change asks this module first.
//!
//! ```text
//! CREATED      -> ASSIGNED, REJECTED
//! ASSIGNED     -> IN_PROGRESS, BLOCKED
//! IN_PROGRESS  -> RESOLVED, BLOCKED
//! BLOCKED      -> IN_PROGRESS
//! RESOLVED     -> CLOSED
//! CLOSED       -> (terminal)
//! REJECTED     -> (terminal)
//! DUPLICATE    -> ASSIGNED
//! ```

use std::str::FromStr;

use grievance_types::ComplaintStatus;

use crate::error::GrievanceError;

/// Status every newly filed complaint starts in.
pub const INITIAL_STATUS: ComplaintStatus = ComplaintStatus::Created;

/// Statuses reachable in one step from `status`, in presentation order.
pub fn successors(status: ComplaintStatus) -> &'static [ComplaintStatus] {
    use ComplaintStatus::*;
    match status {
        Created => &[Assigned, Rejected],
        Assigned => &[InProgress, Blocked],
        InProgress => &[Resolved, Blocked],
        Blocked => &[InProgress],
        Resolved => &[Closed],
        Closed => &[],
        Rejected => &[],
        Duplicate => &[Assigned],
    }
}

pub fn is_terminal(status: ComplaintStatus) -> bool {
    successors(status).is_empty()
}

/// Choices to offer an editor: the current status first (a no-op is always
/// legal), then its successors in declaration order.
pub fn allowed_next_statuses(current: ComplaintStatus) -> Vec<ComplaintStatus> {
    let next = successors(current);
    let mut allowed = Vec::with_capacity(next.len() + 1);
    allowed.push(current);
    allowed.extend_from_slice(next);
    allowed
}

/// Same as [`allowed_next_statuses`] for a raw wire value. An unrecognised
/// status is an error, never an empty successor list.
pub fn allowed_next_statuses_for(raw: &str) -> Result<Vec<ComplaintStatus>, GrievanceError> {
    Ok(allowed_next_statuses(parse_status(raw)?))
}

pub fn parse_status(raw: &str) -> Result<ComplaintStatus, GrievanceError> {
    ComplaintStatus::from_str(raw).map_err(|_| GrievanceError::InvalidState(raw.to_string()))
}

pub fn is_transition_allowed(from: ComplaintStatus, to: ComplaintStatus) -> bool {
    from == to || successors(from).contains(&to)
}

pub fn require_transition(from: ComplaintStatus, to: ComplaintStatus) -> Result<(), GrievanceError> {
    if is_transition_allowed(from, to) {
        Ok(())
    } else {
        Err(GrievanceError::InvalidTransition { from, to })
    }
}

/// Human-readable label: underscores become spaces, nothing else changes.
pub fn status_display(raw: &str) -> String {
    raw.replace('_', " ")
}
