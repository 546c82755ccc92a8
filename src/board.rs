//! Per-view complaint state.
//!
//! A `ComplaintBoard` is owned by the view that fetched it and is never
//! shared across views. Mutations go through [`MutationGate`] so a
//! complaint has at most one request in flight.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError, RwLock};

use grievance_client::GrievanceApi;
use grievance_core::{matches_filter, GrievanceError};
use grievance_types::{Complaint, ComplaintFilter};

/// Tracks which keys have a request outstanding.
#[derive(Debug, Default)]
pub struct MutationGate {
    in_flight: Mutex<HashSet<String>>,
}

impl MutationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` until the returned guard drops. A second claim while the
    /// first is outstanding is refused, which is what keeps the triggering
    /// control disabled.
    pub fn begin(&self, key: &str) -> Result<MutationGuard<'_>, GrievanceError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.to_string()) {
            return Err(GrievanceError::Validation(format!(
                "an update for {key} is already in progress"
            )));
        }
        Ok(MutationGuard {
            gate: self,
            key: key.to_string(),
        })
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

#[derive(Debug)]
pub struct MutationGuard<'a> {
    gate: &'a MutationGate,
    key: String,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.gate
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[derive(Debug, Default)]
pub struct ComplaintBoard {
    complaints: RwLock<Vec<Complaint>>,
    gate: MutationGate,
}

impl ComplaintBoard {
    pub fn new(complaints: Vec<Complaint>) -> Self {
        Self {
            complaints: RwLock::new(complaints),
            gate: MutationGate::new(),
        }
    }

    /// Fetch with `filter` and hold the result.
    pub async fn load(api: &dyn GrievanceApi, filter: &ComplaintFilter) -> Result<Self, GrievanceError> {
        let complaints = api.list_complaints(filter).await?;
        tracing::debug!(count = complaints.len(), "complaint board loaded");
        Ok(Self::new(complaints))
    }

    pub fn gate(&self) -> &MutationGate {
        &self.gate
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Complaint> {
        self.read().iter().find(|c| c.id == id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Complaint> {
        self.read().clone()
    }

    /// Swap in the server's copy of one complaint, leaving every other entry
    /// untouched. Returns false, and changes nothing, if the id is not held
    /// (e.g. the view was reloaded while the request was out).
    pub fn replace(&self, updated: Complaint) -> bool {
        let mut complaints = self
            .complaints
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match complaints.iter_mut().find(|c| c.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => {
                tracing::debug!(complaint = %updated.id, "ignoring update for complaint not on board");
                false
            }
        }
    }

    /// Held complaints matching `filter`, in held order.
    pub fn visible(&self, filter: &ComplaintFilter) -> Vec<Complaint> {
        self.read()
            .iter()
            .filter(|c| matches_filter(c, filter))
            .cloned()
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Complaint>> {
        self.complaints.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::complaint;
    use grievance_types::ComplaintStatus;

    #[test]
    fn gate_refuses_duplicate_until_released() {
        let gate = MutationGate::new();
        let guard = gate.begin("c-1").unwrap();
        assert!(gate.is_busy("c-1"));
        assert!(matches!(gate.begin("c-1"), Err(GrievanceError::Validation(_))));
        // other complaints are independent
        let other = gate.begin("c-2").unwrap();
        drop(guard);
        assert!(!gate.is_busy("c-1"));
        assert!(gate.begin("c-1").is_ok());
        drop(other);
    }

    #[test]
    fn replace_touches_only_the_matching_complaint() {
        let board = ComplaintBoard::new(vec![complaint("c-1"), complaint("c-2"), complaint("c-3")]);
        let before = board.snapshot();

        let mut updated = complaint("c-2");
        updated.status = ComplaintStatus::Assigned;
        assert!(board.replace(updated.clone()));

        let after = board.snapshot();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], updated);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn replace_ignores_unknown_ids() {
        let board = ComplaintBoard::new(vec![complaint("c-1")]);
        assert!(!board.replace(complaint("c-9")));
        assert_eq!(board.len(), 1);
        assert!(board.get("c-9").is_none());
    }

    #[test]
    fn visible_applies_local_filter() {
        let mut assigned = complaint("c-2");
        assigned.status = ComplaintStatus::Assigned;
        let board = ComplaintBoard::new(vec![complaint("c-1"), assigned]);
        let shown = board.visible(&ComplaintFilter::default().with_status(ComplaintStatus::Assigned));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "c-2");
    }
}
