//! Complaint editing workflow.

use grievance_client::GrievanceApi;
use grievance_core::{
    allowed_next_statuses, build_update_request, Actor, ComplaintEdits, GrievanceError,
};
use grievance_types::{Complaint, ComplaintStatus, Officer};

use crate::board::ComplaintBoard;

/// Submits edits on behalf of one actor.
///
/// Every failure is terminal for the attempt and leaves the board as it was.
pub struct ComplaintEditor<'a> {
    api: &'a dyn GrievanceApi,
    actor: &'a Actor,
}

impl<'a> ComplaintEditor<'a> {
    pub fn new(api: &'a dyn GrievanceApi, actor: &'a Actor) -> Self {
        Self { api, actor }
    }

    /// Status choices to present for `complaint`, current status first.
    pub fn status_choices(&self, complaint: &Complaint) -> Vec<ComplaintStatus> {
        allowed_next_statuses(complaint.status)
    }

    /// Officers the actor may pick as assignee.
    pub async fn assignable_officers(&self, search: Option<&str>) -> Result<Vec<Officer>, GrievanceError> {
        self.api.list_approved_officers(search).await
    }

    /// Validate `edits` against the held copy of the complaint, send the
    /// minimal payload, and replace the held copy with the server's answer.
    pub async fn submit(
        &self,
        board: &ComplaintBoard,
        complaint_id: &str,
        edits: &ComplaintEdits,
        officers: &[Officer],
    ) -> Result<Complaint, GrievanceError> {
        let _guard = board.gate().begin(complaint_id)?;

        let current = board.get(complaint_id).ok_or_else(|| {
            GrievanceError::Validation(format!("complaint {complaint_id} is not loaded"))
        })?;

        let request = build_update_request(self.actor, &current, edits, officers)?;
        if request.is_empty() {
            return Err(GrievanceError::Validation("there are no changes to save".into()));
        }
        let fields = request.changed_fields();

        let updated = self
            .api
            .submit_complaint_update(request)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    complaint = %current.complaint_number,
                    actor = %self.actor.id,
                    error = %e,
                    "complaint update rejected"
                );
            })?;

        board.replace(updated.clone());
        tracing::info!(
            complaint = %updated.complaint_number,
            actor = %self.actor.id,
            ?fields,
            status = %updated.status,
            "complaint updated"
        );
        Ok(updated)
    }

    /// Re-fetch one complaint and replace the held copy.
    pub async fn refresh(&self, board: &ComplaintBoard, complaint_id: &str) -> Result<Complaint, GrievanceError> {
        let fresh = self.api.fetch_complaint(complaint_id).await?;
        board.replace(fresh.clone());
        Ok(fresh)
    }
}
