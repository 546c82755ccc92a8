//! Officer registration approvals.
//!
//! Self-registered officers wait in a pending queue until an admin-tier user
//! approves or rejects them. A decision is final; only approved officers are
//! ever offered as assignees.

use grievance_client::GrievanceApi;
use grievance_core::{Actor, GrievanceError};
use grievance_types::{ApprovalStatus, Officer};

pub struct OfficerApprovals<'a> {
    api: &'a dyn GrievanceApi,
    actor: &'a Actor,
    pending: Vec<Officer>,
}

impl<'a> OfficerApprovals<'a> {
    /// Fetch the pending queue. Admin tier only.
    pub async fn load(api: &'a dyn GrievanceApi, actor: &'a Actor) -> Result<Self, GrievanceError> {
        actor.require_admin_tier()?;
        let pending = api.list_pending_officers().await?;
        tracing::debug!(count = pending.len(), "pending officers loaded");
        Ok(Self {
            api,
            actor,
            pending,
        })
    }

    pub fn pending(&self) -> &[Officer] {
        &self.pending
    }

    pub async fn approve(&mut self, officer_id: &str) -> Result<(), GrievanceError> {
        self.decide(officer_id, ApprovalStatus::Approved).await
    }

    pub async fn reject(&mut self, officer_id: &str) -> Result<(), GrievanceError> {
        self.decide(officer_id, ApprovalStatus::Rejected).await
    }

    async fn decide(&mut self, officer_id: &str, decision: ApprovalStatus) -> Result<(), GrievanceError> {
        self.actor.require_admin_tier()?;
        let index = self
            .pending
            .iter()
            .position(|o| o.id == officer_id)
            .ok_or_else(|| {
                GrievanceError::Validation(format!("officer {officer_id} is not awaiting a decision"))
            })?;
        if self.pending[index].is_decided() {
            return Err(GrievanceError::Validation(format!(
                "officer {} has already been decided",
                self.pending[index].employee_id
            )));
        }

        match decision {
            ApprovalStatus::Approved => self.api.approve_officer(officer_id, &self.actor.id).await?,
            ApprovalStatus::Rejected => self.api.reject_officer(officer_id, &self.actor.id).await?,
            ApprovalStatus::Pending => {
                return Err(GrievanceError::Validation("a decision cannot be pending".into()))
            }
        }

        let officer = self.pending.remove(index);
        tracing::info!(
            officer = %officer.employee_id,
            approver = %self.actor.id,
            ?decision,
            "officer registration decided"
        );
        Ok(())
    }
}
