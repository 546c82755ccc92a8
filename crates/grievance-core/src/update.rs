//! Partial-update construction for complaints.
//!
//! An editor's local form state ([`ComplaintEdits`]) is turned into the
//! minimal payload the server accepts ([`ComplaintUpdateRequest`]). Each rule
//! is its own guarded step and they run in a fixed order:
//!
//! 1. the actor must pass `can_edit`
//! 2. content fields (subject, description, location, priority)
//! 3. status, only along a legal transition
//! 4. department and its remarks, admin-tier only
//! 5. assigned officer and its remarks, approved officers only
//!
//! A field whose proposed value equals the current one is never sent.

use grievance_types::{Complaint, ComplaintStatus, Department, Officer, Priority};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::authorization::require_edit;
use crate::error::GrievanceError;
use crate::transitions::require_transition;

/// Proposed values from an editor. `None` means the field was not touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintEdits {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<ComplaintStatus>,
    pub assigned_department: Option<Department>,
    pub department_remarks: Option<String>,
    pub assigned_to_id: Option<String>,
    pub assignment_remarks: Option<String>,
}

impl ComplaintEdits {
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn department(mut self, department: Department, remarks: Option<String>) -> Self {
        self.assigned_department = Some(department);
        self.department_remarks = remarks;
        self
    }

    pub fn assign_to(mut self, officer_id: impl Into<String>, remarks: Option<String>) -> Self {
        self.assigned_to_id = Some(officer_id.into());
        self.assignment_remarks = remarks;
        self
    }
}

/// Partial update sent to the server. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintUpdateRequest {
    /// Target complaint; travels in the request path, not the body.
    #[serde(skip)]
    pub complaint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_remarks: Option<String>,
}

impl ComplaintUpdateRequest {
    pub fn for_complaint(complaint_id: impl Into<String>) -> Self {
        Self {
            complaint_id: complaint_id.into(),
            ..Default::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Wire names of the fields present in the payload.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.subject.is_some() {
            fields.push("subject");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        if self.priority.is_some() {
            fields.push("priority");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.assigned_department.is_some() {
            fields.push("assignedDepartment");
        }
        if self.department_remarks.is_some() {
            fields.push("departmentRemarks");
        }
        if self.assigned_to_id.is_some() {
            fields.push("assignedToId");
        }
        if self.assignment_remarks.is_some() {
            fields.push("assignmentRemarks");
        }
        fields
    }
}

/// Builds a [`ComplaintUpdateRequest`] for one actor and one complaint.
///
/// `officers` is the assignable-officer directory the editor was shown; an
/// officer id outside it, or one that is not approved, is refused.
pub struct UpdateRequestBuilder<'a> {
    actor: &'a Actor,
    complaint: &'a Complaint,
    officers: &'a [Officer],
}

impl<'a> UpdateRequestBuilder<'a> {
    pub fn new(actor: &'a Actor, complaint: &'a Complaint, officers: &'a [Officer]) -> Self {
        Self {
            actor,
            complaint,
            officers,
        }
    }

    pub fn build(&self, edits: &ComplaintEdits) -> Result<ComplaintUpdateRequest, GrievanceError> {
        require_edit(self.actor, self.complaint)?;

        let mut request = ComplaintUpdateRequest::for_complaint(self.complaint.id.clone());
        self.apply_content(edits, &mut request)?;
        self.apply_status(edits, &mut request)?;
        self.apply_department(edits, &mut request);
        self.apply_officer(edits, &mut request)?;

        tracing::debug!(
            complaint = %self.complaint.id,
            actor = %self.actor.id,
            fields = ?request.changed_fields(),
            "built complaint update"
        );
        Ok(request)
    }

    fn apply_content(
        &self,
        edits: &ComplaintEdits,
        request: &mut ComplaintUpdateRequest,
    ) -> Result<(), GrievanceError> {
        let current = self.complaint;

        if let Some(subject) = &edits.subject {
            require_non_blank("subject", subject)?;
            if subject != &current.subject {
                request.subject = Some(subject.clone());
            }
        }
        if let Some(description) = &edits.description {
            require_non_blank("description", description)?;
            if description != &current.description {
                request.description = Some(description.clone());
            }
        }
        if let Some(location) = &edits.location {
            if current.location.as_deref() != Some(location.as_str()) {
                request.location = Some(location.clone());
            }
        }
        if let Some(priority) = edits.priority {
            if priority != current.priority {
                request.priority = Some(priority);
            }
        }
        Ok(())
    }

    fn apply_status(
        &self,
        edits: &ComplaintEdits,
        request: &mut ComplaintUpdateRequest,
    ) -> Result<(), GrievanceError> {
        if let Some(status) = edits.status {
            require_transition(self.complaint.status, status)?;
            if status != self.complaint.status {
                request.status = Some(status);
            }
        }
        Ok(())
    }

    fn apply_department(&self, edits: &ComplaintEdits, request: &mut ComplaintUpdateRequest) {
        let Some(department) = edits.assigned_department else {
            return;
        };
        if department == self.complaint.assigned_department {
            return;
        }
        if !self.actor.is_admin_tier() {
            tracing::warn!(
                actor = %self.actor.id,
                role = %self.actor.role,
                complaint = %self.complaint.id,
                department = %department,
                "dropping department change from non-admin editor"
            );
            return;
        }
        request.assigned_department = Some(department);
        request.department_remarks = edits.department_remarks.clone();
    }

    fn apply_officer(
        &self,
        edits: &ComplaintEdits,
        request: &mut ComplaintUpdateRequest,
    ) -> Result<(), GrievanceError> {
        let Some(officer_id) = &edits.assigned_to_id else {
            return Ok(());
        };
        if self.complaint.assigned_to_id.as_deref() == Some(officer_id.as_str()) {
            return Ok(());
        }

        let officer = self
            .officers
            .iter()
            .find(|o| &o.id == officer_id)
            .ok_or_else(|| {
                GrievanceError::Validation(format!("officer {officer_id} is not assignable"))
            })?;
        if !officer.is_assignable() {
            return Err(GrievanceError::Validation(format!(
                "officer {} ({}) has not been approved",
                officer.name, officer.employee_id
            )));
        }

        request.assigned_to_id = Some(officer_id.clone());
        request.assignment_remarks = edits.assignment_remarks.clone();
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), GrievanceError> {
    if value.trim().is_empty() {
        Err(GrievanceError::Validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Build the minimal update payload for `edits`, or explain why not.
pub fn build_update_request(
    actor: &Actor,
    complaint: &Complaint,
    edits: &ComplaintEdits,
    officers: &[Officer],
) -> Result<ComplaintUpdateRequest, GrievanceError> {
    UpdateRequestBuilder::new(actor, complaint, officers).build(edits)
}
