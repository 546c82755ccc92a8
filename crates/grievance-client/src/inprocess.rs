//! InProcessClient: an in-memory complaint service.
//!
//! Plays the server's part for tests and demos: it re-checks every rule the
//! desk checks locally and is the authority on the result. Rejections come
//! back as `RemoteFailure` with the status a real server would send.
//!
//! One [`InProcessBackend`] holds the data; each [`InProcessClient`] talks
//! to it as a single actor, the way a bearer token would pin identity.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use grievance_core::transitions::{is_transition_allowed, INITIAL_STATUS};
use grievance_core::{
    can_edit, can_modify_comment, can_view, filter_officers, matches_filter, Actor,
    ComplaintUpdateRequest, GrievanceError,
};
use grievance_types::{
    ApprovalStatus, Comment, Complaint, ComplaintDocument, ComplaintFilter, ComplaintHistory,
    ComplaintStatus, NewComplaint, Officer, Role,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{GrievanceApi, Result};

const FORBIDDEN: u16 = 403;
const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;
const UNPROCESSABLE: u16 = 422;

#[derive(Default)]
struct Store {
    complaints: HashMap<String, Complaint>,
    officers: Vec<Officer>,
    /// comment id -> complaint id
    comment_owner: HashMap<String, String>,
    next_complaint_id: i64,
}

impl Store {
    fn complaint(&self, id: &str) -> Result<&Complaint> {
        self.complaints
            .get(id)
            .ok_or_else(|| reject(NOT_FOUND, format!("complaint {id} not found")))
    }

    fn complaint_mut(&mut self, id: &str) -> Result<&mut Complaint> {
        self.complaints
            .get_mut(id)
            .ok_or_else(|| reject(NOT_FOUND, format!("complaint {id} not found")))
    }

    fn officer_mut(&mut self, id: &str) -> Result<&mut Officer> {
        self.officers
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| reject(NOT_FOUND, format!("officer {id} not found")))
    }

    fn display_name(&self, actor: &Actor) -> String {
        self.officers
            .iter()
            .find(|o| o.id == actor.id)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| actor.id.clone())
    }

    fn comment_location(&self, comment_id: &str) -> Result<(String, usize)> {
        let complaint_id = self
            .comment_owner
            .get(comment_id)
            .ok_or_else(|| reject(NOT_FOUND, format!("comment {comment_id} not found")))?;
        let complaint = self.complaint(complaint_id)?;
        let index = complaint
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| reject(NOT_FOUND, format!("comment {comment_id} not found")))?;
        Ok((complaint_id.clone(), index))
    }
}

fn reject(status: u16, message: impl Into<String>) -> GrievanceError {
    GrievanceError::remote(Some(status), message)
}

fn history_entry(
    complaint: &Complaint,
    action: &str,
    from_status: Option<ComplaintStatus>,
    to_status: Option<ComplaintStatus>,
    actor: &Actor,
    remarks: Option<String>,
) -> ComplaintHistory {
    ComplaintHistory {
        id: Uuid::new_v4().to_string(),
        complaint_id: complaint.id.clone(),
        action: action.to_string(),
        from_status,
        to_status,
        changed_by_id: actor.id.clone(),
        remarks,
        created_at: Utc::now(),
    }
}

/// Shared in-memory data behind any number of [`InProcessClient`]s.
#[derive(Clone, Default)]
pub struct InProcessBackend {
    store: Arc<RwLock<Store>>,
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client acting as `actor`.
    pub fn client_for(&self, actor: Actor) -> InProcessClient {
        InProcessClient {
            actor,
            store: Arc::clone(&self.store),
        }
    }

    pub async fn insert_complaint(&self, complaint: Complaint) {
        let mut store = self.store.write().await;
        store.next_complaint_id = store.next_complaint_id.max(complaint.complaint_id);
        for comment in &complaint.comments {
            store
                .comment_owner
                .insert(comment.id.clone(), complaint.id.clone());
        }
        store.complaints.insert(complaint.id.clone(), complaint);
    }

    pub async fn insert_officer(&self, officer: Officer) {
        let mut store = self.store.write().await;
        store.officers.retain(|o| o.id != officer.id);
        store.officers.push(officer);
    }

    /// Current server-side copy, bypassing authorization.
    pub async fn complaint(&self, id: &str) -> Option<Complaint> {
        self.store.read().await.complaints.get(id).cloned()
    }

    pub async fn officer(&self, id: &str) -> Option<Officer> {
        self.store
            .read()
            .await
            .officers
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }
}

pub struct InProcessClient {
    actor: Actor,
    store: Arc<RwLock<Store>>,
}

impl InProcessClient {
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    fn require_visible(&self, complaint: &Complaint) -> Result<()> {
        if can_view(&self.actor, complaint) {
            Ok(())
        } else {
            Err(reject(
                FORBIDDEN,
                format!("not permitted to view complaint {}", complaint.complaint_number),
            ))
        }
    }

    fn require_admin_tier(&self) -> Result<()> {
        self.actor
            .require_admin_tier()
            .map_err(|e| reject(FORBIDDEN, e.to_string()))
    }

    /// Server-side re-check of every update rule, in the same order the
    /// desk applies them.
    fn check_update(
        &self,
        complaint: &Complaint,
        request: &ComplaintUpdateRequest,
        officers: &[Officer],
    ) -> Result<()> {
        if !can_edit(&self.actor, complaint) {
            return Err(reject(
                FORBIDDEN,
                format!("not permitted to edit complaint {}", complaint.complaint_number),
            ));
        }
        for (field, value) in [
            ("subject", &request.subject),
            ("description", &request.description),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(reject(UNPROCESSABLE, format!("{field} cannot be empty")));
            }
        }
        if let Some(status) = request.status {
            if !is_transition_allowed(complaint.status, status) {
                return Err(reject(
                    UNPROCESSABLE,
                    format!("cannot move from {} to {}", complaint.status, status),
                ));
            }
        }
        if request.assigned_department.is_some() && !self.actor.is_admin_tier() {
            return Err(reject(
                FORBIDDEN,
                "only administrators can change the department",
            ));
        }
        if let Some(officer_id) = &request.assigned_to_id {
            let approved = officers
                .iter()
                .any(|o| &o.id == officer_id && o.is_assignable());
            if !approved {
                return Err(reject(
                    UNPROCESSABLE,
                    format!("officer {officer_id} is not approved for assignment"),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GrievanceApi for InProcessClient {
    async fn fetch_complaint(&self, id: &str) -> Result<Complaint> {
        let store = self.store.read().await;
        let complaint = store.complaint(id)?;
        self.require_visible(complaint)?;
        Ok(complaint.clone())
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>> {
        let store = self.store.read().await;
        let mut complaints: Vec<Complaint> = store
            .complaints
            .values()
            .filter(|c| can_view(&self.actor, c))
            .filter(|c| matches_filter(c, filter))
            .cloned()
            .collect();
        complaints.sort_by_key(|c| c.complaint_id);
        Ok(complaints)
    }

    async fn file_complaint(&self, new: NewComplaint) -> Result<Complaint> {
        if new.subject.trim().is_empty() || new.description.trim().is_empty() {
            return Err(reject(
                UNPROCESSABLE,
                "subject and description are required",
            ));
        }
        if self.actor.role == Role::Citizen && new.citizen_id != self.actor.id {
            return Err(reject(
                FORBIDDEN,
                "citizens can only file complaints for themselves",
            ));
        }

        let mut store = self.store.write().await;
        store.next_complaint_id += 1;
        let complaint_id = store.next_complaint_id;
        let now = Utc::now();
        let created_by_id = (new.citizen_id != self.actor.id).then(|| self.actor.id.clone());

        let mut complaint = Complaint {
            id: Uuid::new_v4().to_string(),
            complaint_id,
            complaint_number: format!("GRV-{complaint_id:06}"),
            subject: new.subject,
            description: new.description,
            location: new.location,
            category: new.category,
            status: INITIAL_STATUS,
            priority: new.priority,
            citizen_id: new.citizen_id,
            created_by_id,
            assigned_department: Default::default(),
            assigned_to_id: None,
            assigned_by_id: None,
            assignment_remarks: None,
            assigned_at: None,
            comments: vec![],
            documents: vec![],
            history: vec![],
            created_at: now,
            updated_at: now,
            closed_at: None,
        };
        let entry = history_entry(
            &complaint,
            "CREATED",
            None,
            Some(INITIAL_STATUS),
            &self.actor,
            None,
        );
        complaint.history.push(entry);

        tracing::info!(complaint = %complaint.complaint_number, "complaint filed");
        store
            .complaints
            .insert(complaint.id.clone(), complaint.clone());
        Ok(complaint)
    }

    async fn submit_complaint_update(&self, request: ComplaintUpdateRequest) -> Result<Complaint> {
        let mut store = self.store.write().await;
        let officers = store.officers.clone();
        let actor = &self.actor;
        let complaint = store.complaint_mut(&request.complaint_id)?;
        self.check_update(complaint, &request, &officers)?;

        let now = Utc::now();
        let mut entries = Vec::new();

        if let Some(subject) = request.subject {
            complaint.subject = subject;
        }
        if let Some(description) = request.description {
            complaint.description = description;
        }
        if let Some(location) = request.location {
            complaint.location = Some(location);
        }
        if let Some(priority) = request.priority {
            complaint.priority = priority;
        }
        if let Some(status) = request.status.filter(|s| *s != complaint.status) {
            let from = complaint.status;
            complaint.status = status;
            if status == ComplaintStatus::Closed {
                complaint.closed_at = Some(now);
            }
            entries.push(history_entry(
                complaint,
                "STATUS_CHANGED",
                Some(from),
                Some(status),
                actor,
                None,
            ));
        }
        if let Some(department) = request.assigned_department {
            complaint.assigned_department = department;
            entries.push(history_entry(
                complaint,
                "DEPARTMENT_CHANGED",
                None,
                None,
                actor,
                request.department_remarks.clone(),
            ));
        }
        if let Some(officer_id) = request.assigned_to_id {
            complaint.assigned_to_id = Some(officer_id);
            complaint.assigned_by_id = Some(actor.id.clone());
            complaint.assignment_remarks = request.assignment_remarks.clone();
            complaint.assigned_at = Some(now);
            entries.push(history_entry(
                complaint,
                "OFFICER_ASSIGNED",
                None,
                None,
                actor,
                request.assignment_remarks,
            ));
        }

        complaint.history.extend(entries);
        complaint.updated_at = now;
        tracing::info!(
            complaint = %complaint.complaint_number,
            actor = %actor.id,
            "complaint updated"
        );
        Ok(complaint.clone())
    }

    async fn list_approved_officers(&self, search: Option<&str>) -> Result<Vec<Officer>> {
        let store = self.store.read().await;
        Ok(filter_officers(&store.officers, search)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn list_pending_officers(&self) -> Result<Vec<Officer>> {
        self.require_admin_tier()?;
        let store = self.store.read().await;
        Ok(store
            .officers
            .iter()
            .filter(|o| !o.is_decided())
            .cloned()
            .collect())
    }

    async fn approve_officer(&self, officer_id: &str, approver_id: &str) -> Result<()> {
        decide(self, officer_id, approver_id, ApprovalStatus::Approved).await
    }

    async fn reject_officer(&self, officer_id: &str, approver_id: &str) -> Result<()> {
        decide(self, officer_id, approver_id, ApprovalStatus::Rejected).await
    }

    async fn post_comment(
        &self,
        complaint_id: &str,
        text: &str,
        attachments: Vec<ComplaintDocument>,
    ) -> Result<Comment> {
        if text.trim().is_empty() {
            return Err(reject(UNPROCESSABLE, "comment text is required"));
        }
        let mut store = self.store.write().await;
        let commenter_name = store.display_name(&self.actor);
        let complaint = store.complaint_mut(complaint_id)?;
        self.require_visible(complaint)?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            complaint_id: complaint.id.clone(),
            commenter_id: self.actor.id.clone(),
            commenter_name,
            commenter_role: self.actor.role,
            text: text.to_string(),
            attachments,
            created_at: now,
            updated_at: now,
        };
        complaint.comments.push(comment.clone());
        complaint.updated_at = now;
        store
            .comment_owner
            .insert(comment.id.clone(), complaint_id.to_string());
        Ok(comment)
    }

    async fn edit_comment(&self, comment_id: &str, text: &str) -> Result<Comment> {
        if text.trim().is_empty() {
            return Err(reject(UNPROCESSABLE, "comment text is required"));
        }
        let mut store = self.store.write().await;
        let (complaint_id, index) = store.comment_location(comment_id)?;
        let complaint = store.complaint_mut(&complaint_id)?;
        let comment = &mut complaint.comments[index];
        if !can_modify_comment(&self.actor, comment) {
            return Err(reject(FORBIDDEN, "only the author can edit a comment"));
        }
        comment.text = text.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let (complaint_id, index) = store.comment_location(comment_id)?;
        let complaint = store.complaint_mut(&complaint_id)?;
        if !can_modify_comment(&self.actor, &complaint.comments[index]) {
            return Err(reject(FORBIDDEN, "only the author can delete a comment"));
        }
        complaint.comments.remove(index);
        store.comment_owner.remove(comment_id);
        Ok(())
    }
}

async fn decide(
    client: &InProcessClient,
    officer_id: &str,
    approver_id: &str,
    decision: ApprovalStatus,
) -> Result<()> {
    client.require_admin_tier()?;
    if approver_id != client.actor.id {
        return Err(reject(FORBIDDEN, "approver does not match the signed-in user"));
    }
    let mut store = client.store.write().await;
    let officer = store.officer_mut(officer_id)?;
    if officer.is_decided() {
        return Err(reject(
            CONFLICT,
            format!("officer {} has already been decided", officer.employee_id),
        ));
    }
    officer.approval_status = decision;
    officer.is_approved = decision == ApprovalStatus::Approved;
    tracing::info!(officer = %officer.employee_id, ?decision, approver = approver_id, "officer decided");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grievance_core::ErrorKind;
    use grievance_types::{Department, Priority};

    fn officer(id: &str, approved: bool) -> Officer {
        Officer {
            id: id.into(),
            employee_id: format!("EMP-{id}"),
            name: format!("Officer {id}"),
            email: None,
            mobile: None,
            designation: None,
            department: Department::PublicWorks,
            role: Role::Officer,
            is_approved: approved,
            approval_status: if approved {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Pending
            },
        }
    }

    fn new_complaint(citizen: &str) -> NewComplaint {
        NewComplaint {
            subject: "Garbage not collected".into(),
            description: "Bins overflowing for a week".into(),
            location: Some("Sector 12".into()),
            category: None,
            priority: Priority::High,
            citizen_id: citizen.into(),
        }
    }

    fn remote_status(err: &GrievanceError) -> Option<u16> {
        match err {
            GrievanceError::RemoteFailure { status, .. } => *status,
            _ => None,
        }
    }

    #[tokio::test]
    async fn filing_starts_in_created_with_history() {
        let backend = InProcessBackend::new();
        let citizen = backend.client_for(Actor::new("citizen-1", Role::Citizen));
        let complaint = citizen.file_complaint(new_complaint("citizen-1")).await.unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Created);
        assert_eq!(complaint.complaint_number, "GRV-000001");
        assert!(complaint.created_by_id.is_none());
        assert_eq!(complaint.history.len(), 1);
        assert_eq!(complaint.history[0].action, "CREATED");
    }

    #[tokio::test]
    async fn officer_filing_on_behalf_sets_created_by() {
        let backend = InProcessBackend::new();
        let clerk = backend.client_for(Actor::new("officer-3", Role::Officer));
        let complaint = clerk.file_complaint(new_complaint("citizen-1")).await.unwrap();
        assert_eq!(complaint.created_by_id.as_deref(), Some("officer-3"));
    }

    #[tokio::test]
    async fn server_rejects_illegal_transition() {
        let backend = InProcessBackend::new();
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let complaint = admin.file_complaint(new_complaint("citizen-1")).await.unwrap();
        let mut request = ComplaintUpdateRequest::for_complaint(complaint.id.clone());
        request.status = Some(ComplaintStatus::Closed);
        let err = admin.submit_complaint_update(request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteFailure);
        assert_eq!(remote_status(&err), Some(422));
    }

    #[tokio::test]
    async fn server_rejects_forged_department_change() {
        let backend = InProcessBackend::new();
        let clerk = backend.client_for(Actor::new("officer-3", Role::Officer));
        let complaint = clerk.file_complaint(new_complaint("citizen-1")).await.unwrap();
        let mut request = ComplaintUpdateRequest::for_complaint(complaint.id.clone());
        request.assigned_department = Some(Department::Police);
        let err = clerk.submit_complaint_update(request).await.unwrap_err();
        assert_eq!(remote_status(&err), Some(403));
        let stored = backend.complaint(&complaint.id).await.unwrap();
        assert_eq!(stored.assigned_department, Department::Unassigned);
    }

    #[tokio::test]
    async fn assignment_stamps_assigner_and_history() {
        let backend = InProcessBackend::new();
        backend.insert_officer(officer("officer-7", true)).await;
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let complaint = admin.file_complaint(new_complaint("citizen-1")).await.unwrap();

        let mut request = ComplaintUpdateRequest::for_complaint(complaint.id.clone());
        request.status = Some(ComplaintStatus::Assigned);
        request.assigned_to_id = Some("officer-7".into());
        let updated = admin.submit_complaint_update(request).await.unwrap();

        assert_eq!(updated.status, ComplaintStatus::Assigned);
        assert_eq!(updated.assigned_to_id.as_deref(), Some("officer-7"));
        assert_eq!(updated.assigned_by_id.as_deref(), Some("admin"));
        assert!(updated.assigned_at.is_some());
        let actions: Vec<_> = updated.history.iter().map(|h| h.action.as_str()).collect();
        assert_eq!(actions, vec!["CREATED", "STATUS_CHANGED", "OFFICER_ASSIGNED"]);
    }

    #[tokio::test]
    async fn unapproved_officer_cannot_be_assigned_server_side() {
        let backend = InProcessBackend::new();
        backend.insert_officer(officer("officer-9", false)).await;
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let complaint = admin.file_complaint(new_complaint("citizen-1")).await.unwrap();
        let mut request = ComplaintUpdateRequest::for_complaint(complaint.id.clone());
        request.assigned_to_id = Some("officer-9".into());
        let err = admin.submit_complaint_update(request).await.unwrap_err();
        assert_eq!(remote_status(&err), Some(422));
    }

    #[tokio::test]
    async fn approved_officer_listing_excludes_pending() {
        let backend = InProcessBackend::new();
        backend.insert_officer(officer("a", true)).await;
        backend.insert_officer(officer("b", false)).await;
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let approved = admin.list_approved_officers(None).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, "a");
        let pending = admin.list_pending_officers().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "b");
    }

    #[tokio::test]
    async fn approval_is_one_shot_and_admin_only() {
        let backend = InProcessBackend::new();
        backend.insert_officer(officer("b", false)).await;
        let officer_client = backend.client_for(Actor::new("officer-7", Role::Officer));
        let err = officer_client.approve_officer("b", "officer-7").await.unwrap_err();
        assert_eq!(remote_status(&err), Some(403));

        let dc = backend.client_for(Actor::new("dc", Role::DistrictCommissioner));
        dc.approve_officer("b", "dc").await.unwrap();
        assert!(backend.officer("b").await.unwrap().is_approved);

        let err = dc.reject_officer("b", "dc").await.unwrap_err();
        assert_eq!(remote_status(&err), Some(409));
    }

    #[tokio::test]
    async fn citizens_only_see_their_own_complaints() {
        let backend = InProcessBackend::new();
        let one = backend.client_for(Actor::new("citizen-1", Role::Citizen));
        let two = backend.client_for(Actor::new("citizen-2", Role::Citizen));
        let filed = one.file_complaint(new_complaint("citizen-1")).await.unwrap();
        two.file_complaint(new_complaint("citizen-2")).await.unwrap();

        let mine = one.list_complaints(&ComplaintFilter::default()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, filed.id);
        let err = two.fetch_complaint(&filed.id).await.unwrap_err();
        assert_eq!(remote_status(&err), Some(403));
    }

    #[tokio::test]
    async fn comments_are_author_only() {
        let backend = InProcessBackend::new();
        let citizen = backend.client_for(Actor::new("citizen-1", Role::Citizen));
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let complaint = citizen.file_complaint(new_complaint("citizen-1")).await.unwrap();

        let comment = citizen
            .post_comment(&complaint.id, "Still not fixed", vec![])
            .await
            .unwrap();
        assert_eq!(comment.commenter_role, Role::Citizen);

        let err = admin.edit_comment(&comment.id, "edited").await.unwrap_err();
        assert_eq!(remote_status(&err), Some(403));
        let edited = citizen.edit_comment(&comment.id, "Still broken").await.unwrap();
        assert_eq!(edited.text, "Still broken");

        citizen.delete_comment(&comment.id).await.unwrap();
        assert!(backend.complaint(&complaint.id).await.unwrap().comments.is_empty());
        let err = citizen.delete_comment(&comment.id).await.unwrap_err();
        assert_eq!(remote_status(&err), Some(404));
    }

    #[tokio::test]
    async fn closing_stamps_closed_at() {
        let backend = InProcessBackend::new();
        let admin = backend.client_for(Actor::new("admin", Role::Admin));
        let complaint = admin.file_complaint(new_complaint("citizen-1")).await.unwrap();
        for status in [
            ComplaintStatus::Assigned,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
            ComplaintStatus::Closed,
        ] {
            let mut request = ComplaintUpdateRequest::for_complaint(complaint.id.clone());
            request.status = Some(status);
            admin.submit_complaint_update(request).await.unwrap();
        }
        let stored = backend.complaint(&complaint.id).await.unwrap();
        assert_eq!(stored.status, ComplaintStatus::Closed);
        assert!(stored.closed_at.is_some());
    }
}
