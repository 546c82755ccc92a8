//! Comment thread on a single complaint.

use grievance_client::GrievanceApi;
use grievance_core::{can_view, require_comment_author, Actor, GrievanceError};
use grievance_types::{Comment, Complaint, ComplaintDocument};

/// Local copy of a complaint's comments, kept in step with the server.
#[derive(Debug, Clone)]
pub struct CommentThread {
    complaint: Complaint,
    comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new(complaint: Complaint) -> Self {
        let comments = complaint.comments.clone();
        Self {
            complaint,
            comments,
        }
    }

    pub fn complaint_id(&self) -> &str {
        &self.complaint.id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Post as `actor`. Anyone who can see the complaint may comment.
    pub async fn post(
        &mut self,
        api: &dyn GrievanceApi,
        actor: &Actor,
        text: &str,
        attachments: Vec<ComplaintDocument>,
    ) -> Result<&Comment, GrievanceError> {
        if !can_view(actor, &self.complaint) {
            return Err(GrievanceError::PermissionDenied(format!(
                "{} cannot comment on {}",
                actor.id, self.complaint.complaint_number
            )));
        }
        let text = require_text(text)?;
        let comment = api
            .post_comment(&self.complaint.id, text, attachments)
            .await?;
        tracing::debug!(complaint = %self.complaint.complaint_number, comment = %comment.id, "comment posted");
        self.comments.push(comment);
        Ok(&self.comments[self.comments.len() - 1])
    }

    /// Authors only.
    pub async fn edit(
        &mut self,
        api: &dyn GrievanceApi,
        actor: &Actor,
        comment_id: &str,
        text: &str,
    ) -> Result<&Comment, GrievanceError> {
        let index = self.position(comment_id)?;
        require_comment_author(actor, &self.comments[index])?;
        let text = require_text(text)?;
        let edited = api.edit_comment(comment_id, text).await?;
        self.comments[index] = edited;
        Ok(&self.comments[index])
    }

    pub async fn delete(
        &mut self,
        api: &dyn GrievanceApi,
        actor: &Actor,
        comment_id: &str,
    ) -> Result<(), GrievanceError> {
        let index = self.position(comment_id)?;
        require_comment_author(actor, &self.comments[index])?;
        api.delete_comment(comment_id).await?;
        self.comments.remove(index);
        Ok(())
    }

    fn position(&self, comment_id: &str) -> Result<usize, GrievanceError> {
        self.comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| GrievanceError::Validation(format!("comment {comment_id} not found")))
    }
}

fn require_text(text: &str) -> Result<&str, GrievanceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GrievanceError::Validation("comment text is required".into()));
    }
    Ok(trimmed)
}
