//! GrievanceApi trait, the sole boundary between the desk and the remote
//! complaint service. Callers depend on this trait, never on a transport.

pub mod http;
pub mod inprocess;

use async_trait::async_trait;
use grievance_core::{ComplaintUpdateRequest, GrievanceError};
use grievance_types::{
    Comment, Complaint, ComplaintDocument, ComplaintFilter, NewComplaint, Officer,
};

pub use http::HttpClient;
pub use inprocess::InProcessClient;

pub type Result<T> = std::result::Result<T, GrievanceError>;

#[async_trait]
pub trait GrievanceApi: Send + Sync {
    async fn fetch_complaint(&self, id: &str) -> Result<Complaint>;

    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>>;

    /// File a new complaint. The server starts it in CREATED.
    async fn file_complaint(&self, complaint: NewComplaint) -> Result<Complaint>;

    /// Apply a partial update. The returned complaint is authoritative.
    async fn submit_complaint_update(&self, request: ComplaintUpdateRequest) -> Result<Complaint>;

    // ── Officers ───────────────────────────────────────────────

    /// Officers eligible for assignment. Only approved officers are returned.
    async fn list_approved_officers(&self, search: Option<&str>) -> Result<Vec<Officer>>;

    /// Self-registered officers awaiting an approval decision.
    async fn list_pending_officers(&self) -> Result<Vec<Officer>>;

    async fn approve_officer(&self, officer_id: &str, approver_id: &str) -> Result<()>;

    async fn reject_officer(&self, officer_id: &str, approver_id: &str) -> Result<()>;

    // ── Comments ───────────────────────────────────────────────

    async fn post_comment(
        &self,
        complaint_id: &str,
        text: &str,
        attachments: Vec<ComplaintDocument>,
    ) -> Result<Comment>;

    async fn edit_comment(&self, comment_id: &str, text: &str) -> Result<Comment>;

    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}
