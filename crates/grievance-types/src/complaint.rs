//! Complaint records and their collaboration children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocabulary::{ComplaintCategory, ComplaintStatus, Department, Priority, Role};

/// A citizen-filed grievance tracked through the status lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Opaque server id
    pub id: String,
    /// Human-facing sequence number
    pub complaint_id: i64,
    /// Display number, e.g. "GRV-2024-000123"
    pub complaint_number: String,

    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<ComplaintCategory>,

    pub status: ComplaintStatus,
    #[serde(default)]
    pub priority: Priority,

    /// Citizen the complaint was filed for
    pub citizen_id: String,
    /// Set when an officer files on a citizen's behalf
    #[serde(default)]
    pub created_by_id: Option<String>,
    #[serde(default)]
    pub assigned_department: Department,
    #[serde(default)]
    pub assigned_to_id: Option<String>,
    #[serde(default)]
    pub assigned_by_id: Option<String>,
    #[serde(default)]
    pub assignment_remarks: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub documents: Vec<ComplaintDocument>,
    #[serde(default)]
    pub history: Vec<ComplaintHistory>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// Body of a new complaint submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub subject: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ComplaintCategory>,
    #[serde(default)]
    pub priority: Priority,
    pub citizen_id: String,
}

/// A remark left on a complaint by any participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub complaint_id: String,
    pub commenter_id: String,
    pub commenter_name: String,
    pub commenter_role: Role,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<ComplaintDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// File attached to a complaint or comment. Only the contract shape; storage
/// and download live behind `file_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDocument {
    pub id: String,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    pub file_url: String,
    pub uploaded_by_id: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Audit entry recorded by the server for every complaint mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintHistory {
    pub id: String,
    pub complaint_id: String,
    /// e.g. "CREATED", "STATUS_CHANGED", "DEPARTMENT_CHANGED", "OFFICER_ASSIGNED"
    pub action: String,
    #[serde(default)]
    pub from_status: Option<ComplaintStatus>,
    #[serde(default)]
    pub to_status: Option<ComplaintStatus>,
    pub changed_by_id: String,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}
