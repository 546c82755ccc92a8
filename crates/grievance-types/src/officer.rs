//! Officer accounts.

use serde::{Deserialize, Serialize};

use crate::vocabulary::{ApprovalStatus, Department, Role};

/// A government officer account. Created by self-service signup in the
/// pending state; an admin-tier actor approves or rejects it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: String,
    /// Login key
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Department,
    pub role: Role,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
}

impl Officer {
    /// Only approved officers may receive complaint assignments.
    pub fn is_assignable(&self) -> bool {
        self.is_approved
    }

    /// True once an approve/reject decision has been recorded.
    pub fn is_decided(&self) -> bool {
        self.approval_status != ApprovalStatus::Pending || self.is_approved
    }
}

/// Body of an approve/reject call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDecision {
    pub approver_id: String,
}
