//! Fixtures for the unit tests in this crate.

use chrono::Utc;
use grievance_types::{
    ApprovalStatus, Complaint, ComplaintStatus, Department, Officer, Priority, Role,
};

/// A freshly filed complaint. Trailing digits of `id` become the sequence number.
pub(crate) fn complaint(id: &str) -> Complaint {
    let seq: i64 = id
        .rsplit('-')
        .next()
        .and_then(|tail| tail.parse().ok())
        .unwrap_or(1);
    let now = Utc::now();
    Complaint {
        id: id.into(),
        complaint_id: seq,
        complaint_number: format!("GRV-{seq:06}"),
        subject: "Streetlight out".into(),
        description: "Lamp post 12 has been dark for a week".into(),
        location: Some("Ward 9".into()),
        category: None,
        status: ComplaintStatus::Created,
        priority: Priority::Medium,
        citizen_id: "citizen-1".into(),
        created_by_id: None,
        assigned_department: Department::Unassigned,
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
    }
}

pub(crate) fn officer(id: &str, approved: bool) -> Officer {
    Officer {
        id: id.into(),
        employee_id: format!("EMP-{id}"),
        name: format!("Officer {id}"),
        email: None,
        mobile: None,
        designation: Some("Assistant Engineer".into()),
        department: Department::Electricity,
        role: Role::Officer,
        is_approved: approved,
        approval_status: if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        },
    }
}
