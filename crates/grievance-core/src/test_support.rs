//! Fixtures shared by the unit tests in this crate.

use chrono::Utc;
use grievance_types::{
    ApprovalStatus, Complaint, ComplaintStatus, Department, Officer, Priority, Role,
};

pub(crate) fn complaint(created_by: Option<&str>, assigned_to: Option<&str>) -> Complaint {
    let now = Utc::now();
    Complaint {
        id: "c-1".into(),
        complaint_id: 1,
        complaint_number: "GRV-0001".into(),
        subject: "Pothole".into(),
        description: "Deep pothole near the school gate".into(),
        location: Some("Ward 4".into()),
        category: None,
        status: ComplaintStatus::Created,
        priority: Priority::Medium,
        citizen_id: "citizen-1".into(),
        created_by_id: created_by.map(String::from),
        assigned_department: Department::Unassigned,
        assigned_to_id: assigned_to.map(String::from),
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
        designation: Some("Junior Engineer".into()),
        department: Department::WaterResources,
        role: Role::Officer,
        is_approved: approved,
        approval_status: if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        },
    }
}
