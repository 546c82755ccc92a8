//! Shared setup for the desk integration tests.

#![allow(dead_code)]

use grievance_client::inprocess::{InProcessBackend, InProcessClient};
use grievance_client::GrievanceApi;
use grievance_core::Actor;
use grievance_types::{ApprovalStatus, Complaint, Department, NewComplaint, Officer, Role};

pub fn admin() -> Actor {
    Actor::new("admin-1", Role::Admin)
}

pub fn officer_actor(id: &str) -> Actor {
    Actor::new(id, Role::Officer)
}

pub fn citizen(id: &str) -> Actor {
    Actor::new(id, Role::Citizen)
}

pub fn registered_officer(id: &str, department: Department) -> Officer {
    Officer {
        id: id.into(),
        employee_id: format!("EMP-{id}"),
        name: format!("Officer {id}"),
        email: Some(format!("{id}@district.example.gov")),
        mobile: None,
        designation: Some("Section Officer".into()),
        department,
        role: Role::Officer,
        is_approved: false,
        approval_status: ApprovalStatus::Pending,
    }
}

pub fn approved_officer(id: &str, department: Department) -> Officer {
    Officer {
        is_approved: true,
        approval_status: ApprovalStatus::Approved,
        ..registered_officer(id, department)
    }
}

/// Backend with one approved and one pending officer in water resources.
pub async fn backend() -> InProcessBackend {
    let backend = InProcessBackend::new();
    backend
        .insert_officer(approved_officer("officer-7", Department::WaterResources))
        .await;
    backend
        .insert_officer(registered_officer("officer-9", Department::WaterResources))
        .await;
    backend
}

/// File a complaint as `filer` for `citizen_id` and return the server copy.
pub async fn file(client: &InProcessClient, citizen_id: &str, subject: &str) -> Complaint {
    client
        .file_complaint(NewComplaint {
            subject: subject.into(),
            description: format!("{subject}, reported at the ward office"),
            location: Some("Ward 12".into()),
            category: None,
            priority: Default::default(),
            citizen_id: citizen_id.into(),
        })
        .await
        .expect("filing should succeed")
}
