//! Grievance desk.
//!
//! Client-side workflows over the grievance REST API: editing complaints,
//! approving officer registrations and keeping comment threads. The rules
//! themselves (transition table, edit rights, update-request construction)
//! live in `grievance-core`; this crate wires them to a [`GrievanceApi`]
//! and to the per-view state a desk holds.
//!
//! [`GrievanceApi`]: grievance_client::GrievanceApi

pub mod approvals;
pub mod board;
pub mod comments;
pub mod config;
pub mod editor;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use approvals::OfficerApprovals;
pub use board::{ComplaintBoard, MutationGate, MutationGuard};
pub use comments::CommentThread;
pub use config::AppConfig;
pub use editor::ComplaintEditor;
pub use session::SessionStore;
