//! Shared API types for the grievance desk.
//!
//! This crate is the single source of truth for every record crossing the
//! REST boundary. Field names are camelCase on the wire and every enum
//! serializes as its SCREAMING_SNAKE_CASE code.
//!
//! No behaviour lives here: transition rules, authorization and request
//! construction belong to `grievance-core`.

pub mod complaint;
pub mod filter;
pub mod officer;
pub mod session;
pub mod vocabulary;

pub use complaint::{Comment, Complaint, ComplaintDocument, ComplaintHistory, NewComplaint};
pub use filter::ComplaintFilter;
pub use officer::{ApprovalDecision, Officer};
pub use session::{Session, SessionUser};
pub use vocabulary::{ApprovalStatus, ComplaintCategory, ComplaintStatus, Department, Priority, Role};
