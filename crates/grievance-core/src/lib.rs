//! Grievance desk core: the complaint lifecycle and who may change what.
//!
//! Pure, synchronous rules with no I/O. The acting identity is always an
//! explicit [`Actor`] argument; nothing reads ambient session state.
//!
//! - [`transitions`]: the status graph and the choices offered to editors
//! - [`authorization`]: admin-tier membership, `can_edit`, the route guard
//! - [`update`]: turning an editor's changes into a minimal, legal payload
//! - [`filter`]: local filtering and search over fetched lists

pub mod actor;
pub mod authorization;
pub mod error;
pub mod filter;
pub mod transitions;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use actor::Actor;
pub use authorization::{
    can_access_route, can_edit, can_modify_comment, can_view, is_admin_tier, require_comment_author,
    require_edit, RouteDecision, ADMIN_TIER_ROLES,
};
pub use error::{ErrorKind, GrievanceError};
pub use filter::{filter_officers, matches_filter, matches_search};
pub use transitions::{
    allowed_next_statuses, allowed_next_statuses_for, is_terminal, is_transition_allowed,
    require_transition, status_display,
};
pub use update::{build_update_request, ComplaintEdits, ComplaintUpdateRequest, UpdateRequestBuilder};

pub type Result<T> = std::result::Result<T, GrievanceError>;
