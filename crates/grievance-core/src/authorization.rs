//! Who may do what.
//!
//! These checks are a client-side guard. The server repeats them and its
//! rejection is the authoritative one.

use grievance_types::{Comment, Complaint, Role};

use crate::actor::Actor;
use crate::error::GrievanceError;

/// Roles allowed to reassign departments and decide officer approvals.
/// Closed set: no other role is admin-tier, whatever it is called.
pub const ADMIN_TIER_ROLES: [Role; 3] = [
    Role::Admin,
    Role::DistrictCommissioner,
    Role::AdditionalDistrictCommissioner,
];

pub fn is_admin_tier(role: Role) -> bool {
    ADMIN_TIER_ROLES.contains(&role)
}

/// Admin-tier, the complaint's creator, or its assigned officer.
///
/// Evaluate on every attempt: assignment changes between page loads.
pub fn can_edit(actor: &Actor, complaint: &Complaint) -> bool {
    is_admin_tier(actor.role)
        || actor.is(complaint.created_by_id.as_deref())
        || actor.is(complaint.assigned_to_id.as_deref())
}

pub fn require_edit(actor: &Actor, complaint: &Complaint) -> Result<(), GrievanceError> {
    if can_edit(actor, complaint) {
        Ok(())
    } else {
        tracing::debug!(
            actor = %actor.id,
            role = %actor.role,
            complaint = %complaint.id,
            "edit denied"
        );
        Err(GrievanceError::PermissionDenied(format!(
            "{} may not edit complaint {}",
            actor.id, complaint.complaint_number
        )))
    }
}

/// Editors plus the citizen the complaint was filed for. Gates reading and
/// commenting, never field edits.
pub fn can_view(actor: &Actor, complaint: &Complaint) -> bool {
    can_edit(actor, complaint) || actor.is(Some(complaint.citizen_id.as_str()))
}

/// Comments can only be changed or removed by whoever wrote them.
pub fn can_modify_comment(actor: &Actor, comment: &Comment) -> bool {
    actor.is(Some(comment.commenter_id.as_str()))
}

pub fn require_comment_author(actor: &Actor, comment: &Comment) -> Result<(), GrievanceError> {
    if can_modify_comment(actor, comment) {
        Ok(())
    } else {
        Err(GrievanceError::PermissionDenied(format!(
            "comment {} belongs to another user",
            comment.id
        )))
    }
}

/// Where a guarded page sends its visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Not signed in. `return_to` is the page to resume after login.
    RedirectToLogin { entry: String, return_to: String },
    /// Signed in with a role outside the page's allow-list.
    Forbidden,
}

pub const LOGIN_ENTRY: &str = "/login";

/// Page-level gate by exact role membership. Runs before any complaint data
/// is fetched, so it knows nothing about ownership.
pub fn can_access_route(
    actor: Option<&Actor>,
    requested_path: &str,
    allowed_roles: &[Role],
) -> RouteDecision {
    match actor {
        None => RouteDecision::RedirectToLogin {
            entry: LOGIN_ENTRY.to_string(),
            return_to: requested_path.to_string(),
        },
        Some(actor) if allowed_roles.contains(&actor.role) => RouteDecision::Allow,
        Some(_) => RouteDecision::Forbidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::complaint;
    use chrono::Utc;

    #[test]
    fn admin_tier_membership_is_exact() {
        assert!(is_admin_tier(Role::Admin));
        assert!(is_admin_tier(Role::DistrictCommissioner));
        assert!(is_admin_tier(Role::AdditionalDistrictCommissioner));
        assert!(!is_admin_tier(Role::DepartmentHead));
        assert!(!is_admin_tier(Role::Officer));
        assert!(!is_admin_tier(Role::Citizen));
    }

    #[test]
    fn admin_can_edit_anything() {
        let c = complaint(None, None);
        assert!(can_edit(&Actor::new("adc-1", Role::AdditionalDistrictCommissioner), &c));
    }

    #[test]
    fn creator_and_assignee_can_edit() {
        let c = complaint(Some("officer-2"), Some("officer-7"));
        assert!(can_edit(&Actor::new("officer-2", Role::Officer), &c));
        assert!(can_edit(&Actor::new("officer-7", Role::Officer), &c));
        assert!(!can_edit(&Actor::new("officer-8", Role::Officer), &c));
    }

    #[test]
    fn filing_citizen_is_not_an_editor_by_default() {
        // citizen_id alone grants nothing; only created_by_id does.
        let c = complaint(None, None);
        assert!(!can_edit(&Actor::new("citizen-1", Role::Citizen), &c));
    }

    #[test]
    fn filing_citizen_can_view_but_not_edit() {
        let c = complaint(None, Some("officer-7"));
        let citizen = Actor::new("citizen-1", Role::Citizen);
        assert!(can_view(&citizen, &c));
        assert!(!can_edit(&citizen, &c));
        assert!(!can_view(&Actor::new("citizen-2", Role::Citizen), &c));
        assert!(can_view(&Actor::new("officer-7", Role::Officer), &c));
    }

    #[test]
    fn require_edit_denies_stranger() {
        let c = complaint(Some("citizen-1"), None);
        let err = require_edit(&Actor::new("citizen-2", Role::Citizen), &c).unwrap_err();
        assert!(matches!(err, GrievanceError::PermissionDenied(_)));
    }

    #[test]
    fn route_guard_redirects_anonymous_with_return_path() {
        let decision = can_access_route(None, "/admin/officers", &[Role::Admin]);
        assert_eq!(
            decision,
            RouteDecision::RedirectToLogin {
                entry: "/login".into(),
                return_to: "/admin/officers".into()
            }
        );
    }

    #[test]
    fn route_guard_uses_exact_membership() {
        let officer = Actor::new("o", Role::Officer);
        let dc = Actor::new("dc", Role::DistrictCommissioner);
        let allowed = [Role::Admin];
        assert_eq!(can_access_route(Some(&officer), "/admin", &allowed), RouteDecision::Forbidden);
        // admin-tier does not imply membership in a caller-supplied list
        assert_eq!(can_access_route(Some(&dc), "/admin", &allowed), RouteDecision::Forbidden);
        assert_eq!(
            can_access_route(Some(&dc), "/admin", &[Role::DistrictCommissioner]),
            RouteDecision::Allow
        );
    }

    #[test]
    fn only_author_modifies_comment() {
        let now = Utc::now();
        let comment = Comment {
            id: "cm-1".into(),
            complaint_id: "c-1".into(),
            commenter_id: "officer-7".into(),
            commenter_name: "Officer Seven".into(),
            commenter_role: Role::Officer,
            text: "Site visited".into(),
            attachments: vec![],
            created_at: now,
            updated_at: now,
        };
        assert!(can_modify_comment(&Actor::new("officer-7", Role::Officer), &comment));
        // admin-tier grants nothing over someone else's comment
        assert!(!can_modify_comment(&Actor::new("admin", Role::Admin), &comment));
        assert!(require_comment_author(&Actor::new("admin", Role::Admin), &comment).is_err());
    }

    #[test]
    fn blank_actor_gets_no_owner_rights() {
        let mut c = complaint(None, None);
        c.citizen_id = String::new();
        let blank = Actor::new("", Role::Citizen);
        assert!(!can_view(&blank, &c));
        assert!(!can_edit(&blank, &c));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::complaint;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn arb_role() -> impl Strategy<Value = Role> {
        proptest::sample::select(Role::iter().collect::<Vec<_>>())
    }

    fn arb_id() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-c]-[0-2]")
    }

    proptest! {
        #[test]
        fn can_edit_is_exactly_the_three_grants(
            role in arb_role(),
            actor_id in "[a-c]-[0-2]",
            created_by in arb_id(),
            assigned_to in arb_id(),
        ) {
            let c = complaint(created_by.as_deref(), assigned_to.as_deref());
            let actor = Actor::new(actor_id.clone(), role);
            let expected = ADMIN_TIER_ROLES.contains(&role)
                || created_by.as_deref() == Some(actor_id.as_str())
                || assigned_to.as_deref() == Some(actor_id.as_str());
            prop_assert_eq!(can_edit(&actor, &c), expected);
        }

        #[test]
        fn blank_actor_id_never_matches_an_owner(
            role in arb_role(),
            actor_id in "[ \t]{0,3}",
            created_by in proptest::option::of(Just(String::new())),
            assigned_to in proptest::option::of("[ \t]{0,3}"),
        ) {
            let c = complaint(created_by.as_deref(), assigned_to.as_deref());
            let actor = Actor::new(actor_id, role);
            prop_assert_eq!(can_edit(&actor, &c), ADMIN_TIER_ROLES.contains(&role));
        }
    }
}
