use grievance_types::{Role, Session, SessionUser};

use crate::authorization::is_admin_tier;
use crate::error::GrievanceError;

/// The identity attempting an operation.
///
/// Always passed explicitly. There is no ambient or thread-local identity;
/// the application builds an `Actor` from its session and hands it to every
/// authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn from_session_user(user: &SessionUser) -> Self {
        Self::new(user.id.clone(), user.role)
    }

    /// Build from a cached session. A blank user id is refused rather than
    /// matched against complaints with missing owner fields.
    pub fn from_session(session: &Session) -> Result<Self, GrievanceError> {
        if session.user.id.trim().is_empty() {
            return Err(GrievanceError::PermissionDenied(
                "session has no user id".into(),
            ));
        }
        Ok(Self::from_session_user(&session.user))
    }

    pub fn is_admin_tier(&self) -> bool {
        is_admin_tier(self.role)
    }

    pub fn require_admin_tier(&self) -> Result<(), GrievanceError> {
        if self.is_admin_tier() {
            Ok(())
        } else {
            Err(GrievanceError::PermissionDenied(format!(
                "{} ({}) is not an administrator",
                self.id, self.role
            )))
        }
    }

    /// True if `id` is present and names this actor. A blank actor id
    /// never matches, even against a blank owner id.
    pub fn is(&self, id: Option<&str>) -> bool {
        if self.id.trim().is_empty() {
            return false;
        }
        id.is_some_and(|id| id == self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, role: Role) -> Session {
        Session {
            token: "t".into(),
            user: SessionUser {
                id: id.into(),
                role,
                name: None,
                employee_id: None,
                mobile_number: None,
            },
        }
    }

    #[test]
    fn from_session_happy_path() {
        let actor = Actor::from_session(&session("officer-7", Role::Officer)).unwrap();
        assert_eq!(actor, Actor::new("officer-7", Role::Officer));
    }

    #[test]
    fn from_session_rejects_blank_id() {
        let err = Actor::from_session(&session("  ", Role::Admin)).unwrap_err();
        assert!(matches!(err, GrievanceError::PermissionDenied(_)));
    }

    #[test]
    fn require_admin_tier_ok_and_err() {
        assert!(Actor::new("dc", Role::DistrictCommissioner)
            .require_admin_tier()
            .is_ok());
        let err = Actor::new("dh", Role::DepartmentHead)
            .require_admin_tier()
            .unwrap_err();
        assert!(matches!(err, GrievanceError::PermissionDenied(_)));
    }

    #[test]
    fn is_matches_only_present_ids() {
        let actor = Actor::new("citizen-1", Role::Citizen);
        assert!(actor.is(Some("citizen-1")));
        assert!(!actor.is(Some("citizen-2")));
        assert!(!actor.is(None));
    }

    #[test]
    fn blank_id_matches_nothing() {
        let blank = Actor::new("", Role::Officer);
        assert!(!blank.is(Some("")));
        assert!(!Actor::new("  ", Role::Officer).is(Some("  ")));
    }
}
