//! Command policy - who may set credits, and what counts are acceptable.

use crate::{
    core::ledger::{CreditChange, CreditLedger},
    errors::{Error, Result},
};

/// The user invoking a command, reduced to what the core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Discord user ID
    pub id: u64,
    /// Display tag (e.g. `name` or `name#1234`)
    pub tag: String,
    /// Avatar URL, used as the announcement author icon
    pub avatar_url: Option<String>,
    /// Role IDs the user holds in the guild the command came from
    pub roles: Vec<u64>,
}

/// Returns true only when a staff role is configured and the actor holds it.
///
/// An unconfigured role means nobody is authorized.
#[must_use]
pub fn is_authorized(roles: &[u64], required_role: Option<u64>) -> bool {
    required_role.is_some_and(|role| roles.contains(&role))
}

/// Converts a requested credit count into a ledger value, rejecting negatives.
pub fn validate_count(count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|_| Error::InvalidArgument {
        message: format!("credit count must be 0 or greater, got {count}"),
    })
}

/// Overwrites `target`'s credits with `count` on behalf of `actor`.
///
/// Authorization is checked before the count, so an unauthorized actor never
/// learns whether the count would have been accepted. The ledger is untouched
/// on any error.
pub async fn set_credits(
    ledger: &CreditLedger,
    actor: &Actor,
    required_role: Option<u64>,
    target: u64,
    count: i64,
) -> Result<CreditChange> {
    if !is_authorized(&actor.roles, required_role) {
        return Err(Error::Unauthorized);
    }
    let count = validate_count(count)?;
    Ok(ledger.set(target, count).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{STAFF_ROLE, member, staff};

    #[test]
    fn test_is_authorized_requires_configured_role() {
        assert!(is_authorized(&[STAFF_ROLE], Some(STAFF_ROLE)));
        assert!(is_authorized(&[1, 2, STAFF_ROLE], Some(STAFF_ROLE)));
        assert!(!is_authorized(&[1, 2], Some(STAFF_ROLE)));
        assert!(!is_authorized(&[], Some(STAFF_ROLE)));
        assert!(!is_authorized(&[STAFF_ROLE], None));
        assert!(!is_authorized(&[], None));
    }

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count(0).unwrap(), 0);
        assert_eq!(validate_count(12).unwrap(), 12);
        assert!(matches!(
            validate_count(-1),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_set_credits_by_staff() -> Result<()> {
        let ledger = CreditLedger::new();
        let actor = staff(1);

        let first = set_credits(&ledger, &actor, Some(STAFF_ROLE), 42, 2).await?;
        assert_eq!(first.previous, 0);
        assert_eq!(first.current, 2);

        let second = set_credits(&ledger, &actor, Some(STAFF_ROLE), 42, 7).await?;
        assert_eq!(second.previous, 2);
        assert_eq!(ledger.credits(42).await, 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_credits_negative_leaves_count_unchanged() {
        let ledger = CreditLedger::new();
        ledger.set(42, 3).await;

        let result = set_credits(&ledger, &staff(1), Some(STAFF_ROLE), 42, -1).await;

        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert_eq!(ledger.credits(42).await, 3);
    }

    #[tokio::test]
    async fn test_set_credits_by_regular_member_is_unauthorized() {
        let ledger = CreditLedger::new();
        ledger.set(42, 3).await;

        for count in [0, 5, -1] {
            let result = set_credits(&ledger, &member(2), Some(STAFF_ROLE), 42, count).await;
            assert!(matches!(result, Err(Error::Unauthorized)));
        }
        assert_eq!(ledger.credits(42).await, 3);
    }

    #[tokio::test]
    async fn test_set_credits_without_configured_role_is_unauthorized_for_everyone() {
        let ledger = CreditLedger::new();

        let result = set_credits(&ledger, &staff(1), None, 42, 5).await;

        assert!(matches!(result, Err(Error::Unauthorized)));
        assert_eq!(ledger.credits(42).await, 0);
    }
}
