use thiserror::Error;
use crate::models::Relationships;

/// Reasons a friend request transition is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationshipError {
    #[error("cannot add yourself")]
    SelfRequest,

    #[error("request already pending")]
    AlreadyPending,

    #[error("already friends")]
    AlreadyFriends,

    #[error("no pending request from {0}")]
    NoPendingRequest(String),
}

impl RelationshipError {
    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            RelationshipError::SelfRequest => "self_request",
            RelationshipError::AlreadyPending => "already_pending",
            RelationshipError::AlreadyFriends => "already_friends",
            RelationshipError::NoPendingRequest(_) => "no_pending_request",
        }
    }
}

/// Check that `from` may send a friend request to `to`
///
/// `target` is the relationship record of `to`.
pub fn check_request(from: &str, to: &str, target: &Relationships) -> Result<(), RelationshipError> {
    if from == to {
        return Err(RelationshipError::SelfRequest);
    }
    if target.has_pending(from) {
        return Err(RelationshipError::AlreadyPending);
    }
    if target.is_friend(from) {
        return Err(RelationshipError::AlreadyFriends);
    }
    Ok(())
}

/// Queue a request from `from` on the record of `to`
pub fn apply_request(from: &str, to: &str, target: &mut Relationships) -> Result<(), RelationshipError> {
    check_request(from, to, target)?;
    target.pending.push(from.to_string());
    Ok(())
}

/// `to` accepts the request sent by `from`
///
/// Both records are updated together: the pending entry is removed, a
/// reciprocal pending entry (`to` asked `from` as well) is removed too, and
/// each side lists the other as a friend. Accepting a pair that is already
/// friends only cleans up stray pending entries.
pub fn apply_accept(
    from: &str,
    to: &str,
    requester: &mut Relationships,
    accepter: &mut Relationships,
) -> Result<(), RelationshipError> {
    if from == to {
        return Err(RelationshipError::SelfRequest);
    }

    let already_friends = accepter.is_friend(from) || requester.is_friend(to);
    if !already_friends && !accepter.has_pending(from) {
        return Err(RelationshipError::NoPendingRequest(from.to_string()));
    }

    accepter.pending.retain(|u| u != from);
    requester.pending.retain(|u| u != to);

    if !accepter.is_friend(from) {
        accepter.friends.push(from.to_string());
    }
    if !requester.is_friend(to) {
        requester.friends.push(to.to_string());
    }

    Ok(())
}

/// `to` denies the request sent by `from`. Returns whether a request existed.
pub fn apply_deny(from: &str, accepter: &mut Relationships) -> bool {
    let before = accepter.pending.len();
    accepter.pending.retain(|u| u != from);
    accepter.pending.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_request_rejected() {
        let target = Relationships::default();
        assert_eq!(
            check_request("alice", "alice", &target),
            Err(RelationshipError::SelfRequest)
        );
    }

    #[test]
    fn test_duplicate_request_rejected() {
        let mut target = Relationships::default();
        apply_request("alice", "bob", &mut target).unwrap();

        assert_eq!(
            apply_request("alice", "bob", &mut target),
            Err(RelationshipError::AlreadyPending)
        );
        assert_eq!(target.pending, vec!["alice"]);
    }

    #[test]
    fn test_request_to_friend_rejected() {
        let target = Relationships {
            pending: vec![],
            friends: vec!["alice".to_string()],
        };

        assert_eq!(
            check_request("alice", "bob", &target),
            Err(RelationshipError::AlreadyFriends)
        );
    }

    #[test]
    fn test_accept_makes_friendship_symmetric() {
        let mut alice = Relationships::default();
        let mut bob = Relationships::default();
        apply_request("alice", "bob", &mut bob).unwrap();

        apply_accept("alice", "bob", &mut alice, &mut bob).unwrap();

        assert!(bob.pending.is_empty());
        assert_eq!(bob.friends, vec!["alice"]);
        assert_eq!(alice.friends, vec!["bob"]);
    }

    #[test]
    fn test_crossed_requests_resolve_to_single_friendship() {
        let mut alice = Relationships::default();
        let mut bob = Relationships::default();
        apply_request("alice", "bob", &mut bob).unwrap();
        apply_request("bob", "alice", &mut alice).unwrap();

        apply_accept("alice", "bob", &mut alice, &mut bob).unwrap();
        // The other side accepting afterwards is a no-op
        apply_accept("bob", "alice", &mut bob, &mut alice).unwrap();

        assert!(alice.pending.is_empty());
        assert!(bob.pending.is_empty());
        assert_eq!(alice.friends, vec!["bob"]);
        assert_eq!(bob.friends, vec!["alice"]);
    }

    #[test]
    fn test_accept_without_request_rejected() {
        let mut alice = Relationships::default();
        let mut bob = Relationships::default();

        assert_eq!(
            apply_accept("alice", "bob", &mut alice, &mut bob),
            Err(RelationshipError::NoPendingRequest("alice".to_string()))
        );
        assert!(alice.friends.is_empty());
        assert!(bob.friends.is_empty());
    }

    #[test]
    fn test_deny_removes_pending_only() {
        let mut bob = Relationships::default();
        apply_request("alice", "bob", &mut bob).unwrap();

        assert!(apply_deny("alice", &mut bob));
        assert!(bob.pending.is_empty());
        assert!(bob.friends.is_empty());
        assert!(!apply_deny("alice", &mut bob));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            RelationshipError::SelfRequest.code(),
            RelationshipError::AlreadyPending.code(),
            RelationshipError::AlreadyFriends.code(),
            RelationshipError::NoPendingRequest("x".to_string()).code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
