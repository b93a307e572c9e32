//! Ownership checks shared by fruits and comments.
//!
//! A resource either records the user who controls it or, for legacy data,
//! records nobody. An absent owner never matches a caller.

use serde_json::json;

use super::{Error, UserId};

/// Which guarded relation a denial refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipKind {
    /// Fruit owner, gating update and delete.
    Owner,
    /// Comment author, gating comment removal.
    Author,
}

impl OwnershipKind {
    fn reason(self) -> &'static str {
        match self {
            Self::Owner => "not_owner",
            Self::Author => "not_author",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Owner => "only the owner may change this fruit",
            Self::Author => "only the author may delete this comment",
        }
    }
}

/// Resources controlled by a single user.
pub trait OwnedBy {
    /// Relation checked by [`OwnedBy::check_owner`].
    const KIND: OwnershipKind;

    /// The controlling user, if any.
    fn owned_by(&self) -> Option<UserId>;

    /// Whether `user` controls this resource.
    fn is_owned_by(&self, user: &UserId) -> bool {
        self.owned_by().as_ref() == Some(user)
    }

    /// Return `Ok` when `user` controls this resource, else an
    /// `unauthorized` error tagged `not_owner` or `not_author`.
    fn check_owner(&self, user: &UserId) -> Result<(), Error> {
        if self.is_owned_by(user) {
            return Ok(());
        }
        Err(Error::unauthorized(Self::KIND.message())
            .with_details(json!({ "code": Self::KIND.reason() })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    struct Thing(Option<UserId>);

    impl OwnedBy for Thing {
        const KIND: OwnershipKind = OwnershipKind::Owner;

        fn owned_by(&self) -> Option<UserId> {
            self.0
        }
    }

    #[test]
    fn owner_passes_check() {
        let user = UserId::random();
        assert!(Thing(Some(user)).check_owner(&user).is_ok());
    }

    #[test]
    fn stranger_is_rejected_with_reason() {
        let err = Thing(Some(UserId::random()))
            .check_owner(&UserId::random())
            .expect_err("stranger");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.reason(), Some("not_owner"));
    }

    #[test]
    fn ownerless_resource_matches_nobody() {
        let user = UserId::random();
        assert!(!Thing(None).is_owned_by(&user));
        assert!(Thing(None).check_owner(&user).is_err());
    }
}
