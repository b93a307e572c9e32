//! Shared helpers for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Comment, CommentDraft, Fruit, FruitDraft, UserId};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// A fruit owned by `owner`, created at the fixture timestamp.
pub(crate) fn fruit_owned_by(name: &str, owner: Option<UserId>) -> Fruit {
    let draft = FruitDraft::new(name, "red", false).expect("valid fruit draft");
    Fruit::new(draft, owner, fixture_timestamp())
}

/// A comment written by `author` at the fixture timestamp.
pub(crate) fn comment_by(note: &str, author: UserId) -> Comment {
    let draft = CommentDraft::new(note).expect("valid comment draft");
    Comment::new(draft, author, fixture_timestamp())
}
