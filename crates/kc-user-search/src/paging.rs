//! Continuation-token pagination over a realm's user listing.
//!
//! A token counts the source records already examined. The scan re-reads
//! the realm listing from that position, so no state is kept between
//! calls. Positions are only meaningful while the listing is unchanged;
//! users added or removed between two calls shift later pages.

use kc_model::User;
use kc_storage::{AttributeCriteria, StorageResult, UserProvider};
use uuid::Uuid;

/// Position in a realm's user listing where the next page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContinueToken(i64);

impl ContinueToken {
    /// First page.
    pub const START: Self = Self(0);

    /// No pages remain.
    pub const EXHAUSTED: Self = Self(-1);

    /// Wraps a raw token. Any negative value means exhausted.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Creates a token pointing at a listing position.
    #[must_use]
    pub fn at(position: usize) -> Self {
        Self(i64::try_from(position).unwrap_or(i64::MAX))
    }

    /// Returns the raw token.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Checks whether no pages remain.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.0 < 0
    }

    /// Returns the listing position, or `None` when exhausted.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Default for ContinueToken {
    fn default() -> Self {
        Self::START
    }
}

impl From<i64> for ContinueToken {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// One page of matches and the token for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedUsers {
    /// Matching users in listing order.
    pub users: Vec<User>,
    /// Where the next page starts.
    pub next: ContinueToken,
}

impl PagedUsers {
    /// An empty, final page.
    #[must_use]
    pub const fn exhausted() -> Self {
        Self {
            users: Vec::new(),
            next: ContinueToken::EXHAUSTED,
        }
    }
}

/// Scans the realm listing from `token` and collects one page of matches.
///
/// With `limit` unset or zero the rest of the listing is scanned in a
/// single pass and the page is final. Otherwise the listing is read in
/// windows of `limit` records until `limit + 1` matches are seen or the
/// listing ends; the extra match only proves another page exists, and the
/// returned token points at it.
///
/// # Errors
///
/// Returns an error if listing users fails.
pub async fn scan_page<U>(
    users: &U,
    realm_id: Uuid,
    attributes: &AttributeCriteria,
    token: ContinueToken,
    limit: Option<usize>,
) -> StorageResult<PagedUsers>
where
    U: UserProvider + ?Sized,
{
    let Some(mut position) = token.position() else {
        return Ok(PagedUsers::exhausted());
    };

    let limit = limit.filter(|l| *l > 0);
    let wanted = limit.map(|l| l.saturating_add(1));
    let mut found = Vec::new();

    loop {
        let start = position;
        for user in users.list(realm_id, position, limit).await? {
            if wanted.is_some_and(|w| found.len() >= w) {
                break;
            }
            position += 1;
            if attributes.matches(&user.attributes) {
                found.push(user);
            }
        }

        match wanted {
            Some(wanted) if position != start && found.len() < wanted => {}
            _ => break,
        }
    }

    match limit {
        Some(limit) if found.len() > limit => {
            found.truncate(limit);
            Ok(PagedUsers {
                users: found,
                next: ContinueToken::at(position.saturating_sub(1)),
            })
        }
        _ => Ok(PagedUsers {
            users: found,
            next: ContinueToken::EXHAUSTED,
        }),
    }
}
