//! In-memory attribute filters over already loaded users.

use kc_model::User;
use kc_storage::attribute::matches_filter;
use kc_storage::{AttributeFilter, AttributeMatch};

/// Keeps the users satisfying one attribute filter, preserving order.
///
/// An empty filter keeps everyone.
pub fn filter_by_attributes<I>(kind: AttributeMatch, users: I, filter: &AttributeFilter) -> Vec<User>
where
    I: IntoIterator<Item = User>,
{
    users
        .into_iter()
        .filter(|user| matches_filter(kind, filter, &user.attributes))
        .collect()
}

/// Keeps users with an attribute value equal to a candidate.
pub fn filter_by_attributes_equals<I>(users: I, filter: &AttributeFilter) -> Vec<User>
where
    I: IntoIterator<Item = User>,
{
    filter_by_attributes(AttributeMatch::Equals, users, filter)
}

/// Keeps users with an attribute value starting with a candidate.
pub fn filter_by_attributes_starts_with<I>(users: I, filter: &AttributeFilter) -> Vec<User>
where
    I: IntoIterator<Item = User>,
{
    filter_by_attributes(AttributeMatch::StartsWith, users, filter)
}

/// Keeps users with an attribute value that is a prefix of a candidate.
pub fn filter_by_attributes_that_are_start_for<I>(users: I, filter: &AttributeFilter) -> Vec<User>
where
    I: IntoIterator<Item = User>,
{
    filter_by_attributes(AttributeMatch::ThatAreStartFor, users, filter)
}
