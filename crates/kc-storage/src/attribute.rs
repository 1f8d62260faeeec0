//! Attribute predicates shared by every search backend.
//!
//! Three predicate families compare a stored attribute value `V` against a
//! candidate `C`:
//!
//! | Family | Match |
//! |--------|-------|
//! | [`AttributeMatch::Equals`] | `V == C` |
//! | [`AttributeMatch::StartsWith`] | `V` starts with `C` |
//! | [`AttributeMatch::ThatAreStartFor`] | `C` starts with a non-empty `V` |
//!
//! Each family is expressed as an [`AttributeFilter`] (attribute name to
//! candidate list). A user satisfies one entry when any value stored under
//! that name matches any candidate; entries of a filter, and the filters of
//! an [`AttributeCriteria`], are combined with AND.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Attribute name to candidate values.
///
/// A `BTreeMap` keeps entry order stable, so generated queries are
/// deterministic for equal inputs.
pub type AttributeFilter = BTreeMap<String, Vec<String>>;

/// Predicate family for attribute matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeMatch {
    /// Stored value equals the candidate.
    Equals,
    /// Stored value starts with the candidate.
    StartsWith,
    /// Stored value is a non-empty prefix of the candidate.
    ThatAreStartFor,
}

impl AttributeMatch {
    /// All families, in evaluation order.
    pub const ALL: [Self; 3] = [Self::Equals, Self::StartsWith, Self::ThatAreStartFor];

    /// Checks a single stored value against a single candidate.
    #[must_use]
    pub fn matches(self, stored: &str, candidate: &str) -> bool {
        match self {
            Self::Equals => stored == candidate,
            Self::StartsWith => stored.starts_with(candidate),
            Self::ThatAreStartFor => !stored.is_empty() && candidate.starts_with(stored),
        }
    }

    /// Checks a stored value against a candidate list (OR across candidates).
    ///
    /// An empty candidate list never matches.
    #[must_use]
    pub fn matches_any(self, stored: &str, candidates: &[String]) -> bool {
        candidates.iter().any(|c| self.matches(stored, c))
    }

    /// Returns the request field name of this family.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Equals => "attributesEquals",
            Self::StartsWith => "attributesStartsWith",
            Self::ThatAreStartFor => "attributesThatAreStartFor",
        }
    }
}

/// Expands every candidate into all of its non-empty prefixes.
///
/// `"123"` becomes `["1", "12", "123"]`. Prefixes are cut on character
/// boundaries. The result is sorted and free of duplicates, which turns the
/// "is a prefix of" check into plain set membership.
#[must_use]
pub fn expand_prefixes(candidates: &[String]) -> Vec<String> {
    let mut prefixes = BTreeSet::new();
    for candidate in candidates {
        for (idx, ch) in candidate.char_indices() {
            prefixes.insert(candidate[..idx + ch.len_utf8()].to_string());
        }
    }
    prefixes.into_iter().collect()
}

/// Checks one filter against a user's attributes.
///
/// Every entry must be satisfied by at least one value stored under its
/// name. An empty filter places no constraint.
#[must_use]
pub fn matches_filter(
    kind: AttributeMatch,
    filter: &AttributeFilter,
    attributes: &HashMap<String, Vec<String>>,
) -> bool {
    filter.iter().all(|(name, candidates)| {
        attributes
            .get(name)
            .is_some_and(|values| values.iter().any(|v| kind.matches_any(v, candidates)))
    })
}

/// The three attribute filters of a search request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeCriteria {
    /// Exact matches.
    pub equals: AttributeFilter,
    /// Stored value starts with a candidate.
    pub starts_with: AttributeFilter,
    /// Stored value is a prefix of a candidate.
    pub that_are_start_for: AttributeFilter,
}

impl AttributeCriteria {
    /// Creates empty criteria (matches every user).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            equals: BTreeMap::new(),
            starts_with: BTreeMap::new(),
            that_are_start_for: BTreeMap::new(),
        }
    }

    /// Adds an equals entry.
    #[must_use]
    pub fn equals<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equals
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a starts-with entry.
    #[must_use]
    pub fn starts_with<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starts_with
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an is-prefix-of entry.
    #[must_use]
    pub fn that_are_start_for<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.that_are_start_for
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the filter for one family.
    #[must_use]
    pub const fn filter(&self, kind: AttributeMatch) -> &AttributeFilter {
        match kind {
            AttributeMatch::Equals => &self.equals,
            AttributeMatch::StartsWith => &self.starts_with,
            AttributeMatch::ThatAreStartFor => &self.that_are_start_for,
        }
    }

    /// Iterates over every entry as `(family, name, candidates)`.
    pub fn entries(&self) -> impl Iterator<Item = (AttributeMatch, &str, &[String])> {
        AttributeMatch::ALL.into_iter().flat_map(move |kind| {
            self.filter(kind)
                .iter()
                .map(move |(name, values)| (kind, name.as_str(), values.as_slice()))
        })
    }

    /// Returns the number of entries across all families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.equals.len() + self.starts_with.len() + self.that_are_start_for.len()
    }

    /// Checks if no family has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the first entry with an empty candidate list.
    #[must_use]
    pub fn first_empty_entry(&self) -> Option<(AttributeMatch, &str)> {
        self.entries()
            .find(|(_, _, values)| values.is_empty())
            .map(|(kind, name, _)| (kind, name))
    }

    /// Checks the user's attributes against all three families in order.
    #[must_use]
    pub fn matches(&self, attributes: &HashMap<String, Vec<String>>) -> bool {
        AttributeMatch::ALL
            .into_iter()
            .all(|kind| matches_filter(kind, self.filter(kind), attributes))
    }
}
