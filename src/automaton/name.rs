use std::{collections::BTreeSet, fmt};

use itertools::Itertools;

use crate::show::Show;

/// The identity of a state: a non-empty set of original state identifiers. A singleton
/// denotes a state as it was declared, a name with more than one member is a composite
/// state produced by determinization.
///
/// Equality, ordering and hashing only depend on the members, never on the order in which
/// they were added, so a `StateName` can directly be used as a map key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateName(BTreeSet<String>);

impl StateName {
    /// Creates the name of an original state with identifier `id`.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(BTreeSet::from([id.into()]))
    }

    /// Builds a name from the given identifiers, returns `None` if there are none.
    pub fn from_ids<I, S>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            None
        } else {
            Some(Self(ids))
        }
    }

    /// Number of original identifiers in this name.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, a name has at least one member. Present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this name merges more than one original state.
    pub fn is_composite(&self) -> bool {
        self.0.len() > 1
    }

    /// Returns true if `id` is one of the members.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Iterates over the member identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Iterates over the singleton names of all members.
    pub fn members(&self) -> impl Iterator<Item = StateName> + '_ {
        self.0.iter().map(|id| StateName::new(id.clone()))
    }

    /// The smallest member identifier.
    pub fn first(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// Adds all members of `other` to `self`.
    pub fn absorb(&mut self, other: &StateName) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl From<&str> for StateName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StateName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_composite() {
            write!(f, "{{{}}}", self.0.iter().join(", "))
        } else {
            write!(f, "{}", self.first())
        }
    }
}

impl fmt::Debug for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Show for StateName {
    fn show(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::StateName;
    use crate::math::Map;

    #[test]
    fn equality_ignores_insertion_order() {
        let left = StateName::from_ids(["S0", "S", "A"]).unwrap();
        let right = StateName::from_ids(["A", "S", "S0", "S"]).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.len(), 3);

        let mut map = Map::default();
        map.insert(left, 1);
        assert_eq!(map.get(&right), Some(&1));
    }

    #[test]
    fn empty_names_cannot_be_built() {
        assert!(StateName::from_ids(Vec::<String>::new()).is_none());
    }

    #[test]
    fn absorb_and_display() {
        let mut name = StateName::new("S");
        assert!(!name.is_composite());
        assert_eq!(name.to_string(), "S");

        name.absorb(&StateName::new("S0"));
        name.absorb(&StateName::new("S"));
        assert!(name.is_composite());
        assert_eq!(name.to_string(), "{S, S0}");
        assert_eq!(
            name.members().collect::<Vec<_>>(),
            vec![StateName::new("S"), StateName::new("S0")]
        );
    }
}
