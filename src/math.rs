use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups elements of type `I` into disjoint blocks. The order of the blocks
/// is significant, the position of a block is what the minimizer uses as its index.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord + Copy> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements
    /// of type `I`. Empty blocks are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|block| !block.is_empty())
                .collect(),
        )
    }

    /// Returns a map from every element to the position of the block containing it.
    pub fn block_map(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(pos, block)| block.iter().map(move |i| (*i, pos)))
            .collect()
    }

    /// Gives the position of the block that contains `element`, if there is one.
    pub fn block_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|block| block.contains(element))
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn partition_drops_empty_blocks() {
        let partition = Partition::new([vec![], vec![0usize, 2], vec![1]]);
        assert_eq!(partition.size(), 2);
        assert_eq!(partition.block_of(&2), Some(0));
        assert_eq!(partition.block_of(&1), Some(1));
        assert_eq!(partition.block_of(&7), None);

        let map = partition.block_map();
        assert_eq!(map[&0], 0);
        assert_eq!(map[&1], 1);
    }

    #[test]
    fn partition_equality_ignores_block_order() {
        let left = Partition::new([vec![0usize, 1], vec![2]]);
        let right = Partition::new([vec![2usize], vec![1, 0]]);
        assert_eq!(left, right);
        assert_ne!(left, Partition::new([vec![0usize], vec![1], vec![2]]));
    }
}
