use super::StateName;
use crate::math::Set;

/// Scratch markers for a single traversal pass. States are keyed by their [`StateName`],
/// edges by the position of their source state and their position within that state's
/// edge list. The markers live outside of the automaton, so repeated or independent
/// traversals never observe each other's marks.
#[derive(Debug, Clone, Default)]
pub struct Visited {
    states: Set<StateName>,
    edges: Set<(usize, usize)>,
}

impl Visited {
    /// Marks `name` as visited, returns `false` if it was visited already.
    pub fn visit(&mut self, name: &StateName) -> bool {
        if self.states.contains(name) {
            return false;
        }
        self.states.insert(name.clone())
    }

    /// Returns true if `name` has been visited in this pass.
    pub fn is_visited(&self, name: &StateName) -> bool {
        self.states.contains(name)
    }

    /// Marks the edge at position `edge` of the state at position `state` as used, returns
    /// `false` if it was used already.
    pub fn use_edge(&mut self, state: usize, edge: usize) -> bool {
        self.edges.insert((state, edge))
    }

    /// Number of visited states.
    pub fn visited_states(&self) -> usize {
        self.states.len()
    }

    /// Clears all state markers.
    pub fn reset_visited(&mut self) {
        self.states.clear();
    }

    /// Clears all edge markers.
    pub fn reset_edge_visited(&mut self) {
        self.edges.clear();
    }
}
