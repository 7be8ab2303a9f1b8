use std::collections::BTreeSet;

use tracing::trace;

use super::{Automaton, StateName};

impl Automaton {
    /// Computes the positions of all states reachable from `start` using only epsilon edges,
    /// including the start positions themselves.
    pub fn closure_positions<I: IntoIterator<Item = usize>>(&self, start: I) -> BTreeSet<usize> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<usize> = start.into_iter().collect();

        while let Some(pos) = stack.pop() {
            if !seen.insert(pos) {
                continue;
            }
            for edge in self.states[pos].edges() {
                if !self.is_epsilon(edge.label()) {
                    continue;
                }
                if let Some(target) = self.position(edge.target()) {
                    if !seen.contains(&target) {
                        stack.push(target);
                    }
                }
            }
        }
        seen
    }

    /// The epsilon-closure of the original states making up `name`, as a single name. Members
    /// of `name` that are not states of `self` are kept as they are.
    pub fn epsilon_closure(&self, name: &StateName) -> StateName {
        let mut closure = name.clone();
        let positions = self.closure_positions(name.members().filter_map(|m| self.position(&m)));
        for pos in positions {
            closure.absorb(self.states[pos].name());
        }
        closure
    }

    /// Decides whether the word given as a sequence of labels is accepted. Epsilon edges are
    /// followed before and after each symbol, so this works for arbitrary automata. Symbols
    /// that are not part of the alphabet are rejected.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.closure_positions(self.position(&self.initial));

        for sym in word {
            let sym = sym.as_ref();
            if self.is_epsilon(sym) {
                trace!("symbol {sym} is not part of the alphabet");
                return false;
            }
            let successors = current
                .iter()
                .flat_map(|pos| self.states[*pos].edges())
                .filter(|edge| edge.label() == sym)
                .filter_map(|edge| self.position(edge.target()))
                .collect::<Vec<_>>();
            current = self.closure_positions(successors);
            if current.is_empty() {
                return false;
            }
        }

        current.iter().any(|pos| self.states[*pos].is_final())
    }
}
