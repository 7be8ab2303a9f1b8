use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, Edge, StateName, Visited},
    math::Map,
};

/// Accumulates, per label, the union of all target names seen so far.
#[derive(Debug, Default)]
struct Targets(BTreeMap<String, StateName>);

impl Targets {
    fn merge(&mut self, label: &str, target: &StateName) {
        match self.0.get_mut(label) {
            Some(acc) => acc.absorb(target),
            None => {
                self.0.insert(label.to_string(), target.clone());
            }
        }
    }

    /// Registers every accumulated target in `aut` and attaches one edge per label to the
    /// state at position `from`, in ascending label order.
    fn attach(self, aut: &mut Automaton, from: usize) {
        for (label, target) in self.0 {
            aut.lookup_or_create(&target, false);
            aut.push_edge(from, Edge::new(label, target));
        }
    }
}

impl Automaton {
    /// Removes epsilon edges and resolves nondeterminism through the subset construction,
    /// returning a new deterministic automaton. `self` is left untouched.
    ///
    /// The first pass computes, for every state `q`, an epsilon-free state `{q}` whose
    /// `a`-successor is the set of all states reachable from `q` by epsilon edges, one
    /// `a` edge and again epsilon edges. `{q}` is final if a final state is reachable from
    /// `q` by epsilon edges. The second pass starts in the epsilon-closure of the initial
    /// state and materializes every composite state it encounters by merging the first-pass
    /// transitions of its members.
    ///
    /// If `prune_unreachable` is set, only states reachable from the initial state are kept.
    /// Otherwise the first-pass states of unreachable states (and composites they lead to)
    /// are retained as well.
    pub fn determinize(&self, prune_unreachable: bool) -> Automaton {
        let initial = self.epsilon_closure(self.initial());
        let mut det = self.empty_like(initial.clone());

        self.eliminate_epsilons(&mut det);
        debug!(
            "epsilon elimination produced {} states from {}",
            det.size(),
            self.size()
        );

        let mut visited = Visited::default();
        det.lookup_or_create(&initial, false);
        subset_construction(&mut det, initial, &mut visited);

        if prune_unreachable {
            det.retain(|q| visited.is_visited(q.name()));
        } else {
            let mut pos = 0;
            while pos < det.size() {
                let name = det.states()[pos].name().clone();
                if !visited.is_visited(&name) {
                    subset_construction(&mut det, name, &mut visited);
                }
                pos += 1;
            }
        }
        debug!(
            "subset construction reached {} states, keeping {}",
            visited.visited_states(),
            det.size()
        );

        det.mark_determinized();
        det
    }

    /// First pass, registers one epsilon-free state per state of `self` in `det`.
    fn eliminate_epsilons(&self, det: &mut Automaton) {
        let mut closures: Map<StateName, StateName> = Map::default();
        let mut visited = Visited::default();

        for (origin, q) in self.states().iter().enumerate() {
            visited.reset_visited();
            visited.reset_edge_visited();

            let mut is_final = false;
            let mut targets = Targets::default();
            let mut stack = vec![origin];
            visited.visit(q.name());

            while let Some(pos) = stack.pop() {
                let current = &self.states()[pos];
                is_final |= current.is_final();

                for (e, edge) in current.edges().iter().enumerate() {
                    if !visited.use_edge(pos, e) {
                        continue;
                    }
                    if self.is_epsilon(edge.label()) {
                        if let Some(next) = self.position(edge.target()) {
                            if visited.visit(edge.target()) {
                                stack.push(next);
                            }
                        }
                    } else {
                        let closure = closures
                            .entry(edge.target().clone())
                            .or_insert_with(|| self.epsilon_closure(edge.target()));
                        targets.merge(edge.label(), closure);
                    }
                }
            }

            trace!(
                "state {} has {} epsilon-free transitions, final: {is_final}",
                q.name(),
                targets.0.len()
            );
            let from = det.lookup_or_create(q.name(), is_final);
            targets.attach(det, from);
        }
    }
}

/// Second pass, expands `start` and everything reachable from it. Composite states are
/// built from the first-pass states of their members, each name is expanded at most once.
fn subset_construction(det: &mut Automaton, start: StateName, visited: &mut Visited) {
    let mut stack = vec![start];

    while let Some(name) = stack.pop() {
        if !visited.visit(&name) {
            continue;
        }

        let pos = if name.is_composite() {
            merge_members(det, &name)
        } else {
            det.lookup_or_create(&name, false)
        };

        for edge in det.states()[pos].edges().iter().rev() {
            if !visited.is_visited(edge.target()) {
                stack.push(edge.target().clone());
            }
        }
    }
}

/// Builds the composite state `name` from the transitions of its members and returns its
/// position. It is final if any member is.
fn merge_members(det: &mut Automaton, name: &StateName) -> usize {
    let mut is_final = false;
    let mut targets = Targets::default();

    for member in name.members() {
        let pos = det.lookup_or_create(&member, false);
        let state = &det.states()[pos];
        is_final |= state.is_final();
        for edge in state.edges() {
            targets.merge(edge.label(), edge.target());
        }
    }

    trace!("merging composite state {name}, final: {is_final}");
    let pos = det.lookup_or_create(name, is_final);
    targets.attach(det, pos);
    pos
}
