use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    automaton::{Automaton, Edge, StateName},
    math::{Map, Partition},
    show::Show,
    sink::Sink,
    Error,
};

/// For every outgoing edge its label and the block its target belongs to, sorted.
type Signature<'a> = Vec<(&'a str, Option<usize>)>;

impl Automaton {
    /// Computes the minimal automaton equivalent to `self` using Moore's partition
    /// refinement. Fails with [`Error::NotDeterminized`] unless `self` went through
    /// [`Automaton::determinize`] or [`Automaton::try_into_deterministic`].
    ///
    /// The refinement starts from the split into final and non-final states. In each step a
    /// block is split such that two states stay together if and only if they have the same
    /// outgoing labels and, for each label, targets in the same block of the previous
    /// partition. Since refinement only ever splits blocks, the fixpoint is reached once the
    /// number of blocks stops changing.
    ///
    /// The resulting states are named `N1`, `N2`, ... in block order. The initial partition,
    /// every intermediate partition, the final partition and the outcome are reported to
    /// `sink`.
    pub fn minimize<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<Automaton, Error> {
        if !self.is_determinized() {
            return Err(Error::NotDeterminized);
        }
        self.check_edges()?;

        let (finals, non_finals): (Vec<usize>, Vec<usize>) =
            (0..self.size()).partition(|pos| self.states()[*pos].is_final());
        let mut partition = Partition::new([finals, non_finals]);
        sink.report(&format!("[Initial]:\n{}", self.show_partition(&partition)));

        let mut steps = 0;
        loop {
            let refined = self.refine(&partition);
            if refined.size() == partition.size() {
                break;
            }
            steps += 1;
            debug!(
                "refinement step {steps} split {} blocks into {}",
                partition.size(),
                refined.size()
            );
            sink.report(&format!("[Step]:\n{}", self.show_partition(&refined)));
            partition = refined;
        }

        sink.report(&format!("[Final]:\n{}", self.show_partition(&partition)));
        if partition.size() == self.size() {
            info!("no two of the {} states are equivalent", self.size());
            sink.report("Impossible to minimize automaton!");
        } else {
            info!(
                "minimized {} states to {} after {steps} refinement steps",
                self.size(),
                partition.size()
            );
            sink.report("Minimization successfully completed!");
        }

        Ok(self.quotient(&partition))
    }

    fn signature<'a>(&'a self, pos: usize, blocks: &Map<usize, usize>) -> Signature<'a> {
        let mut signature: Signature<'a> = self.states()[pos]
            .edges()
            .iter()
            .map(|e| {
                let block = self
                    .position(e.target())
                    .and_then(|target| blocks.get(&target).copied());
                (e.label(), block)
            })
            .collect();
        signature.sort_unstable();
        signature
    }

    /// One refinement step. Block indices in signatures refer to `partition`, never to the
    /// partition under construction.
    fn refine(&self, partition: &Partition<usize>) -> Partition<usize> {
        let blocks = partition.block_map();
        let mut refined = Vec::with_capacity(partition.size());

        for block in partition {
            let mut groups: IndexMap<Signature<'_>, Vec<usize>> = IndexMap::new();
            for &pos in block {
                groups
                    .entry(self.signature(pos, &blocks))
                    .or_default()
                    .push(pos);
            }
            refined.extend(groups.into_values());
        }

        Partition::new(refined)
    }

    /// Builds the automaton with one state per block. Transitions are taken from the first
    /// member of each block, all members agree on them once the refinement is stable.
    fn quotient(&self, partition: &Partition<usize>) -> Automaton {
        let blocks = partition.block_map();
        let block_name = |block: usize| StateName::new(format!("N{}", block + 1));

        let initial = self
            .position(self.initial())
            .and_then(|pos| blocks.get(&pos))
            .map(|block| block_name(*block))
            .unwrap_or_else(|| self.initial().clone());
        let mut min = self.empty_like(initial);

        for (i, block) in partition.iter().enumerate() {
            let is_final = block.iter().any(|pos| self.states()[*pos].is_final());
            min.lookup_or_create(&block_name(i), is_final);
        }

        for (i, block) in partition.iter().enumerate() {
            let Some(&representative) = block.first() else {
                continue;
            };
            for edge in self.states()[representative].edges() {
                if let Some(target) = self
                    .position(edge.target())
                    .and_then(|pos| blocks.get(&pos))
                {
                    min.push_edge(i, Edge::new(edge.label(), block_name(*target)));
                }
            }
        }

        min.mark_determinized();
        min
    }

    /// Renders a partition as one `[Ni]: q1, q2, ...` line per block.
    pub fn show_partition(&self, partition: &Partition<usize>) -> String {
        partition
            .iter()
            .enumerate()
            .map(|(i, block)| {
                format!(
                    "[N{}]: {}",
                    i + 1,
                    StateName::show_collection(block.iter().map(|pos| self.states()[*pos].name()))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn dfa(initial: &str, edges: &[(&str, &str, &str)], finals: &[&str]) -> Automaton {
        let mut aut = Automaton::new(initial, "0");
        for (source, label, target) in edges {
            aut.add_edge(source, target, label);
        }
        for q in finals {
            aut.add_final(q);
        }
        aut.try_into_deterministic().unwrap()
    }

    pub fn wiki_dfa() -> Automaton {
        dfa(
            "0",
            &[
                ("0", "a", "1"),
                ("0", "b", "2"),
                ("1", "a", "0"),
                ("1", "b", "3"),
                ("2", "a", "4"),
                ("2", "b", "5"),
                ("3", "a", "4"),
                ("3", "b", "5"),
                ("4", "a", "4"),
                ("4", "b", "5"),
                ("5", "a", "5"),
                ("5", "b", "5"),
            ],
            &["2", "3", "4"],
        )
    }

    #[test_log::test]
    fn minimize_wiki_dfa() {
        let aut = wiki_dfa();
        let mut lines: Vec<String> = Vec::new();
        let min = aut.minimize(&mut lines).unwrap();

        assert_eq!(min.size(), 3);
        assert!(min.is_determinized());
        assert!(min.is_deterministic());
        assert_eq!(
            lines[0],
            "[Initial]:\n[N1]: 2, 3, 4\n[N2]: 0, 1, 5".to_string()
        );
        assert_eq!(lines.last().unwrap(), "Minimization successfully completed!");

        // the block of the old initial state `0` is the second one after refinement
        assert_eq!(min.initial(), &StateName::new("N2"));
        let initial = min.state(min.initial()).unwrap();
        assert_eq!(initial.edge("a").unwrap().target(), min.initial());
        assert!(min.state(initial.edge("b").unwrap().target()).unwrap().is_final());

        for word in [vec!["a", "b"], vec!["b", "a", "a"], vec!["b", "b"], vec![]] {
            assert_eq!(aut.accepts(&word), min.accepts(&word), "{word:?}");
        }
    }

    #[test_log::test]
    fn equivalent_final_states_are_merged() {
        let aut = dfa(
            "p",
            &[
                ("p", "a", "f1"),
                ("p", "b", "f2"),
                ("p", "c", "f3"),
                ("f1", "a", "p"),
                ("f2", "a", "p"),
                ("f3", "b", "p"),
            ],
            &["f1", "f2", "f3"],
        );
        let min = aut.minimize(&mut ()).unwrap();
        assert_eq!(min.size(), 3);

        let p = min.state(min.initial()).unwrap();
        assert!(!p.is_final());
        assert_eq!(
            p.edge("a").unwrap().target(),
            p.edge("b").unwrap().target()
        );
        assert_ne!(
            p.edge("a").unwrap().target(),
            p.edge("c").unwrap().target()
        );
    }

    #[test_log::test]
    fn impossible_to_minimize() {
        let aut = dfa(
            "p",
            &[("p", "a", "q"), ("q", "a", "r"), ("r", "a", "r")],
            &["r"],
        );
        let mut text = String::new();
        let min = aut.minimize(&mut text).unwrap();
        assert_eq!(min.size(), aut.size());
        assert!(text.contains("Impossible to minimize"));
        assert!(text.contains("[Step]:"));
    }

    #[test_log::test]
    fn minimizing_twice_changes_nothing() {
        let min = wiki_dfa().minimize(&mut ()).unwrap();
        let mut lines: Vec<String> = Vec::new();
        let again = min.minimize(&mut lines).unwrap();
        assert_eq!(again.size(), min.size());
        assert_eq!(lines.last().unwrap(), "Impossible to minimize automaton!");
    }

    #[test_log::test]
    fn different_out_degree_is_never_merged() {
        let aut = dfa("p", &[("p", "a", "q"), ("q", "a", "q"), ("q", "b", "q")], &[]);
        let min = aut.minimize(&mut ()).unwrap();
        assert_eq!(min.size(), 2);
    }

    #[test_log::test]
    fn only_non_final_states() {
        let aut = dfa("p", &[("p", "a", "q"), ("q", "a", "p")], &[]);
        let min = aut.minimize(&mut ()).unwrap();
        assert_eq!(min.size(), 1);
        assert_eq!(min.initial(), &StateName::new("N1"));
        assert!(!min.accepts(["a"]));
    }

    #[test_log::test]
    fn requires_determinization() {
        let mut aut = Automaton::default();
        aut.add_edge("S", "A", "a");
        assert!(matches!(
            aut.minimize(&mut ()),
            Err(Error::NotDeterminized)
        ));

        let det = aut.determinize(true);
        assert!(det.minimize(&mut ()).is_ok());
    }

    #[test_log::test]
    fn empty_automaton() {
        let aut = Automaton::default().try_into_deterministic().unwrap();
        let mut lines: Vec<String> = Vec::new();
        let min = aut.minimize(&mut lines).unwrap();
        assert_eq!(min.size(), 0);
        assert_eq!(min.initial(), &StateName::new("S"));
    }
}
