use tracing::debug;

use crate::{
    automaton::{Automaton, StateName},
    math::Bijection,
    sink::Sink,
};

/// Produces the `n`-th name of the sequence `A`, `B`, ..., `Z`, `AA`, `AB`, ...
pub fn sequential_name(n: usize) -> String {
    let mut n = n + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.iter().rev().map(|b| *b as char).collect()
}

impl Automaton {
    /// Gives every state a short name, following the order in which the states are stored.
    /// The transition structure is unchanged, edges and the initial state are updated to
    /// the new names. Each `old --> new` pair is reported to `sink`.
    ///
    /// Returns the renamed automaton together with the mapping from old to new names.
    pub fn rename<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> (Automaton, Bijection<StateName, StateName>) {
        let mut mapping = Bijection::new();
        let mut renamed = self.clone();
        let mut initial = None;

        for (pos, q) in renamed.states_mut().iter_mut().enumerate() {
            let old = q.name().clone();
            let new = StateName::new(sequential_name(pos));
            if initial.is_none() && old == *self.initial() {
                initial = Some(new.clone());
            }
            sink.report(&format!("{old} --> {new}"));
            q.rename(new.clone());
            mapping.insert(old, new);
        }

        for q in renamed.states_mut() {
            for edge in q.edges_mut() {
                if let Some(new) = mapping.get_by_left(edge.target()) {
                    edge.retarget(new.clone());
                }
            }
        }
        if let Some(initial) = initial {
            renamed.set_initial(initial);
        }
        renamed.reindex();

        debug!("renamed {} states", mapping.len());
        (renamed, mapping)
    }
}
