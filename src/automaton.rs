use std::{collections::BTreeSet, fmt};

use owo_colors::OwoColorize;
use tracing::trace;

use crate::{math::Map, show::Show, Error};

mod name;
pub use name::StateName;

mod state;
pub use state::{Edge, State};

mod scratch;
pub use scratch::Visited;

mod run;

/// The epsilon label that is used unless the input says otherwise.
pub const DEFAULT_EPSILON: &str = "0";
/// The identifier of the initial state that is used unless the input says otherwise.
pub const DEFAULT_INITIAL: &str = "S";

/// A finite automaton whose states are identified by [`StateName`]s. States are stored in
/// insertion order in an arena, edges refer to their targets by name.
///
/// Edges labeled with the epsilon label (see [`Automaton::epsilon`]) can be taken without
/// consuming input, all other labels make up the alphabet. An automaton that was produced
/// by [`Automaton::determinize`] (or validated by [`Automaton::try_into_deterministic`])
/// carries a flag which [`Automaton::minimize`] requires.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    index: Map<StateName, usize>,
    initial: StateName,
    epsilon: String,
    alphabet: BTreeSet<String>,
    determinized: bool,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL, DEFAULT_EPSILON)
    }
}

impl Automaton {
    /// Creates an automaton without states. The initial state does not need to exist yet.
    pub fn new<I: Into<String>, E: Into<String>>(initial: I, epsilon: E) -> Self {
        Self {
            states: Vec::new(),
            index: Map::default(),
            initial: StateName::new(initial),
            epsilon: epsilon.into(),
            alphabet: BTreeSet::new(),
            determinized: false,
        }
    }

    /// Creates an empty automaton that shares the epsilon label and alphabet of `self`.
    pub(crate) fn empty_like(&self, initial: StateName) -> Self {
        Self {
            states: Vec::new(),
            index: Map::default(),
            initial,
            epsilon: self.epsilon.clone(),
            alphabet: self.alphabet.clone(),
            determinized: false,
        }
    }

    /// Returns the position of the state called `name`, creating it without edges if it
    /// does not exist. If `mark_final` is set, the state becomes final. Finality is never
    /// reset by this method.
    pub fn lookup_or_create(&mut self, name: &StateName, mark_final: bool) -> usize {
        if let Some(&pos) = self.index.get(name) {
            if mark_final {
                self.states[pos].mark_final();
            }
            return pos;
        }
        let pos = self.states.len();
        trace!("creating state {name} at position {pos}");
        self.states.push(State::new(name.clone(), mark_final));
        self.index.insert(name.clone(), pos);
        pos
    }

    /// Declares the original state `id` as final.
    pub fn add_final(&mut self, id: &str) {
        self.lookup_or_create(&StateName::new(id), true);
    }

    /// Adds an edge from `source` to `target` labeled with `label`, creating both states as
    /// non-final if they do not exist. Unless `label` is the epsilon label, it becomes part
    /// of the alphabet.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        let from = self.lookup_or_create(&StateName::new(source), false);
        let to = StateName::new(target);
        self.lookup_or_create(&to, false);
        self.push_edge(from, Edge::new(label, to));
        if label != self.epsilon {
            self.alphabet.insert(label.to_string());
        }
    }

    pub(crate) fn push_edge(&mut self, from: usize, edge: Edge) {
        self.states[from].push_edge(edge);
    }

    /// Changes the epsilon label. The alphabet is recomputed from all edges, so the order in
    /// which edges and the epsilon label are declared does not matter.
    pub fn set_epsilon<E: Into<String>>(&mut self, epsilon: E) {
        self.epsilon = epsilon.into();
        self.alphabet = self
            .states
            .iter()
            .flat_map(|q| q.edges().iter().map(|e| e.label()))
            .filter(|label| *label != self.epsilon)
            .map(str::to_string)
            .collect();
    }

    /// Changes the initial state. The state does not need to exist.
    pub fn set_initial<I: Into<StateName>>(&mut self, initial: I) {
        self.initial = initial.into();
    }

    /// The name of the initial state.
    pub fn initial(&self) -> &StateName {
        &self.initial
    }

    /// The epsilon label.
    pub fn epsilon(&self) -> &str {
        &self.epsilon
    }

    /// All labels other than the epsilon label that occur on some edge, in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    /// Edges whose label is not part of the alphabet are epsilon edges.
    pub fn is_epsilon(&self, label: &str) -> bool {
        !self.alphabet.contains(label)
    }

    /// Whether the automaton went through determinization.
    pub fn is_determinized(&self) -> bool {
        self.determinized
    }

    pub(crate) fn mark_determinized(&mut self) {
        self.determinized = true;
    }

    /// All states in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Position of the state called `name`.
    pub fn position(&self, name: &StateName) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The state called `name`.
    pub fn state(&self, name: &StateName) -> Option<&State> {
        self.position(name).map(|pos| &self.states[pos])
    }

    /// Drops every state for which `keep` returns false, preserving the order of the others.
    pub(crate) fn retain<F: FnMut(&State) -> bool>(&mut self, keep: F) {
        self.states.retain(keep);
        self.reindex();
    }

    pub(crate) fn reindex(&mut self) {
        self.index = self
            .states
            .iter()
            .enumerate()
            .map(|(pos, q)| (q.name().clone(), pos))
            .collect();
    }

    /// Returns true if no state has an epsilon edge or two edges sharing a label.
    pub fn is_deterministic(&self) -> bool {
        self.check_deterministic().is_ok()
    }

    fn check_deterministic(&self) -> Result<(), Error> {
        for q in &self.states {
            let mut seen = BTreeSet::new();
            for edge in q.edges() {
                if self.is_epsilon(edge.label()) {
                    return Err(Error::EpsilonEdge {
                        state: q.name().clone(),
                    });
                }
                if !seen.insert(edge.label()) {
                    return Err(Error::Nondeterministic {
                        state: q.name().clone(),
                        label: edge.label().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that every edge points to a state of this automaton.
    pub fn check_edges(&self) -> Result<(), Error> {
        for q in &self.states {
            if let Some(edge) = q.edges().iter().find(|e| !self.index.contains_key(e.target())) {
                return Err(Error::DanglingEdge {
                    origin: q.name().clone(),
                    target: edge.target().clone(),
                });
            }
        }
        Ok(())
    }

    /// Validates that `self` is deterministic and free of epsilon edges and marks it as
    /// determinized, so it can be minimized directly.
    pub fn try_into_deterministic(mut self) -> Result<Self, Error> {
        self.check_deterministic()?;
        self.determinized = true;
        Ok(self)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "initial = {}, epsilon = {}", self.initial, self.epsilon)?;
        for q in &self.states {
            write!(f, "{}\n\n", q.show())?;
        }
        Ok(())
    }
}

impl Show for Automaton {
    /// Renders a transition table with one row per state and one column per label. The
    /// initial state is prefixed with `->`, final states are printed in bold.
    fn show(&self) -> String {
        let mut b = tabled::builder::Builder::default();
        b.push_record(
            std::iter::once(String::new()).chain(self.alphabet.iter().map(|l| l.to_string())),
        );

        for q in &self.states {
            let mut label = q.name().to_string();
            if q.name() == &self.initial {
                label = format!("-> {label}");
            }
            if q.is_final() {
                label = label.bold().to_string();
            }

            let mut row = vec![label];
            for sym in &self.alphabet {
                let targets = q
                    .edges()
                    .iter()
                    .filter(|e| e.label() == sym)
                    .map(|e| e.target())
                    .collect::<Vec<_>>();
                row.push(if targets.is_empty() {
                    "-".dimmed().to_string()
                } else {
                    StateName::show_collection(targets)
                });
            }
            b.push_record(row);
        }

        b.build().with(tabled::settings::Style::ascii()).to_string()
    }
}
