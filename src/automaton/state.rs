use std::hash::{Hash, Hasher};

use super::StateName;
use crate::show::Show;

/// A labeled transition, owned by its source [`State`]. The target is referenced by its
/// [`StateName`], states never own each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    label: String,
    target: StateName,
}

impl Edge {
    /// Creates an edge with the given label pointing to `target`.
    pub fn new<L: Into<String>>(label: L, target: StateName) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }

    /// The label of the edge.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The name of the state this edge points to.
    pub fn target(&self) -> &StateName {
        &self.target
    }

    pub(crate) fn retarget(&mut self, target: StateName) {
        self.target = target;
    }
}

impl Show for Edge {
    fn show(&self) -> String {
        format!("{}=>{}", self.label, self.target)
    }
}

/// A state of an [`crate::Automaton`]. Two states are considered equal whenever their names
/// are equal, regardless of finality and outgoing edges.
#[derive(Debug, Clone)]
pub struct State {
    name: StateName,
    is_final: bool,
    edges: Vec<Edge>,
}

impl State {
    /// Creates a state without outgoing edges.
    pub fn new(name: StateName, is_final: bool) -> Self {
        Self {
            name,
            is_final,
            edges: Vec::new(),
        }
    }

    /// The name of the state.
    pub fn name(&self) -> &StateName {
        &self.name
    }

    /// Whether the state is accepting.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// The outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the first outgoing edge with the given label. In a deterministic automaton
    /// this is the only one.
    pub fn edge(&self, label: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.label == label)
    }

    pub(crate) fn mark_final(&mut self) {
        self.is_final = true;
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub(crate) fn rename(&mut self, name: StateName) {
        self.name = name;
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl Show for State {
    fn show(&self) -> String {
        let mut out = format!("State: {}", self.name);
        if self.is_final {
            out.push_str(" [FINAL]");
        }
        if !self.edges.is_empty() {
            out.push_str("\nEdges: ");
            out.push_str(&Edge::show_collection(self.edges.iter()));
        }
        out
    }
}
