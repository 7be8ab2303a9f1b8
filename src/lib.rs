//! Library for turning finite automata with epsilon transitions into minimal deterministic
//! automata.
//!
//! An [`Automaton`] is a collection of states, each identified by a [`StateName`], which is a
//! set of original state identifiers. States declared by the user have singleton names,
//! composite names arise when determinization merges states. Edges are owned by their source
//! state and refer to their target by name, so an automaton never contains ownership cycles.
//!
//! The transformations form a pipeline, each stage builds a fresh automaton and leaves its
//! input untouched:
//! - [`Automaton::determinize`] eliminates epsilon edges and applies the subset construction,
//! - [`Automaton::rename`] replaces (possibly composite) names by short ones (`A`, `B`, ...),
//! - [`Automaton::minimize`] computes the minimal equivalent automaton by partition refinement.
//!
//! ```
//! use dfamin::prelude::*;
//!
//! let nfa = Automaton::parse("S S0 0\nS0 A a\nA").unwrap();
//! let dfa = nfa.determinize(true);
//! assert_eq!(dfa.initial(), &StateName::from_ids(["S", "S0"]).unwrap());
//!
//! let (dfa, _) = dfa.rename(&mut ());
//! let min = dfa.minimize(&mut ()).unwrap();
//! assert!(min.accepts(["a"]));
//! assert!(!min.accepts(["a", "a"]));
//! ```
//!
//! Progress messages of the renamer and the minimizer are handed to a [`Sink`], pass `&mut ()`
//! to discard them. Independently of that, all stages emit `tracing` events.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfamin::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Automaton, Edge, State, StateName, Visited},
        math::{Bijection, Map, Partition, Set},
        parse::{Options, ParseError},
        show::Show,
        sink::{Sink, TracingSink, WriteSink},
        Error,
    };
}

/// Collection types and the [`math::Partition`] used during minimization.
pub mod math;

mod show;
pub use show::Show;

/// Defines automata, their states and edges.
pub mod automaton;
pub use automaton::{Automaton, StateName};

/// Epsilon elimination and subset construction.
pub mod determinize;

/// Moore style partition refinement.
pub mod minimize;

/// Sequential renaming of states.
pub mod rename;

pub mod parse;

/// Receivers for diagnostic messages.
pub mod sink;
pub use sink::Sink;

mod error;
pub use error::Error;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;
