use thiserror::Error;

use crate::{automaton::StateName, parse::ParseError};

/// Errors that abort one of the transformations. No partially built automaton is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("automaton has not been determinized, refusing to minimize")]
    NotDeterminized,
    #[error("state `{state}` has more than one outgoing edge labeled `{label}`")]
    Nondeterministic { state: StateName, label: String },
    #[error("state `{state}` has an outgoing epsilon edge")]
    EpsilonEdge { state: StateName },
    #[error("edge from `{origin}` points to `{target}` which is not a state of the automaton")]
    DanglingEdge { origin: StateName, target: StateName },
    #[error("could not parse automaton: {0}")]
    Parse(#[from] ParseError),
    #[error("could not read automaton: {0}")]
    Io(#[from] std::io::Error),
}
