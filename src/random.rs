use tracing::debug;

use crate::{automaton::Automaton, rename::sequential_name};

/// Generates a random automaton with `states` states named `q0`, `q1`, ... over the symbols
/// `a`, `b`, ... (at most 26). `q0` is the initial state and the epsilon label is `0`.
///
/// Each state receives `edges_per_state` edges. An edge is an epsilon edge with probability
/// `epsilon_probability`, otherwise it carries a uniformly drawn symbol. Targets are drawn
/// uniformly, so the result is usually nondeterministic and may contain unreachable states.
/// Each state is final with probability `final_probability`.
pub fn random_nfa(
    rng: &mut fastrand::Rng,
    states: usize,
    symbols: usize,
    edges_per_state: usize,
    epsilon_probability: f64,
    final_probability: f64,
) -> Automaton {
    let alphabet = symbol_names(symbols);
    let mut aut = Automaton::new("q0", "0");
    if states == 0 {
        return aut;
    }

    for q in 0..states {
        let source = format!("q{q}");
        for _ in 0..edges_per_state {
            let target = format!("q{}", rng.usize(..states));
            let label = if alphabet.is_empty() || rng.f64() < epsilon_probability {
                "0"
            } else {
                alphabet[rng.usize(..alphabet.len())].as_str()
            };
            aut.add_edge(&source, &target, label);
        }
        if rng.f64() < final_probability {
            aut.add_final(&source);
        }
    }

    debug!(
        "generated random automaton with {} states and {} symbols",
        aut.size(),
        aut.alphabet().len()
    );
    aut
}

/// Draws a word of length at most `max_len` over `alphabet`.
pub fn random_word(rng: &mut fastrand::Rng, alphabet: &[String], max_len: usize) -> Vec<String> {
    if alphabet.is_empty() {
        return Vec::new();
    }
    let len = rng.usize(..=max_len);
    (0..len)
        .map(|_| alphabet[rng.usize(..alphabet.len())].clone())
        .collect()
}

fn symbol_names(symbols: usize) -> Vec<String> {
    (0..symbols.min(26))
        .map(|i| sequential_name(i).to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    const SEEDS: std::ops::Range<u64> = 0..40;

    fn sample(seed: u64) -> (fastrand::Rng, Automaton) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let states = rng.usize(1..8);
        let aut = random_nfa(&mut rng, states, 2, 3, 0.3, 0.3);
        (rng, aut)
    }

    #[test_log::test]
    fn determinization_invariants() {
        for seed in SEEDS {
            let (_, aut) = sample(seed);
            for prune in [true, false] {
                let det = aut.determinize(prune);
                assert!(det.is_deterministic(), "seed {seed}");
                assert!(det.check_edges().is_ok(), "seed {seed}");
                assert!(
                    det.states()
                        .iter()
                        .flat_map(|q| q.edges())
                        .all(|e| e.label() != aut.epsilon()),
                    "seed {seed}"
                );
            }
        }
    }

    #[test_log::test]
    fn pipeline_preserves_language() {
        for seed in SEEDS {
            let (mut rng, aut) = sample(seed);
            let det = aut.determinize(true);
            let (renamed, _) = det.rename(&mut ());
            let min = renamed.minimize(&mut ()).unwrap();
            let unpruned = aut.determinize(false).minimize(&mut ()).unwrap();

            assert!(min.size() <= renamed.size(), "seed {seed}");
            assert_eq!(
                min.minimize(&mut ()).unwrap().size(),
                min.size(),
                "seed {seed}"
            );

            let alphabet: Vec<String> = aut.alphabet().iter().cloned().collect();
            for _ in 0..30 {
                let word = random_word(&mut rng, &alphabet, 6);
                let expected = aut.accepts(&word);
                assert_eq!(det.accepts(&word), expected, "seed {seed} word {word:?}");
                assert_eq!(min.accepts(&word), expected, "seed {seed} word {word:?}");
                assert_eq!(unpruned.accepts(&word), expected, "seed {seed} word {word:?}");
            }
        }
    }

    #[test]
    fn generator_respects_parameters() {
        let mut rng = fastrand::Rng::with_seed(7);
        let aut = random_nfa(&mut rng, 5, 3, 2, 0.0, 1.0);
        assert_eq!(aut.size(), 5);
        assert!(aut.states().iter().all(|q| q.is_final() && q.edges().len() == 2));
        assert!(aut.alphabet().len() <= 3);
        assert!(aut.is_epsilon("0"));

        assert_eq!(random_nfa(&mut rng, 0, 2, 2, 0.5, 0.5).size(), 0);
    }
}
