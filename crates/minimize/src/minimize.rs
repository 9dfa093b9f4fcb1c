#![forbid(unsafe_code)]

use log::info;
use refa_automata::Dfa;
use refa_automata::FiniteAutomaton;
use refa_utilities::Timing;

use crate::moore_refinement;
use crate::quotient_dfa;

/// Returns the minimal DFA that accepts the same language as the given DFA.
///
/// The result never has more states than the input, and a DFA without
/// states minimizes to a DFA without states.
pub fn minimize(dfa: &Dfa, timing: &mut Timing) -> Dfa {
    let mut time = timing.start("refinement");
    let partition = moore_refinement(dfa);
    time.finish();

    let mut time = timing.start("quotient");
    let minimal = quotient_dfa(dfa, &partition);
    time.finish();

    info!(
        "Minimized DFA from {} to {} states",
        dfa.num_of_states(),
        minimal.num_of_states()
    );
    minimal
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use refa_automata::Acceptor;
    use refa_automata::DfaBuilder;
    use refa_automata::is_isomorphic;
    use refa_automata::random_nfa;
    use refa_automata::subset_construction;
    use refa_utilities::random_test;
    use test_log::test;

    #[test]
    fn test_minimize_collapses_equivalent_states() {
        // Accepts (a|b)*b where both accepting states are equivalent.
        let mut builder = DfaBuilder::new(vec!['a', 'b']);
        let s0 = builder.add_state(false);
        let s1 = builder.add_state(true);
        let s2 = builder.add_state(true);
        builder.add_transition(s0, 'a', s0);
        builder.add_transition(s0, 'b', s1);
        builder.add_transition(s1, 'a', s0);
        builder.add_transition(s1, 'b', s2);
        builder.add_transition(s2, 'a', s0);
        builder.add_transition(s2, 'b', s2);
        let dfa = builder.finish(Some(s0));

        let minimal = minimize(&dfa, &mut Timing::new());

        assert_eq!(minimal.num_of_states(), 2);
        assert_eq!(minimal.alphabet(), dfa.alphabet());
        assert_eq!(minimal.accepts("abab"), Ok(true));
        assert_eq!(minimal.accepts("aba"), Ok(false));
    }

    #[test]
    fn test_minimize_empty() {
        let dfa = DfaBuilder::new(Vec::new()).finish(None);

        let minimal = minimize(&dfa, &mut Timing::new());

        assert_eq!(minimal.num_of_states(), 0);
        assert_eq!(minimal.initial_state_index(), None);
    }

    #[test]
    fn test_minimize_records_timing() {
        let dfa = DfaBuilder::new(Vec::new()).finish(None);
        let mut timing = Timing::new();

        minimize(&dfa, &mut timing);

        let names: Vec<String> = timing.results().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["refinement", "quotient"]);
    }

    #[test]
    fn test_random_minimize() {
        random_test(100, |rng| {
            let dfa = subset_construction(&random_nfa(rng, 8, 2, 3)).unwrap();
            let minimal = minimize(&dfa, &mut Timing::new());

            assert!(minimal.num_of_states() <= dfa.num_of_states());

            // Minimizing again gives the same automaton up to renaming.
            let again = minimize(&minimal, &mut Timing::new());
            assert_eq!(again.num_of_states(), minimal.num_of_states());
            assert!(is_isomorphic(&minimal, &again));

            for _ in 0..20 {
                let length = rng.random_range(0..8);
                let word: String = (0..length)
                    .map(|_| char::from(b'a' + rng.random_range(0..3u8)))
                    .collect();

                assert_eq!(dfa.accepts(&word), minimal.accepts(&word), "Languages differ on {word:?}");
            }
        });
    }
}
