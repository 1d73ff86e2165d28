//! The sample automata: a DFA tracking the parity of zeros and ones, an NFA
//! spotting the tokens "web" and "ebay", and an epsilon-NFA with chained
//! epsilon moves.

use std::collections::HashSet;

use automata::transition::{DeterministicTable, NondeterministicTable};
use automata::{Automaton, Dfa, Enfa, Nfa};

fn set(states: &[u32]) -> HashSet<u32> {
    states.iter().cloned().collect()
}

fn parity_dfa() -> Dfa<&'static str, char> {
    let transitions: DeterministicTable<&'static str, char> = vec![
        //            0                      1
        (("q0", Some('0')), "q2"), (("q0", Some('1')), "q1"),
        (("q1", Some('0')), "q3"), (("q1", Some('1')), "q0"),
        (("q2", Some('0')), "q0"), (("q2", Some('1')), "q3"),
        (("q3", Some('0')), "q1"), (("q3", Some('1')), "q2"),
    ]
    .into_iter()
    .collect();
    Dfa::new("q0", transitions, vec!["q0"])
}

fn token_nfa() -> Nfa<u32, char> {
    let transitions: NondeterministicTable<u32, char> = vec![
        ((1, Some('w')), set(&[1, 2])),
        ((1, Some('e')), set(&[1, 5])),
        ((1, Some('b')), set(&[1])),
        ((1, Some('a')), set(&[1])),
        ((1, Some('y')), set(&[1])),
        ((2, Some('e')), set(&[3])),
        ((3, Some('b')), set(&[4])),
        ((5, Some('b')), set(&[6])),
        ((6, Some('a')), set(&[7])),
        ((7, Some('y')), set(&[8])),
    ]
    .into_iter()
    .collect();
    Nfa::new(1, transitions, vec![4, 8])
}

fn epsilon_nfa() -> Enfa<u32, char> {
    let transitions: NondeterministicTable<u32, char> = vec![
        ((1, None), set(&[2, 4])),
        ((2, None), set(&[3])),
        ((3, None), set(&[6])),
        ((4, Some('a')), set(&[5])),
        ((5, Some('b')), set(&[6])),
        ((5, None), set(&[7])),
    ]
    .into_iter()
    .collect();
    Enfa::new(1, transitions, Vec::new())
}

#[test]
fn parity_dfa_reads_words() {
    let mut dfa = parity_dfa();

    dfa.reset().read_seq("11".chars());
    assert_eq!(dfa.current_state(), Some(&"q0"));
    assert!(dfa.accepting());

    dfa.reset().read('1');
    assert_eq!(dfa.current_state(), Some(&"q1"));
    assert!(!dfa.accepting());
    assert_eq!(dfa.to_string(), "(q1)");

    dfa.read('0');
    assert_eq!(dfa.current_state(), Some(&"q3"));
    assert!(!dfa.accepting());
}

#[test]
fn parity_dfa_is_deterministic() {
    let mut dfa = parity_dfa();
    let input = "0110100111";
    let first = dfa.reset().read_seq(input.chars()).current_state().cloned();
    for _ in 0..5 {
        let again = dfa.reset().read_seq(input.chars()).current_state().cloned();
        assert_eq!(first, again);
    }
}

#[test]
fn parity_dfa_dies_outside_alphabet() {
    let mut dfa = parity_dfa();
    dfa.reset().read('2');
    assert!(dfa.dead());
    dfa.read_seq("0101".chars());
    assert!(dfa.dead());
    assert_eq!(dfa.to_string(), "(dead)");
}

#[test]
fn parity_dfa_inspection() {
    let dfa = parity_dfa();
    let alphabet: HashSet<char> = "01".chars().collect();
    let states: HashSet<&str> = vec!["q0", "q1", "q2", "q3"].into_iter().collect();
    assert_eq!(dfa.alphabet(), alphabet);
    assert_eq!(dfa.states(), states);
}

#[test]
fn token_nfa_spots_web() {
    let mut nfa = token_nfa();
    nfa.reset().read_seq("web".chars());
    assert!(nfa.current_states().contains(&4));
    assert!(nfa.accepting());
}

#[test]
fn token_nfa_spots_ebay() {
    let mut nfa = token_nfa();
    nfa.reset().read_seq("eba".chars());
    assert_eq!(nfa.current_states(), &set(&[1, 7]));
    assert!(!nfa.accepting());
    nfa.read('y');
    assert!(nfa.current_states().contains(&8));
    assert!(nfa.accepting());
}

#[test]
fn token_nfa_dies_on_weary() {
    let mut nfa = token_nfa();
    nfa.reset().read_seq("wea".chars());
    assert_eq!(nfa.current_states(), &set(&[1]));
    nfa.read_seq("ry".chars());
    assert!(nfa.dead());
}

#[test]
fn token_nfa_dies_outside_alphabet() {
    let mut nfa = token_nfa();
    nfa.reset().read('x');
    assert!(nfa.current_states().is_empty());
    assert!(nfa.dead());
    assert!(!nfa.accepting());
    assert_eq!(nfa.to_string(), "({dead})");
}

#[test]
fn token_nfa_inspection() {
    let nfa = token_nfa();
    let alphabet: HashSet<char> = "weeaby".chars().collect();
    assert_eq!(nfa.alphabet(), alphabet);
    assert_eq!(nfa.states(), set(&[1, 2, 3, 4, 5, 6, 7, 8]));
}

#[test]
fn epsilon_nfa_reset_is_closed() {
    let mut enfa = epsilon_nfa();
    enfa.reset();
    assert_eq!(enfa.current_states(), &set(&[1, 2, 3, 4, 6]));
    assert!(!enfa.accepting());
}

#[test]
fn epsilon_nfa_reads_a() {
    let mut enfa = epsilon_nfa();
    let before = enfa.current_states().clone();
    assert_eq!(enfa.transition_set(&before, Some(&'a')), set(&[5]));

    enfa.read('a');
    assert_eq!(enfa.current_states(), &set(&[5, 7]));

    enfa.read('b');
    assert_eq!(enfa.current_states(), &set(&[6]));
    enfa.read('b');
    assert!(enfa.dead());
}

#[test]
fn epsilon_nfa_alphabet_has_no_epsilon() {
    let enfa = epsilon_nfa();
    let alphabet: HashSet<char> = "ab".chars().collect();
    assert_eq!(enfa.alphabet(), alphabet);
    assert_eq!(enfa.states(), set(&[1, 2, 3, 4, 5, 6, 7]));
}

#[test]
fn engines_share_one_interface() {
    fn run<A: Automaton<Symbol = char>>(automaton: &mut A, input: &str) -> (bool, bool) {
        automaton.reset().read_seq(input.chars());
        (automaton.accepting(), automaton.dead())
    }

    assert_eq!(run(&mut parity_dfa(), "11"), (true, false));
    assert_eq!(run(&mut token_nfa(), "web"), (true, false));
    assert_eq!(run(&mut epsilon_nfa(), "a"), (false, false));
    assert_eq!(run(&mut epsilon_nfa(), "aa"), (false, true));
}
