// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use log::{debug, trace};

use crate::automaton::{fmt_state_set, validate_states, Automaton};
use crate::error::{BuildError, BuildResult, ValidationResult};
use crate::transition::NondeterministicTable;

/// The type `Nfa` represents a NonDeterministic Finite Automaton. The transitions
/// of the automaton are stored in a hashtable.
///
/// The current configuration is a set of states. Once it is empty no symbol can
/// make it grow again, which is the NFA analogue of a dead DFA.
///
/// Epsilon moves stored in the table are ignored by this engine, see `Enfa`.
///
/// # Examples
///
/// ```
/// use automata::{Automaton, Nfa};
///
/// // words ending with "ab"
/// let mut nfa = Nfa::with_start(0);
/// nfa.add_multisymbol_transition(0, "ab".chars(), 0)
///     .add_transition(0, 'a', 1)
///     .add_transition(1, 'b', 2)
///     .add_accept_state(2);
///
/// assert!(nfa.test("abab".chars()));
/// assert!(!nfa.test("aba".chars()));
/// assert_eq!(nfa.current_states().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Nfa<S, Y>
where
    S: Eq + Hash + Clone,
{
    transitions: NondeterministicTable<S, Y>,
    start: S,
    finals: HashSet<S>,
    current: HashSet<S>,
}

impl<S, Y> Nfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates a NFA from its start state, its transitions and its accept
    /// states. The automaton is reset.
    pub fn new<F>(start: S, transitions: NondeterministicTable<S, Y>, finals: F) -> Self
    where
        F: IntoIterator<Item = S>,
    {
        let mut nfa = Nfa {
            transitions,
            start,
            finals: finals.into_iter().collect(),
            current: HashSet::new(),
        };
        nfa.reset();
        nfa
    }

    /// Creates a NFA with no transition and no accept state.
    pub fn with_start(start: S) -> Self {
        Self::new(start, NondeterministicTable::new(), HashSet::new())
    }

    /// The starting state of the automaton.
    pub fn start_state(&self) -> &S {
        &self.start
    }

    /// The set of states the automaton is currently in.
    pub fn current_states(&self) -> &HashSet<S> {
        &self.current
    }

    /// The accepting states of the automaton.
    pub fn accept_states(&self) -> &HashSet<S> {
        &self.finals
    }

    /// The transition table.
    pub fn transitions(&self) -> &NondeterministicTable<S, Y> {
        &self.transitions
    }

    /// Mutable access to the transition table. The current states are kept.
    pub fn transitions_mut(&mut self) -> &mut NondeterministicTable<S, Y> {
        &mut self.transitions
    }

    /// Adds `target` to the targets of `(state, symbol)`.
    pub fn add_transition(&mut self, state: S, symbol: Y, target: S) -> &mut Self {
        self.transitions.insert(state, symbol, target);
        self
    }

    /// Adds every state of `targets` to the targets of `(state, symbol)`.
    pub fn add_transitions<I>(&mut self, state: S, symbol: Y, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
    {
        self.transitions.insert_all(state, Some(symbol), targets);
        self
    }

    /// Adds `state --symbol--> target` for every symbol of `symbols`.
    pub fn add_multisymbol_transition<I>(&mut self, state: S, symbols: I, target: S) -> &mut Self
    where
        I: IntoIterator<Item = Y>,
    {
        self.transitions.insert_many(state, symbols, target);
        self
    }

    /// Marks `state` as accepting.
    pub fn add_accept_state(&mut self, state: S) -> &mut Self {
        self.finals.insert(state);
        self
    }

    /// The union, over every state of `states`, of its targets for `symbol`.
    /// A `None` symbol follows a single epsilon step.
    pub fn transition_set(&self, states: &HashSet<S>, symbol: Option<&Y>) -> HashSet<S> {
        states.iter().fold(HashSet::new(), |mut next, state| {
            if let Some(targets) = self.transitions.get(state, symbol) {
                next.extend(targets.iter().cloned());
            }
            next
        })
    }

    /// Replaces the starting state. The automaton is reset.
    pub fn set_start_state(&mut self, start: S) -> &mut Self {
        self.start = start;
        self.reset()
    }

    /// Replaces the accepting states. The automaton is reset.
    pub fn set_accept_states<F>(&mut self, finals: F) -> &mut Self
    where
        F: IntoIterator<Item = S>,
    {
        self.finals = finals.into_iter().collect();
        self.reset()
    }

    /// Checks that the start state and the accept states are used by the
    /// transitions.
    pub fn validate(&self) -> ValidationResult<S>
    where
        S: fmt::Debug,
    {
        validate_states(&self.transitions.states(), &self.start, &self.finals)
    }

    pub(crate) fn set_current(&mut self, states: HashSet<S>) {
        if states.is_empty() && !self.current.is_empty() {
            debug!("current set is now empty, automaton is dead");
        }
        self.current = states;
    }
}

impl<S, Y> Automaton for Nfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    type State = S;
    type Symbol = Y;

    fn reset(&mut self) -> &mut Self {
        let mut start = HashSet::with_capacity(1);
        start.insert(self.start.clone());
        self.current = start;
        trace!("nfa reset");
        self
    }

    fn read(&mut self, symbol: Y) -> &mut Self {
        let next = self.transition_set(&self.current, Some(&symbol));
        trace!("nfa read, {} current states", next.len());
        self.set_current(next);
        self
    }

    fn accepting(&self) -> bool {
        self.current.iter().any(|state| self.finals.contains(state))
    }

    fn dead(&self) -> bool {
        self.current.is_empty()
    }

    fn alphabet(&self) -> HashSet<Y> {
        self.transitions.alphabet()
    }

    fn states(&self) -> HashSet<S> {
        let mut states = self.transitions.states();
        states.insert(self.start.clone());
        states.extend(self.finals.iter().cloned());
        states
    }
}

impl<S, Y> fmt::Display for Nfa<S, Y>
where
    S: Eq + Hash + Clone + fmt::Display,
    Y: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_state_set(f, &self.current, self.accepting())
    }
}

/// The `NfaBuilder` follows the builder pattern and allows to create a NonDeterministic
/// Finite Automaton. The builder is moved at each call so it is necessary to bind
/// to a new variable the return value for each function of the builder.
///
/// # Errors
///
/// Return an error if the starting state is not specified.
///
/// # Examples
///
/// ```
/// use automata::nfa::{NfaBuilder, NfaBuilding};
/// use automata::Automaton;
///
/// // (abc)*
/// let mut nfa = NfaBuilder::new()
///     .add_start(0)
///     .add_final(3)
///     .add_final(0)
///     .add_transition(0, 'a', 1)
///     .add_transition(1, 'b', 2)
///     .add_transition(2, 'c', 3)
///     .add_transition(3, 'a', 1)
///     .finalize()
///     .unwrap();
/// assert!(nfa.test("abcabc".chars()));
/// assert!(!nfa.test("abca".chars()));
/// ```
#[derive(Debug)]
pub struct NfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
{
    transitions: NondeterministicTable<S, Y>,
    start: Option<S>,
    finals: HashSet<S>,
}

/// Alias for BuildResult<T,S,Y>.
pub type Result<T, S, Y> = BuildResult<T, S, Y>;

/// NfaBuilding is the trait associated to the NfaBuilder type.
///
/// # Errors
///
/// If self contains a BuildError then each function should transfer this error.
pub trait NfaBuilding<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    /// Set the starting state of the NFA. A second call replaces the first one.
    fn add_start(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y>;

    /// Add a final state to the NFA.
    fn add_final(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y>;

    /// Add a transition to the NFA. Transitions with the same src and symb
    /// are merged.
    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<NfaBuilder<S, Y>, S, Y>;

    /// Add the same transition for each symbol of `symbs`.
    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<NfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>;

    /// Finalize the building of the NFA.
    ///
    /// # Errors
    ///
    /// Return a BuildError::MissingStartingState if no starting state is specified.
    fn finalize(self) -> Result<Nfa<S, Y>, S, Y>;
}

impl<S, Y> NfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates a new NfaBuilder.
    pub fn new() -> Result<NfaBuilder<S, Y>, S, Y>
    where
        S: fmt::Debug,
        Y: fmt::Debug,
    {
        Ok(NfaBuilder {
            transitions: NondeterministicTable::new(),
            start: None,
            finals: HashSet::new(),
        })
    }
}

impl<S, Y> NfaBuilding<S, Y> for NfaBuilder<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        Ok(self).add_start(state)
    }

    fn add_final(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        Ok(self).add_final(state)
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        Ok(self).add_transition(src, symb, dest)
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<NfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        Ok(self).add_multisymbol_transition(src, symbs, dest)
    }

    fn finalize(self) -> Result<Nfa<S, Y>, S, Y> {
        Ok(self).finalize()
    }
}

/// Implementing NfaBuilding trait for Result<NfaBuilder> allows
/// to chain the return value of the NfaBuilder instead of unwrapping them
/// at each stage of the building process.
impl<S, Y> NfaBuilding<S, Y> for Result<NfaBuilder<S, Y>, S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        self.map(|mut nfa| {
            nfa.start = Some(state);
            nfa
        })
    }

    fn add_final(self, state: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        self.map(|mut nfa| {
            nfa.finals.insert(state);
            nfa
        })
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<NfaBuilder<S, Y>, S, Y> {
        self.map(|mut nfa| {
            nfa.transitions.insert(src, symb, dest);
            nfa
        })
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<NfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        self.map(|mut nfa| {
            nfa.transitions.insert_many(src, symbs, dest);
            nfa
        })
    }

    fn finalize(self) -> Result<Nfa<S, Y>, S, Y> {
        self.and_then(|nfa| match nfa.start {
            Some(start) => Ok(Nfa::new(start, nfa.transitions, nfa.finals)),
            None => Err(BuildError::MissingStartingState),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(states: &[usize]) -> HashSet<usize> {
        states.iter().cloned().collect()
    }

    // words over {a,b} whose third symbol from the end is an a
    fn third_from_end() -> Nfa<usize, char> {
        NfaBuilder::new()
            .add_start(0)
            .add_final(3)
            .add_multisymbol_transition(0, "ab".chars(), 0)
            .add_transition(0, 'a', 1)
            .add_multisymbol_transition(1, "ab".chars(), 2)
            .add_multisymbol_transition(2, "ab".chars(), 3)
            .finalize()
            .unwrap()
    }

    #[test]
    fn test_nfa() {
        let mut nfa = NfaBuilder::new()
            .add_start(0)
            .add_final(3)
            .add_transition(0, 'a', 1)
            .add_transition(0, 'c', 3)
            .add_transition(1, 'b', 2)
            .add_transition(2, 'a', 1)
            .add_transition(2, 'c', 3)
            .finalize()
            .unwrap();
        let samples =
            vec![("ababac", false),
                 ("ababc", true),
                 ("", false),
                 ("abc", true),
                 ("c", true),
                 ("ac", false),
                 ("ababababababababababababababababababababc", true),];

        for (input, expected_result) in samples {
            assert!(nfa.test(input.chars()) == expected_result, "input false for: \"{}\"", input);
        }
    }

    #[test]
    fn test_nfa_nondeterminism() {
        let mut nfa = third_from_end();
        let samples =
            vec![("abb", true),
                 ("bab", false),
                 ("babba", false),
                 ("bbaab", true),
                 ("ab", false),
                 ("aaaaaaa", true),];

        for (input, expected_result) in samples {
            assert!(nfa.test(input.chars()) == expected_result, "input false for: \"{}\"", input);
        }
    }

    #[test]
    fn test_nfa_current_states() {
        let mut nfa = third_from_end();
        assert_eq!(nfa.current_states(), &set(&[0]));
        nfa.read('a');
        assert_eq!(nfa.current_states(), &set(&[0, 1]));
        nfa.read('a');
        assert_eq!(nfa.current_states(), &set(&[0, 1, 2]));
        nfa.read('b');
        assert_eq!(nfa.current_states(), &set(&[0, 2, 3]));
        assert!(nfa.accepting());
    }

    #[test]
    fn test_nfa_transition_set() {
        let nfa = third_from_end();
        assert_eq!(nfa.transition_set(&set(&[0, 1]), Some(&'a')), set(&[0, 1, 2]));
        assert_eq!(nfa.transition_set(&set(&[3]), Some(&'a')), set(&[]));
        assert_eq!(nfa.transition_set(&set(&[]), Some(&'b')), set(&[]));
    }

    #[test]
    fn test_nfa_empty_set_is_dead() {
        let mut nfa = third_from_end();
        nfa.read('z');
        assert!(nfa.dead());
        assert!(!nfa.accepting());
        nfa.read_seq("aaa".chars());
        assert!(nfa.dead());
        nfa.reset();
        assert!(!nfa.dead());
    }

    #[test]
    fn test_nfa_ignores_epsilon_moves() {
        let mut table = NondeterministicTable::new();
        table.insert_epsilon(0, 1);
        table.insert(1, 'a', 2);
        let mut nfa = Nfa::new(0, table, vec![2]);
        assert_eq!(nfa.current_states(), &set(&[0]));
        assert!(!nfa.test("a".chars()));
    }

    #[test]
    fn test_nfa_states_and_alphabet() {
        let mut nfa = Nfa::with_start(0);
        nfa.add_transitions(1, 'x', vec![2, 3]).add_accept_state(7);
        assert_eq!(nfa.states(), set(&[0, 1, 2, 3, 7]));
        let alphabet: HashSet<char> = "x".chars().collect();
        assert_eq!(nfa.alphabet(), alphabet);
    }

    #[test]
    fn test_nfa_states_include_lone_start() {
        let nfa = Nfa::<usize, char>::with_start(42);
        assert_eq!(nfa.states(), set(&[42]));
        assert!(nfa.transitions().states().is_empty());
    }

    #[test]
    fn test_nfa_mutation_between_reads() {
        let mut nfa = Nfa::with_start(0);
        nfa.add_transition(0, 'a', 1);
        nfa.read('a');
        assert!(!nfa.accepting());
        nfa.add_accept_state(1);
        assert!(nfa.accepting());
        nfa.add_transition(1, 'b', 2);
        nfa.read('b');
        assert_eq!(nfa.current_states(), &set(&[2]));
    }

    #[test]
    fn test_nfa_replace_start_and_finals() {
        let mut nfa = third_from_end();
        nfa.read('z');
        assert!(nfa.dead());
        nfa.set_start_state(1);
        assert_eq!(nfa.current_states(), &set(&[1]));
        assert!(nfa.test("ab".chars()));

        nfa.set_accept_states(vec![2]);
        assert_eq!(nfa.current_states(), &set(&[1]));
        assert!(nfa.test("b".chars()));
        assert!(!nfa.test("ab".chars()));

        nfa.set_accept_states(Vec::new());
        assert!(nfa.accept_states().is_empty());
        assert!(!nfa.test("b".chars()));
    }

    #[test]
    fn test_nfa_validate() {
        assert!(third_from_end().validate().is_ok());

        let mut nfa = Nfa::with_start(5);
        nfa.add_transition(0, 'a', 1);
        assert_eq!(
            nfa.validate(),
            Err(crate::error::ValidationError::UnknownStartState(5))
        );
    }

    #[test]
    fn test_nfa_display() {
        let mut nfa = third_from_end();
        assert_eq!(nfa.to_string(), "({0})");
        nfa.read_seq("abb".chars());
        let rendered = nfa.to_string();
        assert!(rendered.starts_with("({") && rendered.ends_with("}*)"));
        for state in nfa.current_states() {
            assert!(rendered.contains(&state.to_string()));
        }
        nfa.read('z');
        assert_eq!(nfa.to_string(), "({dead})");
    }

    #[test]
    fn test_nfa_builder_missing_start() {
        let nfa: Result<Nfa<usize, char>, usize, char> = NfaBuilder::new()
            .add_final(3)
            .add_transition(0, 'a', 1)
            .finalize();
        match nfa {
            Err(BuildError::MissingStartingState) => assert!(true),
            _ => assert!(false, "MissingStartingState expected."),
        }
    }

    #[test]
    fn test_nfa_builder_merges_duplicated_transitions() {
        let nfa = NfaBuilder::new()
            .add_start(0)
            .add_transition(0, 'a', 1)
            .add_transition(0, 'a', 2)
            .add_transition(0, 'a', 1)
            .finalize()
            .unwrap();
        assert_eq!(nfa.transitions().get(&0, Some(&'a')), Some(&set(&[1, 2])));
    }
}
