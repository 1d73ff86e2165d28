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

use log::trace;

use crate::automaton::{fmt_state_set, Automaton};
use crate::error::{BuildError, BuildResult, ValidationResult};
use crate::nfa::Nfa;
use crate::transition::NondeterministicTable;

/// The type `Enfa` represents a NonDeterministic Finite Automaton with epsilon
/// moves. The epsilon moves are the `None` entries of the transition table.
///
/// The current set is always closed under epsilon moves: the closure is
/// applied on reset and once after every consuming step.
///
/// # Examples
///
/// ```
/// use automata::{Automaton, Enfa};
///
/// // a?b
/// let mut enfa = Enfa::with_start(0);
/// enfa.add_transition(0, 'a', 1)
///     .add_e_transition(0, 1)
///     .add_transition(1, 'b', 2)
///     .add_accept_state(2);
///
/// assert!(enfa.test("ab".chars()));
/// assert!(enfa.test("b".chars()));
/// assert!(!enfa.test("a".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct Enfa<S, Y>
where
    S: Eq + Hash + Clone,
{
    nfa: Nfa<S, Y>,
}

impl<S, Y> Enfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates an ENFA from its start state, its transitions and its accept
    /// states. The automaton is reset.
    pub fn new<F>(start: S, transitions: NondeterministicTable<S, Y>, finals: F) -> Self
    where
        F: IntoIterator<Item = S>,
    {
        let mut enfa = Enfa {
            nfa: Nfa::new(start, transitions, finals),
        };
        enfa.reset();
        enfa
    }

    /// Creates an ENFA with no transition and no accept state.
    pub fn with_start(start: S) -> Self {
        Self::new(start, NondeterministicTable::new(), HashSet::new())
    }

    /// The starting state of the automaton.
    pub fn start_state(&self) -> &S {
        self.nfa.start_state()
    }

    /// The set of states the automaton is currently in.
    pub fn current_states(&self) -> &HashSet<S> {
        self.nfa.current_states()
    }

    /// The accepting states of the automaton.
    pub fn accept_states(&self) -> &HashSet<S> {
        self.nfa.accept_states()
    }

    /// The transition table, epsilon moves included.
    pub fn transitions(&self) -> &NondeterministicTable<S, Y> {
        self.nfa.transitions()
    }

    /// Mutable access to the transition table. The current states are kept
    /// as they are, even if new epsilon moves leave from them.
    pub fn transitions_mut(&mut self) -> &mut NondeterministicTable<S, Y> {
        self.nfa.transitions_mut()
    }

    /// Adds `target` to the targets of `(state, symbol)`.
    pub fn add_transition(&mut self, state: S, symbol: Y, target: S) -> &mut Self {
        self.nfa.add_transition(state, symbol, target);
        self
    }

    /// Adds every state of `targets` to the targets of `(state, symbol)`.
    pub fn add_transitions<I>(&mut self, state: S, symbol: Y, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
    {
        self.nfa.add_transitions(state, symbol, targets);
        self
    }

    /// Adds `state --symbol--> target` for every symbol of `symbols`.
    pub fn add_multisymbol_transition<I>(&mut self, state: S, symbols: I, target: S) -> &mut Self
    where
        I: IntoIterator<Item = Y>,
    {
        self.nfa.add_multisymbol_transition(state, symbols, target);
        self
    }

    /// Adds the epsilon move `state --> target`.
    pub fn add_e_transition(&mut self, state: S, target: S) -> &mut Self {
        self.nfa.transitions_mut().insert_epsilon(state, target);
        self
    }

    /// Marks `state` as accepting.
    pub fn add_accept_state(&mut self, state: S) -> &mut Self {
        self.nfa.add_accept_state(state);
        self
    }

    /// Replaces the starting state. The current set is reset to the closure
    /// of the new start.
    pub fn set_start_state(&mut self, start: S) -> &mut Self {
        self.nfa.set_start_state(start);
        self.reset()
    }

    /// Replaces the accepting states. The automaton is reset.
    pub fn set_accept_states<F>(&mut self, finals: F) -> &mut Self
    where
        F: IntoIterator<Item = S>,
    {
        self.nfa.set_accept_states(finals);
        self.reset()
    }

    /// The union, over every state of `states`, of its targets for `symbol`.
    /// No epsilon move is followed.
    pub fn transition_set(&self, states: &HashSet<S>, symbol: Option<&Y>) -> HashSet<S> {
        self.nfa.transition_set(states, symbol)
    }

    /// The smallest set containing `states` and closed under epsilon moves.
    ///
    /// Each state is expanded once, so cycles of epsilon moves terminate.
    ///
    /// ```
    /// use automata::Enfa;
    /// use std::collections::HashSet;
    ///
    /// let mut enfa = Enfa::<u8, char>::with_start(1);
    /// enfa.add_e_transition(1, 2).add_e_transition(2, 1);
    ///
    /// let closure: HashSet<u8> = enfa.epsilon_closure(vec![2]);
    /// assert_eq!(closure, HashSet::from([1, 2]));
    /// ```
    pub fn epsilon_closure<I>(&self, states: I) -> HashSet<S>
    where
        I: IntoIterator<Item = S>,
    {
        let mut closure: HashSet<S> = states.into_iter().collect();
        let mut pending: Vec<S> = closure.iter().cloned().collect();
        while let Some(state) = pending.pop() {
            if let Some(targets) = self.nfa.transitions().get(&state, None) {
                for target in targets {
                    if closure.insert(target.clone()) {
                        pending.push(target.clone());
                    }
                }
            }
        }
        trace!("epsilon closure of {} states", closure.len());
        closure
    }

    /// Checks that the start state and the accept states are used by the
    /// transitions.
    pub fn validate(&self) -> ValidationResult<S>
    where
        S: fmt::Debug,
    {
        self.nfa.validate()
    }
}

impl<S, Y> Automaton for Enfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    type State = S;
    type Symbol = Y;

    fn reset(&mut self) -> &mut Self {
        let start = self.epsilon_closure(Some(self.nfa.start_state().clone()));
        self.nfa.set_current(start);
        trace!("enfa reset");
        self
    }

    fn read(&mut self, symbol: Y) -> &mut Self {
        let next = self.transition_set(self.nfa.current_states(), Some(&symbol));
        let next = self.epsilon_closure(next);
        self.nfa.set_current(next);
        self
    }

    fn accepting(&self) -> bool {
        self.nfa.accepting()
    }

    fn dead(&self) -> bool {
        self.nfa.dead()
    }

    fn alphabet(&self) -> HashSet<Y> {
        self.nfa.alphabet()
    }

    fn states(&self) -> HashSet<S> {
        self.nfa.states()
    }
}

impl<S, Y> fmt::Display for Enfa<S, Y>
where
    S: Eq + Hash + Clone + fmt::Display,
    Y: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_state_set(f, self.current_states(), self.accepting())
    }
}

/// The `EnfaBuilder` follows the builder pattern and allows to create a NonDeterministic
/// Finite Automaton with epsilon moves. The builder is moved at each call so it is
/// necessary to bind to a new variable the return value for each function of the builder.
///
/// # Errors
///
/// Return an error if the starting state is not specified.
///
/// # Examples
///
/// ```
/// use automata::e_nfa::{EnfaBuilder, EnfaBuilding};
/// use automata::Automaton;
///
/// // (ab)*c?
/// let mut enfa = EnfaBuilder::new()
///     .add_start(0)
///     .add_final(3)
///     .add_transition(0, 'a', 1)
///     .add_transition(1, 'b', 0)
///     .add_e_transition(0, 2)
///     .add_transition(2, 'c', 3)
///     .add_e_transition(2, 3)
///     .finalize()
///     .unwrap();
/// assert!(enfa.test("ababc".chars()));
/// assert!(enfa.test("".chars()));
/// assert!(!enfa.test("abca".chars()));
/// ```
#[derive(Debug)]
pub struct EnfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
{
    transitions: NondeterministicTable<S, Y>,
    start: Option<S>,
    finals: HashSet<S>,
}

/// Alias for BuildResult<T,S,Y>.
pub type Result<T, S, Y> = BuildResult<T, S, Y>;

/// EnfaBuilding is the trait associated to the EnfaBuilder type.
///
/// # Errors
///
/// If self contains a BuildError then each function should transfer this error.
pub trait EnfaBuilding<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    /// Set the starting state of the ENFA. A second call replaces the first one.
    fn add_start(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y>;

    /// Add a final state to the ENFA.
    fn add_final(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y>;

    /// Add a transition to the ENFA.
    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y>;

    /// Add the same transition for each symbol of `symbs`.
    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>;

    /// Add an epsilon transition to the ENFA.
    fn add_e_transition(self, src: S, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y>;

    /// Finalize the building of the ENFA.
    ///
    /// # Errors
    ///
    /// Return a BuildError::MissingStartingState if no starting state is specified.
    fn finalize(self) -> Result<Enfa<S, Y>, S, Y>;
}

impl<S, Y> EnfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates a new EnfaBuilder.
    pub fn new() -> Result<EnfaBuilder<S, Y>, S, Y>
    where
        S: fmt::Debug,
        Y: fmt::Debug,
    {
        Ok(EnfaBuilder {
            transitions: NondeterministicTable::new(),
            start: None,
            finals: HashSet::new(),
        })
    }
}

impl<S, Y> EnfaBuilding<S, Y> for EnfaBuilder<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        Ok(self).add_start(state)
    }

    fn add_final(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        Ok(self).add_final(state)
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        Ok(self).add_transition(src, symb, dest)
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        Ok(self).add_multisymbol_transition(src, symbs, dest)
    }

    fn add_e_transition(self, src: S, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        Ok(self).add_e_transition(src, dest)
    }

    fn finalize(self) -> Result<Enfa<S, Y>, S, Y> {
        Ok(self).finalize()
    }
}

/// Implementing EnfaBuilding trait for Result<EnfaBuilder> allows
/// to chain the return value of the EnfaBuilder instead of unwrapping them
/// at each stage of the building process.
impl<S, Y> EnfaBuilding<S, Y> for Result<EnfaBuilder<S, Y>, S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        self.map(|mut enfa| {
            enfa.start = Some(state);
            enfa
        })
    }

    fn add_final(self, state: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        self.map(|mut enfa| {
            enfa.finals.insert(state);
            enfa
        })
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        self.map(|mut enfa| {
            enfa.transitions.insert(src, symb, dest);
            enfa
        })
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        self.map(|mut enfa| {
            enfa.transitions.insert_many(src, symbs, dest);
            enfa
        })
    }

    fn add_e_transition(self, src: S, dest: S) -> Result<EnfaBuilder<S, Y>, S, Y> {
        self.map(|mut enfa| {
            enfa.transitions.insert_epsilon(src, dest);
            enfa
        })
    }

    fn finalize(self) -> Result<Enfa<S, Y>, S, Y> {
        self.and_then(|enfa| match enfa.start {
            Some(start) => Ok(Enfa::new(start, enfa.transitions, enfa.finals)),
            None => Err(BuildError::MissingStartingState),
        })
    }
}
