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

use crate::automaton::{validate_states, Automaton};
use crate::error::{BuildError, BuildResult, ValidationResult};
use crate::transition::DeterministicTable;

/// The type `Dfa` represents a Deterministic Finite Automaton. The transitions
/// of the automaton are stored in a hashtable.
///
/// The current state is `None` once a symbol without transition has been
/// read. That dead marker has no outgoing transition, so the automaton stays
/// dead until the next `reset`.
///
/// # Examples
///
/// ```
/// use automata::{Automaton, Dfa};
///
/// // (abc)*
/// let mut dfa = Dfa::with_start(0);
/// dfa.add_transition(0, 'a', 1)
///     .add_transition(1, 'b', 2)
///     .add_transition(2, 'c', 0)
///     .add_accept_state(0);
///
/// assert!(dfa.test("abcabc".chars()));
/// assert!(!dfa.test("ab".chars()));
/// assert!(dfa.reset().read('b').dead());
/// ```
#[derive(Debug, Clone)]
pub struct Dfa<S, Y>
where
    S: Eq + Hash + Clone,
{
    transitions: DeterministicTable<S, Y>,
    start: S,
    finals: HashSet<S>,
    current: Option<S>,
}

impl<S, Y> Dfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates a DFA from its start state, its transitions and its accept
    /// states. The automaton is reset.
    pub fn new<F>(start: S, transitions: DeterministicTable<S, Y>, finals: F) -> Self
    where
        F: IntoIterator<Item = S>,
    {
        let mut dfa = Dfa {
            transitions,
            start,
            finals: finals.into_iter().collect(),
            current: None,
        };
        dfa.reset();
        dfa
    }

    /// Creates a DFA with no transition and no accept state.
    pub fn with_start(start: S) -> Self {
        Self::new(start, DeterministicTable::new(), HashSet::new())
    }

    /// The starting state of the automaton.
    pub fn start_state(&self) -> &S {
        &self.start
    }

    /// The current state of the automaton, `None` when it is dead.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// The accepting states of the automaton.
    pub fn accept_states(&self) -> &HashSet<S> {
        &self.finals
    }

    /// The transition table.
    pub fn transitions(&self) -> &DeterministicTable<S, Y> {
        &self.transitions
    }

    /// Mutable access to the transition table. The current state is kept.
    pub fn transitions_mut(&mut self) -> &mut DeterministicTable<S, Y> {
        &mut self.transitions
    }

    /// Adds (or replaces) the transition `state --symbol--> target`.
    pub fn add_transition(&mut self, state: S, symbol: Y, target: S) -> &mut Self {
        self.transitions.insert(state, symbol, target);
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
    /// transitions. Nothing else in the DFA relies on it.
    pub fn validate(&self) -> ValidationResult<S>
    where
        S: fmt::Debug,
    {
        validate_states(&self.transitions.states(), &self.start, &self.finals)
    }
}

impl<S, Y> Automaton for Dfa<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    type State = S;
    type Symbol = Y;

    fn reset(&mut self) -> &mut Self {
        self.current = Some(self.start.clone());
        trace!("dfa reset");
        self
    }

    fn read(&mut self, symbol: Y) -> &mut Self {
        let next = match self.current {
            Some(ref state) => self.transitions.get(state, Some(&symbol)).cloned(),
            None => None,
        };
        if self.current.is_some() && next.is_none() {
            debug!("dfa has no transition for the symbol read, now dead");
        }
        self.current = next;
        self
    }

    fn accepting(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |state| self.finals.contains(state))
    }

    fn dead(&self) -> bool {
        self.current.is_none()
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

impl<S, Y> fmt::Display for Dfa<S, Y>
where
    S: Eq + Hash + Clone + fmt::Display,
    Y: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.current {
            Some(ref state) => {
                write!(f, "({}{})", state, if self.accepting() { "*" } else { "" })
            }
            None => write!(f, "(dead)"),
        }
    }
}

/// The `DfaBuilder` follows the builder pattern and allows to create a Deterministic
/// Finite Automaton. The builder is moved at each call so it is necessary to bind
/// to a new variable the return value for each function of the builder.
///
/// Unlike `Dfa::new`, the builder is strict about the definition.
///
/// # Errors
///
/// Return an error if the starting state is not specified.
///
/// Return an error if a transition is defined twice.
///
/// # Examples
///
/// ```
/// use automata::dfa::{DfaBuilder, DfaBuilding};
/// use automata::error::BuildError;
/// use automata::Automaton;
///
/// // (abc)*
/// let mut dfa = DfaBuilder::new()
///     .add_start(0)
///     .add_final(0)
///     .add_transition(0, 'a', 1)
///     .add_transition(1, 'b', 2)
///     .add_transition(2, 'c', 0)
///     .finalize()
///     .unwrap();
/// assert!(dfa.test("abc".chars()));
///
/// let dfa = DfaBuilder::new()
///     .add_start(4)
///     .add_transition(0, 't', 1)
///     .add_transition(0, 't', 2)
///     .finalize();
/// match dfa {
///     Err(BuildError::DuplicatedTransition { state, symbol }) => {
///         assert_eq!((state, symbol), (0, Some('t')))
///     }
///     _ => panic!("DuplicatedTransition expected."),
/// }
/// ```
#[derive(Debug)]
pub struct DfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
{
    transitions: DeterministicTable<S, Y>,
    start: Option<S>,
    finals: HashSet<S>,
}

/// Alias for BuildResult<T,S,Y>.
pub type Result<T, S, Y> = BuildResult<T, S, Y>;

/// DfaBuilding is the trait associated to the DfaBuilder type.
///
/// # Errors
///
/// If self contains a BuildError then each function should transfer this error.
pub trait DfaBuilding<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    /// Set the starting state of the DFA. A second call replaces the first one.
    fn add_start(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y>;

    /// Add a final state to the DFA.
    fn add_final(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y>;

    /// Add a transition to the DFA.
    ///
    /// # Errors
    ///
    /// Return a BuildError::DuplicatedTransition if a transition with the same
    /// src and symb has already been inserted, even if the destination state is
    /// the same.
    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<DfaBuilder<S, Y>, S, Y>;

    /// Add the same transition for each symbol of `symbs`.
    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<DfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>;

    /// Finalize the building of the DFA.
    ///
    /// # Errors
    ///
    /// Return a BuildError::MissingStartingState if no starting state is specified.
    fn finalize(self) -> Result<Dfa<S, Y>, S, Y>;
}

impl<S, Y> DfaBuilder<S, Y>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Creates a new DfaBuilder.
    pub fn new() -> Result<DfaBuilder<S, Y>, S, Y>
    where
        S: fmt::Debug,
        Y: fmt::Debug,
    {
        Ok(DfaBuilder {
            transitions: DeterministicTable::new(),
            start: None,
            finals: HashSet::new(),
        })
    }
}

impl<S, Y> DfaBuilding<S, Y> for DfaBuilder<S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        Ok(self).add_start(state)
    }

    fn add_final(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        Ok(self).add_final(state)
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        Ok(self).add_transition(src, symb, dest)
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<DfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        Ok(self).add_multisymbol_transition(src, symbs, dest)
    }

    fn finalize(self) -> Result<Dfa<S, Y>, S, Y> {
        Ok(self).finalize()
    }
}

/// Implementing DfaBuilding trait for Result<DfaBuilder> allows
/// to chain the return value of the DfaBuilder instead of unwrapping them
/// at each stage of the building process.
impl<S, Y> DfaBuilding<S, Y> for Result<DfaBuilder<S, Y>, S, Y>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: Eq + Hash + Clone + fmt::Debug,
{
    fn add_start(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        self.map(|mut dfa| {
            dfa.start = Some(state);
            dfa
        })
    }

    fn add_final(self, state: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        self.map(|mut dfa| {
            dfa.finals.insert(state);
            dfa
        })
    }

    fn add_transition(self, src: S, symb: Y, dest: S) -> Result<DfaBuilder<S, Y>, S, Y> {
        self.and_then(|mut dfa| {
            if dfa.transitions.get(&src, Some(&symb)).is_some() {
                return Err(BuildError::DuplicatedTransition {
                    state: src,
                    symbol: Some(symb),
                });
            }
            dfa.transitions.insert(src, symb, dest);
            Ok(dfa)
        })
    }

    fn add_multisymbol_transition<I>(self, src: S, symbs: I, dest: S) -> Result<DfaBuilder<S, Y>, S, Y>
    where
        I: IntoIterator<Item = Y>,
    {
        symbs.into_iter().fold(self, |dfa, symb| {
            dfa.add_transition(src.clone(), symb, dest.clone())
        })
    }

    fn finalize(self) -> Result<Dfa<S, Y>, S, Y> {
        self.and_then(|dfa| match dfa.start {
            Some(start) => Ok(Dfa::new(start, dfa.transitions, dfa.finals)),
            None => Err(BuildError::MissingStartingState),
        })
    }
}
