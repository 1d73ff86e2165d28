// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A `Mode` fixes the shape of the targets stored in a `TransitionTable` and
/// how a new target is merged into an existing entry.
pub trait Mode<S>
where
    S: Eq + Hash + Clone,
{
    /// The value stored for each `(state, symbol)` key.
    type Target: Clone;

    /// Wraps a single destination state into a target.
    fn single(state: S) -> Self::Target;

    /// Merges `incoming` into an already stored target.
    fn absorb(target: &mut Self::Target, incoming: Self::Target);

    /// Adds every state held by `target` to `states`.
    fn collect_into(target: &Self::Target, states: &mut HashSet<S>);
}

/// Deterministic mode: each key maps to one state and an insert overwrites.
#[derive(Debug, Clone, Copy)]
pub enum Deterministic {}

/// Nondeterministic mode: each key maps to a set of states and an insert
/// appends to it.
#[derive(Debug, Clone, Copy)]
pub enum Nondeterministic {}

impl<S> Mode<S> for Deterministic
where
    S: Eq + Hash + Clone,
{
    type Target = S;

    fn single(state: S) -> S {
        state
    }

    fn absorb(target: &mut S, incoming: S) {
        *target = incoming;
    }

    fn collect_into(target: &S, states: &mut HashSet<S>) {
        states.insert(target.clone());
    }
}

impl<S> Mode<S> for Nondeterministic
where
    S: Eq + Hash + Clone,
{
    type Target = HashSet<S>;

    fn single(state: S) -> HashSet<S> {
        let mut target = HashSet::with_capacity(1);
        target.insert(state);
        target
    }

    fn absorb(target: &mut HashSet<S>, incoming: HashSet<S>) {
        target.extend(incoming);
    }

    fn collect_into(target: &HashSet<S>, states: &mut HashSet<S>) {
        states.extend(target.iter().cloned());
    }
}

/// The transitions leaving one state: consuming moves keyed by symbol, and
/// the epsilon moves apart so that a lookup never builds an owned key.
struct Row<Y, T> {
    symbols: HashMap<Y, T>,
    epsilon: Option<T>,
}

impl<Y, T> Row<Y, T> {
    fn new() -> Self {
        Row {
            symbols: HashMap::new(),
            epsilon: None,
        }
    }

    fn len(&self) -> usize {
        self.symbols.len() + usize::from(self.epsilon.is_some())
    }
}

impl<Y: Clone, T: Clone> Clone for Row<Y, T> {
    fn clone(&self) -> Self {
        Row {
            symbols: self.symbols.clone(),
            epsilon: self.epsilon.clone(),
        }
    }
}

/// The type `TransitionTable` maps a `(state, symbol)` pair to a target. A
/// `None` symbol is an epsilon move.
///
/// Looking up a missing key is never an error: `get` answers `None` and
/// `lookup` falls back to the caller's default, which is how rejection is
/// represented.
///
/// # Examples
///
/// ```
/// use automata::transition::NondeterministicTable;
///
/// let mut table = NondeterministicTable::new();
/// table.insert(1, 'w', 1);
/// table.insert(1, 'w', 2);
/// table.insert_epsilon(2, 3);
///
/// assert_eq!(table.lookup(&1, Some(&'w'), Default::default()).len(), 2);
/// assert!(table.lookup(&3, Some(&'w'), Default::default()).is_empty());
/// assert_eq!(table.alphabet().len(), 1);
/// assert_eq!(table.states().len(), 3);
/// ```
pub struct TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    M: Mode<S>,
{
    rows: HashMap<S, Row<Y, M::Target>>,
    mode: PhantomData<M>,
}

/// Table of a deterministic automaton.
pub type DeterministicTable<S, Y> = TransitionTable<S, Y, Deterministic>;

/// Table of a nondeterministic automaton, with or without epsilon moves.
pub type NondeterministicTable<S, Y> = TransitionTable<S, Y, Nondeterministic>;

impl<S, Y, M> TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    M: Mode<S>,
{
    /// Number of `(state, symbol)` keys.
    pub fn len(&self) -> usize {
        self.rows.values().map(Row::len).sum()
    }

    /// True if no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over `(state, symbol, target)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, Option<&Y>, &M::Target)> {
        self.rows.iter().flat_map(|(src, row)| {
            row.symbols
                .iter()
                .map(move |(symbol, target)| (src, Some(symbol), target))
                .chain(row.epsilon.iter().map(move |target| (src, None, target)))
        })
    }
}

impl<S, Y, M> TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
    M: Mode<S>,
{
    /// Creates an empty table. Each call allocates its own map.
    pub fn new() -> Self {
        TransitionTable {
            rows: HashMap::new(),
            mode: PhantomData,
        }
    }

    /// Borrows the target stored for `(state, symbol)`, if any.
    pub fn get(&self, state: &S, symbol: Option<&Y>) -> Option<&M::Target> {
        let row = self.rows.get(state)?;
        match symbol {
            Some(symbol) => row.symbols.get(symbol),
            None => row.epsilon.as_ref(),
        }
    }

    /// Returns the target stored for `(state, symbol)`, or `default` when the
    /// key is unmapped.
    pub fn lookup(&self, state: &S, symbol: Option<&Y>, default: M::Target) -> M::Target {
        self.get(state, symbol).cloned().unwrap_or(default)
    }

    /// Adds the transition `state --symbol--> target`.
    ///
    /// A deterministic table overwrites a previous target, a nondeterministic
    /// one appends to it.
    pub fn insert(&mut self, state: S, symbol: Y, target: S) {
        self.insert_target(state, Some(symbol), M::single(target));
    }

    /// Adds the transition `state --symbol--> target` for every symbol of
    /// `symbols`.
    pub fn insert_many<I>(&mut self, state: S, symbols: I, target: S)
    where
        I: IntoIterator<Item = Y>,
    {
        for symbol in symbols {
            self.insert(state.clone(), symbol, target.clone());
        }
    }

    fn insert_target(&mut self, state: S, symbol: Option<Y>, target: M::Target) {
        let row = self.rows.entry(state).or_insert_with(Row::new);
        match symbol {
            Some(symbol) => match row.symbols.entry(symbol) {
                Entry::Occupied(mut entry) => M::absorb(entry.get_mut(), target),
                Entry::Vacant(entry) => {
                    entry.insert(target);
                }
            },
            None => {
                if let Some(stored) = row.epsilon.as_mut() {
                    M::absorb(stored, target);
                } else {
                    row.epsilon = Some(target);
                }
            }
        }
    }

    /// The distinct consuming symbols used by the table. Epsilon is never
    /// part of it.
    pub fn alphabet(&self) -> HashSet<Y> {
        self.rows
            .values()
            .flat_map(|row| row.symbols.keys().cloned())
            .collect()
    }

    /// The distinct states appearing either as a source or inside a target.
    pub fn states(&self) -> HashSet<S> {
        self.iter()
            .fold(HashSet::new(), |mut states, (src, _, target)| {
                states.insert(src.clone());
                M::collect_into(target, &mut states);
                states
            })
    }
}

impl<S, Y> TransitionTable<S, Y, Nondeterministic>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
{
    /// Adds the epsilon move `state --> target`.
    pub fn insert_epsilon(&mut self, state: S, target: S) {
        self.insert_target(state, None, Nondeterministic::single(target));
    }

    /// Adds every state of `targets` to the entry `(state, symbol)`. A `None`
    /// symbol adds epsilon moves.
    pub fn insert_all<I>(&mut self, state: S, symbol: Option<Y>, targets: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.insert_target(state, symbol, targets.into_iter().collect());
    }
}

impl<S, Y, M> Default for TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
    M: Mode<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, Y, M> Clone for TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    Y: Clone,
    M: Mode<S>,
{
    fn clone(&self) -> Self {
        TransitionTable {
            rows: self.rows.clone(),
            mode: PhantomData,
        }
    }
}

impl<S, Y, M> fmt::Debug for TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone + fmt::Debug,
    Y: fmt::Debug,
    M: Mode<S>,
    M::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(src, symbol, target)| ((src, symbol), target)))
            .finish()
    }
}

impl<S, Y, M> Extend<((S, Option<Y>), M::Target)> for TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
    M: Mode<S>,
{
    fn extend<I: IntoIterator<Item = ((S, Option<Y>), M::Target)>>(&mut self, iter: I) {
        for ((state, symbol), target) in iter {
            self.insert_target(state, symbol, target);
        }
    }
}

impl<S, Y, M> FromIterator<((S, Option<Y>), M::Target)> for TransitionTable<S, Y, M>
where
    S: Eq + Hash + Clone,
    Y: Eq + Hash + Clone,
    M: Mode<S>,
{
    fn from_iter<I: IntoIterator<Item = ((S, Option<Y>), M::Target)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
