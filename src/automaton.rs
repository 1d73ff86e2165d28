// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

//! The capability interface shared by every automaton.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use itertools::Itertools;

use crate::error::{ValidationError, ValidationResult};

/// `Automaton` is implemented by `Dfa`, `Nfa` and `Enfa`. Callers can drive any
/// of them through this trait without knowing which engine they hold.
///
/// Every operation is total: an unknown symbol is not an error, it only
/// leads the automaton to a dead configuration.
pub trait Automaton {
    /// The state type chosen by the caller.
    type State: Eq + Hash + Clone;
    /// The input symbol type chosen by the caller.
    type Symbol: Eq + Hash + Clone;

    /// Moves the automaton back to its initial configuration.
    fn reset(&mut self) -> &mut Self;

    /// Consumes one symbol.
    fn read(&mut self, symbol: Self::Symbol) -> &mut Self;

    /// Consumes every symbol of `seq`, left to right. An empty sequence leaves
    /// the configuration untouched.
    fn read_seq<I>(&mut self, seq: I) -> &mut Self
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        seq.into_iter()
            .fold(self, |automaton, symbol| automaton.read(symbol))
    }

    /// True if the current configuration holds an accept state.
    fn accepting(&self) -> bool;

    /// True if no live configuration remains.
    fn dead(&self) -> bool;

    /// The consuming symbols used by the transitions.
    fn alphabet(&self) -> HashSet<Self::Symbol>;

    /// Every state the automaton knows about: transition endpoints, the start
    /// state and the accept states.
    fn states(&self) -> HashSet<Self::State>;

    /// Test if an input sequence is a word of the language defined by the
    /// automaton. The automaton is reset first and is left on the last
    /// configuration reached.
    fn test<I>(&mut self, seq: I) -> bool
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        self.reset().read_seq(seq).accepting()
    }
}

/// Checks that the start state and the accept states appear in `known`. An
/// empty `known` accepts any start state, and an accept state equal to the
/// start state is always known.
pub(crate) fn validate_states<S>(
    known: &HashSet<S>,
    start: &S,
    finals: &HashSet<S>,
) -> ValidationResult<S>
where
    S: Eq + Hash + Clone + fmt::Debug,
{
    if !known.is_empty() && !known.contains(start) {
        return Err(ValidationError::UnknownStartState(start.clone()));
    }
    match finals
        .iter()
        .find(|state| *state != start && !known.contains(*state))
    {
        Some(state) => Err(ValidationError::UnknownAcceptState(state.clone())),
        None => Ok(()),
    }
}

/// Renders a set configuration as `({1,2}*)`, or `({dead})` when it is empty.
pub(crate) fn fmt_state_set<S>(
    f: &mut fmt::Formatter,
    states: &HashSet<S>,
    accepting: bool,
) -> fmt::Result
where
    S: fmt::Display,
{
    let marker = if accepting { "*" } else { "" };
    if states.is_empty() {
        write!(f, "({{dead}}{})", marker)
    } else {
        write!(f, "({{{}}}{})", states.iter().join(","), marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(states: &[usize]) -> HashSet<usize> {
        states.iter().cloned().collect()
    }

    #[test]
    fn test_validate_states() {
        let known = set(&[0, 1, 2]);
        assert_eq!(validate_states(&known, &0, &set(&[2])), Ok(()));
        assert_eq!(validate_states(&set(&[]), &7, &set(&[7])), Ok(()));
        assert_eq!(
            validate_states(&known, &5, &set(&[2])),
            Err(ValidationError::UnknownStartState(5))
        );
        assert_eq!(
            validate_states(&known, &0, &set(&[9])),
            Err(ValidationError::UnknownAcceptState(9))
        );
    }
}
