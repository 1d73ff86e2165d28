// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of the strict construction paths.
//!
//! Running an automaton never fails. Only the builders and the opt-in
//! `validate` checks report errors.

use std::fmt::Debug;
use std::result;

use thiserror::Error;

/// The `BuildError` type, returned by the DFA, NFA and ENFA builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError<S: Debug, Y: Debug> {
    /// No starting state is specified.
    #[error("Missing starting state.")]
    MissingStartingState,

    /// The transition from `state` with `symbol` is defined twice. Only
    /// deterministic builders report it.
    #[error("Duplicated transition ({state:?},{symbol:?}).")]
    DuplicatedTransition {
        /// Source state of the transition.
        state: S,
        /// Symbol of the transition, `None` for an epsilon move.
        symbol: Option<Y>,
    },
}

/// The `ValidationError` type, returned by the `validate` method of each
/// automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError<S: Debug> {
    /// The start state does not appear in any transition.
    #[error("Start state {0:?} does not appear in any transition.")]
    UnknownStartState(S),

    /// An accept state does not appear in any transition.
    #[error("Accept state {0:?} does not appear in any transition.")]
    UnknownAcceptState(S),
}

/// Alias for result::Result<T,BuildError<S,Y>>.
pub type BuildResult<T, S, Y> = result::Result<T, BuildError<S, Y>>;

/// Alias for result::Result<(),ValidationError<S>>.
pub type ValidationResult<S> = result::Result<(), ValidationError<S>>;
