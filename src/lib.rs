// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

#![deny(missing_docs)]

//! Simulation of finite automata.
//!
//! Three engines share the `Automaton` interface: `Dfa` holds a single
//! current state, `Nfa` a set of states and `Enfa` a set of states closed
//! under epsilon moves. States and symbols are any hashable type chosen by the
//! caller, and a missing transition is never an error: it leads to a dead
//! configuration.
//!
//! ```
//! use automata::{Automaton, Nfa};
//!
//! let mut nfa = Nfa::with_start("start");
//! nfa.add_transitions("start", 'w', vec!["start", "w"])
//!     .add_transition("w", 'e', "we")
//!     .add_accept_state("we");
//!
//! nfa.read_seq("we".chars());
//! assert!(nfa.accepting());
//! nfa.read('x');
//! assert!(nfa.dead());
//! ```

/// shared automaton interface
pub mod automaton;
/// dfa api
pub mod dfa;
/// e_nfa api
pub mod e_nfa;
/// build and validation errors
pub mod error;
/// nfa api
pub mod nfa;
/// transition table api
pub mod transition;

pub use crate::automaton::Automaton;
pub use crate::dfa::Dfa;
pub use crate::e_nfa::Enfa;
pub use crate::nfa::Nfa;
