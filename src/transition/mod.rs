// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

/// transition table core api
pub mod core;

pub use self::core::{
    Deterministic, DeterministicTable, Mode, Nondeterministic, NondeterministicTable,
    TransitionTable,
};
