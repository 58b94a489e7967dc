//! This crate enumerates small Turing machines in tree normal form. Starting from a
//! canonical pair of first moves, every machine is run on a blank tape until it
//! halts, provably loops, exceeds a step bound, or reaches an undefined transition,
//! at which point it is branched into children that each define that transition.

pub mod config;
pub mod driver;
pub mod machine;
pub mod report;
pub mod seed;
pub mod shard;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the search parameters.
pub use config::SearchConfig;
/// Re-exports the driver, its result sink and the single-threaded entry point.
pub use driver::{enumerate, Enumerator, Finalized, ResultSink};
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the output formats.
pub use report::{write_json, write_text, Record, Summary};
/// Re-exports the seed generator.
pub use seed::seeds;
/// Re-exports the multi-threaded entry point.
pub use shard::enumerate_sharded;
/// Re-exports the transition table.
pub use table::TransitionTable;
/// Re-exports the tape.
pub use tape::Tape;
/// Re-exports the identifiers, transitions and error types from the types module.
pub use types::{
    Cell, Direction, Outcome, SearchError, State, Symbol, Target, Transition, BLANK,
    DEFAULT_STEP_LIMIT,
};
