//! This module defines the core data structures and types shared by the enumerator,
//! including symbol and state identifiers, transitions, table cells, finalization
//! outcomes and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tape symbol. Symbol `0` is the blank.
pub type Symbol = u8;
/// A numbered control state. State `0` is the initial state.
pub type State = u8;

/// The blank tape symbol.
pub const BLANK: Symbol = 0;
/// The default bound on simulation steps before a machine is left undetermined.
pub const DEFAULT_STEP_LIMIT: u64 = 200;
/// How many driver iterations pass between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;
/// The largest supported number of states. States are written `a` to `g` in the
/// text format; `h` is reserved for halt.
pub const MAX_STATES: usize = 7;
/// The largest supported number of symbols (one decimal digit per symbol in the text format).
pub const MAX_SYMBOLS: usize = 10;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Both directions, in branching order.
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// The head offset applied by this direction.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// The single character used for this direction in the text format.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Where a transition sends the machine.
///
/// An unassigned cell is a [`Cell::Undefined`], never a transition without a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Continue in a numbered state.
    State(State),
    /// Stop. The simulator never looks up a transition for this pseudo-state.
    Halt,
}

impl Target {
    /// The single character used for this target in the text format:
    /// `h` for halt, `a`, `b`, ... for states 0, 1, ...
    pub fn as_char(self) -> char {
        match self {
            Target::Halt => 'h',
            Target::State(state) => (b'a' + state) as char,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(Target::Halt),
            'a'..='g' => Some(Target::State(c as u8 - b'a')),
            _ => None,
        }
    }
}

/// A single transition rule: what to write, where to move and which state comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written under the head.
    pub output: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The next state.
    pub target: Target,
}

impl Transition {
    pub fn new(output: Symbol, direction: Direction, target: Target) -> Self {
        Self {
            output,
            direction,
            target,
        }
    }

    /// The transition used to close a table: write `1`, move right, halt.
    pub fn halting() -> Self {
        Self::new(1, Direction::Right, Target::Halt)
    }
}

/// One cell of a transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not yet assigned. Reaching it during simulation is what triggers branching.
    #[default]
    Undefined,
    /// Assigned once and never reassigned.
    Defined(Transition),
}

impl Cell {
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Cell::Undefined => None,
            Cell::Defined(transition) => Some(transition),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Cell::Undefined)
    }
}

/// How a machine left the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The machine executed a transition into the halt state.
    Halted,
    /// The tape returned to all blank after at least one step, so the machine never halts.
    BlankTape,
    /// The step bound was exceeded. Nothing is known about the machine.
    StepLimit,
    /// The table had referenced every state and symbol when an undefined cell was
    /// reached, and that cell was closed with a halting transition.
    HaltCandidate,
    /// The last undefined cell was closed with a halting transition. Whether it is
    /// ever reached is not known.
    Completed,
}

impl Outcome {
    /// Every outcome, in reporting order.
    pub const ALL: [Outcome; 5] = [
        Outcome::Halted,
        Outcome::BlankTape,
        Outcome::StepLimit,
        Outcome::HaltCandidate,
        Outcome::Completed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Outcome::Halted => "halted",
            Outcome::BlankTape => "blank_tape",
            Outcome::StepLimit => "step_limit",
            Outcome::HaltCandidate => "halt_candidate",
            Outcome::Completed => "completed",
        }
    }
}

/// Represents the errors that can occur while enumerating machines.
///
/// The first four variants are invariant violations: the search logic never
/// produces them, and a run that hits one is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A table cell that already holds a transition was assigned again.
    #[error("Cell ({state}, {symbol}) is already defined")]
    CellAlreadyDefined { state: State, symbol: Symbol },
    /// The simulator was asked to execute an unassigned cell.
    #[error("No transition defined for state {state} and symbol {symbol}")]
    UndefinedTransition { state: State, symbol: Symbol },
    /// The simulator was asked to step a machine that has already halted.
    #[error("Machine has already halted")]
    Halted,
    /// A state, symbol or output lies outside the configured table dimensions.
    #[error("Out of range: {0}")]
    OutOfRange(String),
    /// The search parameters are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A transition table line could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}
