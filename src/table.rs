//! This module defines the `TransitionTable`, the N×M control table of a machine under
//! construction, together with the zdex canonicality test and the one-line text format.

use crate::types::{
    Cell, Direction, SearchError, State, Symbol, Target, Transition, BLANK, MAX_STATES,
    MAX_SYMBOLS,
};
use std::fmt::{self, Display, Formatter};

/// The text written for a cell that has not been assigned yet.
pub const UNDEFINED_CELL: &str = "___";

/// A partially specified transition table.
///
/// Cells are stored state-major. Besides the cells, the table keeps the number of
/// assigned cells and the high-water marks `states_seen` and `symbols_seen`: one
/// more than the largest state and symbol ever referenced by an assignment, either
/// as the cell coordinate or as its output and target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionTable {
    states: usize,
    symbols: usize,
    cells: Vec<Cell>,
    defined_count: usize,
    states_seen: usize,
    symbols_seen: usize,
}

impl TransitionTable {
    /// Creates a table of `states` × `symbols` undefined cells.
    pub fn new(states: usize, symbols: usize) -> Self {
        Self {
            states,
            symbols,
            cells: vec![Cell::Undefined; states * symbols],
            defined_count: 0,
            states_seen: 0,
            symbols_seen: 0,
        }
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn symbols(&self) -> usize {
        self.symbols
    }

    pub fn defined_count(&self) -> usize {
        self.defined_count
    }

    pub fn states_seen(&self) -> usize {
        self.states_seen
    }

    pub fn symbols_seen(&self) -> usize {
        self.symbols_seen
    }

    /// Returns the cell at (`state`, `symbol`), or `None` outside the table.
    pub fn get(&self, state: State, symbol: Symbol) -> Option<&Cell> {
        self.index(state, symbol).map(|i| &self.cells[i])
    }

    /// Returns the transition at (`state`, `symbol`) if it has been assigned.
    pub fn transition(&self, state: State, symbol: Symbol) -> Option<&Transition> {
        self.get(state, symbol).and_then(Cell::transition)
    }

    pub fn is_undefined(&self, state: State, symbol: Symbol) -> bool {
        self.get(state, symbol).is_none_or(Cell::is_undefined)
    }

    /// Checks whether every cell has been assigned.
    pub fn is_complete(&self) -> bool {
        self.defined_count == self.cells.len()
    }

    /// Checks whether the table has referenced every available state and symbol.
    /// Some cells may still be undefined.
    pub fn is_full(&self) -> bool {
        self.states_seen == self.states && self.symbols_seen == self.symbols
    }

    /// Iterates over the coordinates of the cells that are still undefined, state-major.
    pub fn undefined_cells(&self) -> impl Iterator<Item = (State, Symbol)> + '_ {
        let symbols = self.symbols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_undefined())
            .map(move |(i, _)| ((i / symbols) as State, (i % symbols) as Symbol))
    }

    /// Assigns a transition to an undefined cell.
    ///
    /// # Errors
    ///
    /// * `SearchError::CellAlreadyDefined` if the cell already holds a transition.
    /// * `SearchError::OutOfRange` if the coordinate, the output symbol or the target
    ///   state lies outside the table.
    pub fn assign(
        &mut self,
        state: State,
        symbol: Symbol,
        transition: Transition,
    ) -> Result<(), SearchError> {
        let index = self.index(state, symbol).ok_or_else(|| {
            SearchError::OutOfRange(format!(
                "cell ({}, {}) in a {}x{} table",
                state, symbol, self.states, self.symbols
            ))
        })?;

        if transition.output as usize >= self.symbols {
            return Err(SearchError::OutOfRange(format!(
                "output symbol {} with {} symbols",
                transition.output, self.symbols
            )));
        }
        if let Target::State(next) = transition.target {
            if next as usize >= self.states {
                return Err(SearchError::OutOfRange(format!(
                    "target state {} with {} states",
                    next, self.states
                )));
            }
        }

        if !self.cells[index].is_undefined() {
            return Err(SearchError::CellAlreadyDefined { state, symbol });
        }

        self.cells[index] = Cell::Defined(transition);
        self.defined_count += 1;

        self.states_seen = self.states_seen.max(state as usize + 1);
        self.symbols_seen = self.symbols_seen.max(symbol as usize + 1);
        if let Target::State(next) = transition.target {
            self.states_seen = self.states_seen.max(next as usize + 1);
        }
        self.symbols_seen = self.symbols_seen.max(transition.output as usize + 1);

        Ok(())
    }

    /// Definition 23: every state has a rightward transition on the blank symbol.
    ///
    /// Tables passing this test are pruned from the search, since from a blank tape
    /// they only ever march right.
    pub fn satisfies_zdex(&self) -> bool {
        (0..self.states).all(|state| {
            matches!(
                self.transition(state as State, BLANK),
                Some(Transition {
                    direction: Direction::Right,
                    ..
                })
            )
        })
    }

    /// Parses a line produced by the `Display` implementation.
    ///
    /// The line must hold exactly `states * symbols` whitespace separated cells, each
    /// either `___` or `<digit><l|r><state letter or h>`.
    pub fn parse(line: &str, states: usize, symbols: usize) -> Result<Self, SearchError> {
        if !(1..=MAX_STATES).contains(&states) || !(1..=MAX_SYMBOLS).contains(&symbols) {
            return Err(SearchError::InvalidConfig(format!(
                "a {}x{} table cannot be written in the text format",
                states, symbols
            )));
        }

        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != states * symbols {
            return Err(SearchError::Parse(format!(
                "expected {} cells, found {}",
                states * symbols,
                cells.len()
            )));
        }

        let mut table = Self::new(states, symbols);
        for (i, text) in cells.into_iter().enumerate() {
            if text == UNDEFINED_CELL {
                continue;
            }

            let transition = parse_cell(text)?;
            table
                .assign((i / symbols) as State, (i % symbols) as Symbol, transition)
                .map_err(|e| SearchError::Parse(format!("cell {}: {}", text, e)))?;
        }

        Ok(table)
    }

    fn index(&self, state: State, symbol: Symbol) -> Option<usize> {
        let (state, symbol) = (state as usize, symbol as usize);
        (state < self.states && symbol < self.symbols).then(|| state * self.symbols + symbol)
    }
}

fn parse_cell(text: &str) -> Result<Transition, SearchError> {
    let invalid = || SearchError::Parse(format!("invalid cell '{}'", text));

    let mut chars = text.chars();
    let output = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(invalid)?;
    let direction = chars
        .next()
        .and_then(Direction::from_char)
        .ok_or_else(invalid)?;
    let target = chars.next().and_then(Target::from_char).ok_or_else(invalid)?;
    if chars.next().is_some() {
        return Err(invalid());
    }

    Ok(Transition::new(output as Symbol, direction, target))
}

impl Display for TransitionTable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match cell {
                Cell::Undefined => write!(f, "{}", UNDEFINED_CELL)?,
                Cell::Defined(t) => write!(
                    f,
                    "{}{}{}",
                    t.output,
                    t.direction.as_char(),
                    t.target.as_char()
                )?,
            }
        }
        Ok(())
    }
}
