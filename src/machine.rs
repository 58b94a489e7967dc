//! This module defines the `Machine` struct, a single node of the search tree: a
//! partially specified transition table together with the configuration reached by
//! running it on a blank tape.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Direction, SearchError, State, Symbol, Target, Transition};

/// A Turing machine under construction.
///
/// A `Machine` is a plain value: cloning it deep-copies the table and the tape, so
/// branches produced from the same parent never share mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    table: TransitionTable,
    tape: Tape,
    state: Target,
    head: i64,
    steps: u64,
}

impl Machine {
    /// Creates a machine with an empty `states` × `symbols` table, in state 0 at
    /// position 0 of a blank tape.
    pub fn new(states: usize, symbols: usize) -> Self {
        Self {
            table: TransitionTable::new(states, symbols),
            tape: Tape::new(),
            state: Target::State(0),
            head: 0,
            steps: 0,
        }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Consumes the machine, keeping only its transition table.
    pub fn into_table(self) -> TransitionTable {
        self.table
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the current state, or `Target::Halt` once the machine has halted.
    pub fn state(&self) -> Target {
        self.state
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the number of steps executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.state == Target::Halt
    }

    /// Returns the symbol under the head.
    pub fn symbol_under_head(&self) -> Symbol {
        self.tape.read(self.head)
    }

    /// Returns the table coordinate the next step would execute, or `None` if the
    /// machine has halted.
    pub fn next_cell(&self) -> Option<(State, Symbol)> {
        match self.state {
            Target::State(state) => Some((state, self.symbol_under_head())),
            Target::Halt => None,
        }
    }

    /// Returns the transition the next step would execute, if it is defined.
    pub fn next_transition(&self) -> Option<&Transition> {
        self.next_cell()
            .and_then(|(state, symbol)| self.table.transition(state, symbol))
    }

    /// Checks whether the next step would execute an undefined cell.
    pub fn next_transition_is_undefined(&self) -> bool {
        self.next_cell()
            .is_some_and(|(state, symbol)| self.table.is_undefined(state, symbol))
    }

    /// Assigns a transition to the undefined cell at (`state`, `symbol`).
    ///
    /// # Errors
    ///
    /// * `SearchError::CellAlreadyDefined` if the cell already holds a transition.
    /// * `SearchError::OutOfRange` if any index lies outside the table.
    pub fn assign(
        &mut self,
        state: State,
        symbol: Symbol,
        output: Symbol,
        direction: Direction,
        target: Target,
    ) -> Result<(), SearchError> {
        self.table
            .assign(state, symbol, Transition::new(output, direction, target))
    }

    /// Checks whether the table has referenced every state and every symbol.
    pub fn is_table_full(&self) -> bool {
        self.table.is_full()
    }

    /// See [`TransitionTable::satisfies_zdex`].
    pub fn satisfies_zdex(&self) -> bool {
        self.table.satisfies_zdex()
    }

    /// Executes a single step: writes the output symbol, moves the head and enters
    /// the target state.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the machine entered the halt state.
    /// * `Ok(false)` if it can keep running.
    /// * `Err(SearchError::UndefinedTransition)` if the addressed cell is undefined.
    /// * `Err(SearchError::Halted)` if the machine had already halted.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        let (state, symbol) = self.next_cell().ok_or(SearchError::Halted)?;
        let transition = *self
            .table
            .transition(state, symbol)
            .ok_or(SearchError::UndefinedTransition { state, symbol })?;

        self.tape.write(self.head, transition.output);
        self.head += transition.direction.offset();
        self.state = transition.target;
        self.steps += 1;

        Ok(self.is_halted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLANK;

    /// `1rb 1lb 1la 1rh`, the two-state busy beaver.
    fn busy_beaver() -> Machine {
        let mut machine = Machine::new(2, 2);
        machine
            .assign(0, 0, 1, Direction::Right, Target::State(1))
            .unwrap();
        machine
            .assign(0, 1, 1, Direction::Left, Target::State(1))
            .unwrap();
        machine
            .assign(1, 0, 1, Direction::Left, Target::State(0))
            .unwrap();
        machine.assign(1, 1, 1, Direction::Right, Target::Halt).unwrap();
        machine
    }

    #[test]
    fn test_machine_creation() {
        let machine = Machine::new(2, 3);

        assert_eq!(machine.state(), Target::State(0));
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.steps(), 0);
        assert_eq!(machine.symbol_under_head(), BLANK);
        assert!(machine.tape().is_blank());
        assert!(machine.next_transition_is_undefined());
        assert_eq!(machine.next_cell(), Some((0, 0)));
    }

    #[test]
    fn test_single_step() {
        let mut machine = Machine::new(2, 2);
        machine
            .assign(0, 0, 1, Direction::Right, Target::State(1))
            .unwrap();

        assert!(!machine.next_transition_is_undefined());
        assert_eq!(machine.step(), Ok(false));
        assert_eq!(machine.state(), Target::State(1));
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.steps(), 1);
        assert_eq!(machine.tape().read(0), 1);
        assert!(machine.next_transition_is_undefined());
    }

    #[test]
    fn test_step_on_undefined_fails() {
        let mut machine = Machine::new(2, 2);

        assert_eq!(
            machine.step(),
            Err(SearchError::UndefinedTransition {
                state: 0,
                symbol: 0
            })
        );
        assert_eq!(machine.steps(), 0);
    }

    #[test]
    fn test_run_busy_beaver_to_halt() {
        let mut machine = busy_beaver();

        let mut halted = false;
        while !halted {
            halted = machine.step().unwrap();
        }

        assert_eq!(machine.steps(), 6);
        assert!(machine.is_halted());
        assert!(!machine.next_transition_is_undefined());
        assert_eq!(machine.next_transition(), None);
        assert_eq!((-2..=1).map(|p| machine.tape().read(p)).sum::<u8>(), 4);
        assert_eq!(machine.step(), Err(SearchError::Halted));
    }

    #[test]
    fn test_left_moves_use_negative_positions() {
        let mut machine = Machine::new(1, 2);
        machine
            .assign(0, 0, 1, Direction::Left, Target::State(0))
            .unwrap();

        machine.step().unwrap();
        machine.step().unwrap();

        assert_eq!(machine.head(), -2);
        assert_eq!(machine.tape().read(0), 1);
        assert_eq!(machine.tape().read(-1), 1);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut parent = Machine::new(2, 2);
        parent
            .assign(0, 0, 1, Direction::Right, Target::State(1))
            .unwrap();

        let mut child = parent.clone();
        child
            .assign(1, 0, 0, Direction::Left, Target::State(0))
            .unwrap();
        child.step().unwrap();

        assert_eq!(parent.table().defined_count(), 1);
        assert_eq!(parent.steps(), 0);
        assert!(parent.tape().is_blank());
        assert_eq!(child.table().defined_count(), 2);
    }

    #[test]
    fn test_zdex_ignores_execution_history() {
        let mut machine = Machine::new(2, 2);
        machine
            .assign(0, 0, 1, Direction::Right, Target::State(1))
            .unwrap();
        machine
            .assign(1, 0, 1, Direction::Right, Target::State(0))
            .unwrap();
        let before = machine.satisfies_zdex();

        for _ in 0..5 {
            machine.step().unwrap();
            assert_eq!(machine.satisfies_zdex(), before);
        }
        assert!(before);
    }

    #[test]
    fn test_seen_counters_are_monotone() {
        let mut machine = Machine::new(3, 3);
        let assignments = [
            (0, 0, 1, Direction::Right, Target::State(1)),
            (1, 0, 0, Direction::Left, Target::State(0)),
            (0, 1, 2, Direction::Left, Target::State(2)),
            (2, 2, 1, Direction::Right, Target::Halt),
        ];

        let mut last = (0, 0);
        for (state, symbol, output, direction, target) in assignments {
            machine
                .assign(state, symbol, output, direction, target)
                .unwrap();
            let seen = (
                machine.table().states_seen(),
                machine.table().symbols_seen(),
            );
            assert!(seen.0 >= last.0 && seen.1 >= last.1);
            assert!(seen.0 <= 3 && seen.1 <= 3);
            last = seen;
        }
        assert!(machine.is_table_full());
    }
}
